use super::entities::*;

// Cosine of the angle between two equal-length vectors.
// Zero when either side has zero norm, so blank queries never produce NaN.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors of differing lengths must never be compared.");
    let mut dot = 0f64;
    let mut mag_a = 0f64;
    let mut mag_b = 0f64;
    for i in 0..a.len() {
        let av = a[i] as f64;
        let bv = b[i] as f64;
        dot += av * bv;
        mag_a += av * av;
        mag_b += bv * bv;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0f64 {
        return 0f32;
    }
    (dot / denom) as f32
}

pub fn cosine_similarity(a: &InkVector, b: &InkVector) -> f32 {
    cosine(a.as_slice(), b.as_slice())
}
