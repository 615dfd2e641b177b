use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use kana_lookup::{filter_pool, FontGlyphRenderer, Mode, RecognizerConfig, TemplateBuilder, TemplateLibrary, KANA_SYMBOLS};

/// Renders the kana template library from a font and writes it as bincode.
#[derive(Parser, Debug)]
#[command(name = "template_bake")]
struct Args {
    /// TrueType/OpenType font with kana coverage
    #[arg(long)]
    font: PathBuf,

    /// Face index inside a font collection
    #[arg(long, default_value_t = 0)]
    index: u32,

    /// Optional JSON recognizer configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// hiragana, katakana or mixed
    #[arg(long, default_value = "mixed")]
    mode: String,

    #[arg(long, default_value = "./data/kana_templates.bin")]
    out: PathBuf,
}

fn write_library(library: &TemplateLibrary, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let mut writer = BufWriter::new(file);
    library.to_writer(&mut writer)?;
    // Dropping the writer would swallow a failed final write
    writer.flush().with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RecognizerConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => RecognizerConfig::default(),
    };
    let mode = match Mode::parse(&args.mode) {
        Some(mode) => mode,
        None => bail!("unknown mode {:?}", args.mode),
    };
    let renderer = FontGlyphRenderer::load(&args.font, args.index)
        .with_context(|| format!("loading font {}", args.font.display()))?;

    let pool: Vec<_> = filter_pool(&KANA_SYMBOLS, mode).into_iter().copied().collect();
    let missing: Vec<char> = pool.iter().map(|s| s.kana).filter(|k| !renderer.has_glyph(*k)).collect();
    if !missing.is_empty() {
        bail!("font lacks {} glyphs: {}", missing.len(), missing.iter().collect::<String>());
    }

    let library = TemplateBuilder::from_config(&config).build(&renderer, &pool)?;
    write_library(&library, &args.out)?;
    info!(templates = library.len(), out = %args.out.display(), "wrote template library");
    println!("Wrote {} templates to {}.", library.len(), args.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kana_lookup::NormalizerConfig;

    #[test]
    fn test_write_library() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data").join("kana_templates.bin");
        let library = TemplateLibrary::new(NormalizerConfig::default());
        write_library(&library, &out).unwrap();
        let loaded = TemplateLibrary::from_bytes(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(loaded, library);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure_is_reported() {
        // Everything fits in the buffer, so only the flush can fail
        let library = TemplateLibrary::new(NormalizerConfig::default());
        assert!(write_library(&library, Path::new("/dev/full")).is_err());
    }
}
