use super::entities::*;

// Basic gojuon kana, hiragana first, then katakana in the same order.
pub static KANA_SYMBOLS: [KanaSymbol; 92] = [
    KanaSymbol { kana: 'あ', romaji: "a", script: Script::Hiragana },
    KanaSymbol { kana: 'い', romaji: "i", script: Script::Hiragana },
    KanaSymbol { kana: 'う', romaji: "u", script: Script::Hiragana },
    KanaSymbol { kana: 'え', romaji: "e", script: Script::Hiragana },
    KanaSymbol { kana: 'お', romaji: "o", script: Script::Hiragana },
    KanaSymbol { kana: 'か', romaji: "ka", script: Script::Hiragana },
    KanaSymbol { kana: 'き', romaji: "ki", script: Script::Hiragana },
    KanaSymbol { kana: 'く', romaji: "ku", script: Script::Hiragana },
    KanaSymbol { kana: 'け', romaji: "ke", script: Script::Hiragana },
    KanaSymbol { kana: 'こ', romaji: "ko", script: Script::Hiragana },
    KanaSymbol { kana: 'さ', romaji: "sa", script: Script::Hiragana },
    KanaSymbol { kana: 'し', romaji: "shi", script: Script::Hiragana },
    KanaSymbol { kana: 'す', romaji: "su", script: Script::Hiragana },
    KanaSymbol { kana: 'せ', romaji: "se", script: Script::Hiragana },
    KanaSymbol { kana: 'そ', romaji: "so", script: Script::Hiragana },
    KanaSymbol { kana: 'た', romaji: "ta", script: Script::Hiragana },
    KanaSymbol { kana: 'ち', romaji: "chi", script: Script::Hiragana },
    KanaSymbol { kana: 'つ', romaji: "tsu", script: Script::Hiragana },
    KanaSymbol { kana: 'て', romaji: "te", script: Script::Hiragana },
    KanaSymbol { kana: 'と', romaji: "to", script: Script::Hiragana },
    KanaSymbol { kana: 'な', romaji: "na", script: Script::Hiragana },
    KanaSymbol { kana: 'に', romaji: "ni", script: Script::Hiragana },
    KanaSymbol { kana: 'ぬ', romaji: "nu", script: Script::Hiragana },
    KanaSymbol { kana: 'ね', romaji: "ne", script: Script::Hiragana },
    KanaSymbol { kana: 'の', romaji: "no", script: Script::Hiragana },
    KanaSymbol { kana: 'は', romaji: "ha", script: Script::Hiragana },
    KanaSymbol { kana: 'ひ', romaji: "hi", script: Script::Hiragana },
    KanaSymbol { kana: 'ふ', romaji: "fu", script: Script::Hiragana },
    KanaSymbol { kana: 'へ', romaji: "he", script: Script::Hiragana },
    KanaSymbol { kana: 'ほ', romaji: "ho", script: Script::Hiragana },
    KanaSymbol { kana: 'ま', romaji: "ma", script: Script::Hiragana },
    KanaSymbol { kana: 'み', romaji: "mi", script: Script::Hiragana },
    KanaSymbol { kana: 'む', romaji: "mu", script: Script::Hiragana },
    KanaSymbol { kana: 'め', romaji: "me", script: Script::Hiragana },
    KanaSymbol { kana: 'も', romaji: "mo", script: Script::Hiragana },
    KanaSymbol { kana: 'や', romaji: "ya", script: Script::Hiragana },
    KanaSymbol { kana: 'ゆ', romaji: "yu", script: Script::Hiragana },
    KanaSymbol { kana: 'よ', romaji: "yo", script: Script::Hiragana },
    KanaSymbol { kana: 'ら', romaji: "ra", script: Script::Hiragana },
    KanaSymbol { kana: 'り', romaji: "ri", script: Script::Hiragana },
    KanaSymbol { kana: 'る', romaji: "ru", script: Script::Hiragana },
    KanaSymbol { kana: 'れ', romaji: "re", script: Script::Hiragana },
    KanaSymbol { kana: 'ろ', romaji: "ro", script: Script::Hiragana },
    KanaSymbol { kana: 'わ', romaji: "wa", script: Script::Hiragana },
    KanaSymbol { kana: 'を', romaji: "wo", script: Script::Hiragana },
    KanaSymbol { kana: 'ん', romaji: "n", script: Script::Hiragana },
    KanaSymbol { kana: 'ア', romaji: "a", script: Script::Katakana },
    KanaSymbol { kana: 'イ', romaji: "i", script: Script::Katakana },
    KanaSymbol { kana: 'ウ', romaji: "u", script: Script::Katakana },
    KanaSymbol { kana: 'エ', romaji: "e", script: Script::Katakana },
    KanaSymbol { kana: 'オ', romaji: "o", script: Script::Katakana },
    KanaSymbol { kana: 'カ', romaji: "ka", script: Script::Katakana },
    KanaSymbol { kana: 'キ', romaji: "ki", script: Script::Katakana },
    KanaSymbol { kana: 'ク', romaji: "ku", script: Script::Katakana },
    KanaSymbol { kana: 'ケ', romaji: "ke", script: Script::Katakana },
    KanaSymbol { kana: 'コ', romaji: "ko", script: Script::Katakana },
    KanaSymbol { kana: 'サ', romaji: "sa", script: Script::Katakana },
    KanaSymbol { kana: 'シ', romaji: "shi", script: Script::Katakana },
    KanaSymbol { kana: 'ス', romaji: "su", script: Script::Katakana },
    KanaSymbol { kana: 'セ', romaji: "se", script: Script::Katakana },
    KanaSymbol { kana: 'ソ', romaji: "so", script: Script::Katakana },
    KanaSymbol { kana: 'タ', romaji: "ta", script: Script::Katakana },
    KanaSymbol { kana: 'チ', romaji: "chi", script: Script::Katakana },
    KanaSymbol { kana: 'ツ', romaji: "tsu", script: Script::Katakana },
    KanaSymbol { kana: 'テ', romaji: "te", script: Script::Katakana },
    KanaSymbol { kana: 'ト', romaji: "to", script: Script::Katakana },
    KanaSymbol { kana: 'ナ', romaji: "na", script: Script::Katakana },
    KanaSymbol { kana: 'ニ', romaji: "ni", script: Script::Katakana },
    KanaSymbol { kana: 'ヌ', romaji: "nu", script: Script::Katakana },
    KanaSymbol { kana: 'ネ', romaji: "ne", script: Script::Katakana },
    KanaSymbol { kana: 'ノ', romaji: "no", script: Script::Katakana },
    KanaSymbol { kana: 'ハ', romaji: "ha", script: Script::Katakana },
    KanaSymbol { kana: 'ヒ', romaji: "hi", script: Script::Katakana },
    KanaSymbol { kana: 'フ', romaji: "fu", script: Script::Katakana },
    KanaSymbol { kana: 'ヘ', romaji: "he", script: Script::Katakana },
    KanaSymbol { kana: 'ホ', romaji: "ho", script: Script::Katakana },
    KanaSymbol { kana: 'マ', romaji: "ma", script: Script::Katakana },
    KanaSymbol { kana: 'ミ', romaji: "mi", script: Script::Katakana },
    KanaSymbol { kana: 'ム', romaji: "mu", script: Script::Katakana },
    KanaSymbol { kana: 'メ', romaji: "me", script: Script::Katakana },
    KanaSymbol { kana: 'モ', romaji: "mo", script: Script::Katakana },
    KanaSymbol { kana: 'ヤ', romaji: "ya", script: Script::Katakana },
    KanaSymbol { kana: 'ユ', romaji: "yu", script: Script::Katakana },
    KanaSymbol { kana: 'ヨ', romaji: "yo", script: Script::Katakana },
    KanaSymbol { kana: 'ラ', romaji: "ra", script: Script::Katakana },
    KanaSymbol { kana: 'リ', romaji: "ri", script: Script::Katakana },
    KanaSymbol { kana: 'ル', romaji: "ru", script: Script::Katakana },
    KanaSymbol { kana: 'レ', romaji: "re", script: Script::Katakana },
    KanaSymbol { kana: 'ロ', romaji: "ro", script: Script::Katakana },
    KanaSymbol { kana: 'ワ', romaji: "wa", script: Script::Katakana },
    KanaSymbol { kana: 'ヲ', romaji: "wo", script: Script::Katakana },
    KanaSymbol { kana: 'ン', romaji: "n", script: Script::Katakana },
];

// Pool entries admitted by the mode, in pool order
pub fn filter_pool<'a>(pool: &'a [KanaSymbol], mode: Mode) -> Vec<&'a KanaSymbol> {
    pool.iter().filter(|symbol| mode.admits(symbol.script)).collect()
}

pub fn find_symbol(pool: &[KanaSymbol], kana: char) -> Option<&KanaSymbol> {
    pool.iter().find(|symbol| symbol.kana == kana)
}
