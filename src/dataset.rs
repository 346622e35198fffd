//! Character dataset used to pick drawing targets.

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub simplified: String,
    pub traditional: String,
    pub pinyin: String,
    pub meaning: String,
}

impl CharacterRecord {
    pub fn new(simplified: &str, traditional: &str, pinyin: &str, meaning: &str) -> Self {
        Self {
            simplified: simplified.to_string(),
            traditional: traditional.to_string(),
            pinyin: pinyin.to_string(),
            meaning: meaning.to_string(),
        }
    }

    /// Exact match against either written form.
    pub fn is_written_as(&self, label: &str) -> bool {
        label == self.simplified || label == self.traditional
    }
}

// (simplified, traditional, pinyin, meaning)
pub const CHARACTERS: &[(&str, &str, &str, &str)] = &[
    ("人", "人", "rén", "person"),
    ("大", "大", "dà", "big"),
    ("小", "小", "xiǎo", "small"),
    ("山", "山", "shān", "mountain"),
    ("水", "水", "shuǐ", "water"),
    ("火", "火", "huǒ", "fire"),
    ("日", "日", "rì", "sun; day"),
    ("月", "月", "yuè", "moon; month"),
    ("口", "口", "kǒu", "mouth"),
    ("中", "中", "zhōng", "middle"),
    ("天", "天", "tiān", "sky; heaven"),
    ("心", "心", "xīn", "heart"),
    ("手", "手", "shǒu", "hand"),
    ("木", "木", "mù", "tree; wood"),
    ("目", "目", "mù", "eye"),
    ("你", "你", "nǐ", "you"),
    ("好", "好", "hǎo", "good"),
    ("马", "馬", "mǎ", "horse"),
    ("鱼", "魚", "yú", "fish"),
    ("门", "門", "mén", "door"),
    ("车", "車", "chē", "vehicle"),
    ("电", "電", "diàn", "electricity"),
    ("风", "風", "fēng", "wind"),
    ("学", "學", "xué", "to study"),
    ("国", "國", "guó", "country"),
    ("书", "書", "shū", "book"),
    ("爱", "愛", "ài", "love"),
    ("猫", "貓", "māo", "cat"),
    ("鸟", "鳥", "niǎo", "bird"),
    ("龙", "龍", "lóng", "dragon"),
];

pub fn builtin() -> Vec<CharacterRecord> {
    CHARACTERS
        .iter()
        .map(|(s, t, p, m)| CharacterRecord::new(s, t, p, m))
        .collect()
}

/// Records from a JSON array of `{simplified, traditional, pinyin, meaning}`.
pub fn parse_records(json: &str) -> Result<Vec<CharacterRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Uniform index in `0..len`. `None` for an empty range or when the platform
/// has no entropy source.
pub fn random_index(len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as u64;
    // Reject the tail of the u64 range that would bias the modulo.
    let zone = u64::MAX - (u64::MAX % len);
    loop {
        let mut buf = [0u8; 8];
        if let Err(e) = getrandom::getrandom(&mut buf) {
            warn!("no randomness available: {e}");
            return None;
        }
        let v = u64::from_le_bytes(buf);
        if v < zone {
            return Some((v % len) as usize);
        }
    }
}

pub fn pick_random(records: &[CharacterRecord]) -> Option<&CharacterRecord> {
    random_index(records.len()).and_then(|i| records.get(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_index_in_range() {
        assert_eq!(random_index(0), None);
        assert_eq!(random_index(1), Some(0));
        for _ in 0..200 {
            let i = random_index(7).unwrap();
            assert!(i < 7);
        }
    }

    #[test]
    fn test_written_forms() {
        let horse = CharacterRecord::new("马", "馬", "mǎ", "horse");
        assert!(horse.is_written_as("马"));
        assert!(horse.is_written_as("馬"));
        assert!(!horse.is_written_as("鸟"));
        assert!(!horse.is_written_as("马 "));
    }

    #[test]
    fn test_parse_records() {
        let json = r#"[{"simplified":"人","traditional":"人","pinyin":"rén","meaning":"person"}]"#;
        let recs = parse_records(json).unwrap();
        assert_eq!(recs, vec![CharacterRecord::new("人", "人", "rén", "person")]);
        assert!(parse_records(r#"[{"simplified":"人"}]"#).is_err());
    }
}
