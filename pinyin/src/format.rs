// namedex/pinyin/src/format.rs
//
// Output formatting for raw table readings.
//
// Raw readings are stored the way the resource writes them: lowercase
// letters, `u:` for ü, and a trailing tone digit (`lu:3`, `zhong4`). The
// format decides what callers see: with or without the tone digit, how ü is
// spelled, and the letter case.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneType {
    /// `zhong4`
    WithToneNumber,
    /// `zhong`
    #[default]
    WithoutTone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VCharType {
    /// `lu:`
    WithUAndColon,
    /// `lv`
    #[default]
    WithV,
    /// `lü`
    WithUUnicode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    #[default]
    Lowercase,
    Uppercase,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFormat {
    pub tone: ToneType,
    pub v_char: VCharType,
    pub case: CaseType,
}

impl OutputFormat {
    /// The format used for search spellings: `lv`, no tone, lowercase.
    pub const SEARCH: OutputFormat = OutputFormat {
        tone: ToneType::WithoutTone,
        v_char: VCharType::WithV,
        case: CaseType::Lowercase,
    };

    /// Format one raw reading.
    pub fn format(&self, raw: &str) -> String {
        let raw = raw.trim().to_ascii_lowercase();
        let (body, tone) = split_tone(&raw);

        let mut out = match self.v_char {
            VCharType::WithUAndColon => body.to_string(),
            VCharType::WithV => body.replace("u:", "v"),
            VCharType::WithUUnicode => body.replace("u:", "ü"),
        };
        if let (ToneType::WithToneNumber, Some(tone)) = (self.tone, tone) {
            out.push(tone);
        }
        match self.case {
            CaseType::Lowercase => out,
            CaseType::Uppercase => out.to_uppercase(),
        }
    }
}

/// Split a trailing tone digit (1-5) off a reading.
pub(crate) fn split_tone(raw: &str) -> (&str, Option<char>) {
    match raw.char_indices().last() {
        Some((i, c)) if ('1'..='5').contains(&c) => (&raw[..i], Some(c)),
        _ => (raw, None),
    }
}
