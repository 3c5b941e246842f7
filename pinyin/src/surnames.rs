//! Surname readings for common polyphone family names.
//!
//! When a name is known to start with a family name, these readings replace
//! the character's everyday default (单 is `dan` in text but `shan` as a
//! surname).

use phf::phf_map;

static SURNAME_READINGS: phf::Map<char, &'static str> = phf_map! {
    '单' => "shan",
    '曾' => "zeng",
    '仇' => "qiu",
    '解' => "xie",
    '朴' => "piao",
    '区' => "ou",
    '查' => "zha",
    '盖' => "ge",
    '乐' => "yue",
    '覃' => "qin",
    '缪' => "miao",
    '翟' => "zhai",
    '召' => "shao",
    '员' => "yun",
    '藏' => "zang",
    '种' => "chong",
    '秘' => "bi",
    '燕' => "yan",
    '薄' => "bo",
    '牟' => "mou",
    '尉' => "yu",
    '长' => "chang",
    '重' => "chong",
    '沈' => "shen",
    '任' => "ren",
    '冯' => "feng",
    '叶' => "ye",
    '陆' => "lu",
    '贾' => "jia",
    '柏' => "bai",
    '车' => "che",
    '曲' => "qu",
    '华' => "hua",
};

/// Search-format surname reading for `ch`, if it has one.
pub fn surname_reading(ch: char) -> Option<&'static str> {
    SURNAME_READINGS.get(&ch).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_surnames() {
        assert_eq!(surname_reading('单'), Some("shan"));
        assert_eq!(surname_reading('曾'), Some("zeng"));
        assert_eq!(surname_reading('王'), None);
    }
}
