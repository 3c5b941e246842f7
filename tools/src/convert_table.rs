use anyhow::{bail, Context, Result};
use namedex_pinyin::{LoadStats, PinyinTable};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub stats: LoadStats,
    pub polyphones: usize,
    pub missing: Vec<char>,
}

/// Parse a reading resource, check that every character in `required` has a
/// reading, and optionally write the compiled table.
pub fn run(input: &Path, required: &str, out: Option<&Path>) -> Result<Report> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("read {}", input.display()))?;
    let (table, stats) = PinyinTable::parse_with_stats(&content)
        .with_context(|| format!("parse {}", input.display()))?;

    let missing = missing_chars(&table, required);
    let report = Report {
        stats,
        polyphones: table.polyphone_count(),
        missing,
    };

    if let Some(out) = out {
        if !report.missing.is_empty() {
            bail!(
                "refusing to write {}: {} required characters have no reading",
                out.display(),
                report.missing.len()
            );
        }
        table
            .save_bincode(out)
            .with_context(|| format!("write {}", out.display()))?;
        // Reload to verify the artifact.
        let reloaded = PinyinTable::load_bincode(out)?;
        if reloaded != table {
            bail!("compiled table at {} does not match its source", out.display());
        }
    }
    Ok(report)
}

fn missing_chars(table: &PinyinTable, required: &str) -> Vec<char> {
    let mut missing: Vec<char> = required
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter(|&c| table.readings(c).is_empty())
        .collect();
    missing.sort_unstable();
    missing.dedup();
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("convert_pinyin_table_{}_{}", std::process::id(), name))
    }

    #[test]
    fn reports_and_writes_table() {
        let input = temp("in.txt");
        let out = temp("out.bin");
        std::fs::write(&input, "91CD (zhong4,chong2)\n4E28 (none0)\n5E86 (qing4)\n").unwrap();

        let report = run(&input, "重庆", Some(&out)).unwrap();
        assert_eq!(report.stats.entries, 2);
        assert_eq!(report.stats.skipped, 1);
        assert_eq!(report.polyphones, 1);
        assert!(report.missing.is_empty());
        assert_eq!(PinyinTable::load_bincode(&out).unwrap().len(), 2);

        let _ = std::fs::remove_file(input);
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn missing_required_characters_block_output() {
        let input = temp("missing.txt");
        let out = temp("missing.bin");
        std::fs::write(&input, "91CD (zhong4,chong2)\n").unwrap();

        let report = run(&input, "重 庆庆", None).unwrap();
        assert_eq!(report.missing, vec!['庆']);
        assert!(run(&input, "重庆", Some(&out)).is_err());
        assert!(!out.exists());

        let _ = std::fs::remove_file(input);
    }
}
