use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use namedex_pinyin::{ContactIndex, PersonEntry, PinyinIndexConfig, Searchable};
use serde::Serialize;

/// Build a pinyin search index over a list of names and query it.
///
/// Input lines are `id<TAB>name[<TAB>sub]`; a line without tabs is a bare
/// name and gets its line number as id.
#[derive(Parser)]
#[command(name = "namedex-pinyin")]
struct Args {
    /// Input file (stdin if omitted)
    #[arg(long)]
    input: Option<PathBuf>,

    /// TOML configuration (PinyinIndexConfig)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reading table overriding the bundled one (`.bin` for a compiled table)
    #[arg(long)]
    resource: Option<PathBuf>,

    /// Treat the first character of every name as a family name
    #[arg(long)]
    surname_hints: bool,

    /// Print only records matching this query, with highlight ranges
    #[arg(long)]
    query: Option<String>,

    /// Print alphabetical sections instead of records
    #[arg(long)]
    sections: bool,

    /// Print the readings of each character of this text and exit
    #[arg(long)]
    readings: Option<String>,
}

#[derive(Serialize)]
struct SectionOut<'a> {
    title: &'a str,
    ids: Vec<&'a str>,
}

#[derive(Serialize)]
struct HitOut<'a> {
    id: &'a str,
    name: &'a str,
    kind: namedex_pinyin::MatchKind,
    highlight: std::ops::Range<usize>,
    highlighted: String,
    alternate: bool,
}

fn parse_line(lineno: usize, line: &str) -> Option<PersonEntry> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    let mut parts = line.split('\t');
    let entry = match (parts.next(), parts.next(), parts.next()) {
        (Some(id), Some(name), sub) => PersonEntry {
            sub: sub.filter(|s| !s.is_empty()).map(str::to_string),
            ..PersonEntry::new(id.trim(), name.trim())
        },
        (Some(name), None, _) => PersonEntry::new(lineno.to_string(), name.trim()),
        _ => return None,
    };
    Some(entry)
}

fn read_entries(input: Option<&PathBuf>) -> Result<Vec<PersonEntry>> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.context("read input")?;
        if let Some(entry) = parse_line(i + 1, &line) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Wrap the highlighted characters of `name` in brackets.
fn mark(name: &str, range: &std::ops::Range<usize>) -> String {
    let mut out = String::new();
    for (i, ch) in name.chars().enumerate() {
        if i == range.start {
            out.push('[');
        }
        out.push(ch);
        if i + 1 == range.end {
            out.push(']');
        }
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PinyinIndexConfig::load_toml(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => PinyinIndexConfig::default(),
    };
    if args.resource.is_some() {
        config.resource_path = args.resource.clone();
    }
    config.surname_hints |= args.surname_hints;

    let mut index = ContactIndex::new(config).context("initialize pinyin table")?;

    if let Some(text) = &args.readings {
        let format = index.config().output_format;
        let transliterator = index.transliterator();
        for ch in text.chars() {
            let readings = transliterator.readings_for(ch, &format);
            if readings.is_empty() {
                println!("{}\t-", ch);
            } else {
                println!("{}\t{}", ch, readings.join(","));
            }
        }
        return Ok(());
    }

    let entries = read_entries(args.input.as_ref())?;
    index.extend(&entries).context("build records")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.sections {
        let sections = index.sections();
        let rendered: Vec<SectionOut<'_>> = sections
            .iter()
            .map(|s| SectionOut {
                title: &s.title,
                ids: s.items.iter().map(|r| r.id()).collect(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut out, &rendered)?;
        writeln!(out)?;
        return Ok(());
    }

    match &args.query {
        Some(query) => {
            let hits = index.search(query);
            let records = index.records();
            let rendered: Vec<HitOut<'_>> = hits
                .iter()
                .map(|hit| {
                    let record = &records[hit.index];
                    HitOut {
                        id: record.id(),
                        name: record.display_name(),
                        kind: hit.result.kind,
                        highlight: hit.result.highlight.clone(),
                        highlighted: mark(record.name(), &hit.result.highlight),
                        alternate: hit.result.alternate,
                    }
                })
                .collect();
            serde_json::to_writer_pretty(&mut out, &rendered)?;
        }
        None => serde_json::to_writer_pretty(&mut out, index.records())?,
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tabbed_and_bare_lines() {
        let e = parse_line(1, "42\t王鹏飞\tdesign").unwrap();
        assert_eq!(e.id, "42");
        assert_eq!(e.name, "王鹏飞");
        assert_eq!(e.sub.as_deref(), Some("design"));

        let e = parse_line(3, "李四").unwrap();
        assert_eq!(e.id, "3");
        assert!(e.sub.is_none());

        assert!(parse_line(4, "   ").is_none());
    }

    #[test]
    fn marks_highlight() {
        assert_eq!(mark("王鹏飞", &(1..3)), "王[鹏飞]");
        assert_eq!(mark("重庆", &(0..1)), "[重]庆");
    }
}
