mod convert_table;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Validate a pinyin reading resource and compile it to a bincode table.
#[derive(Parser)]
struct Args {
    /// Resource in `<hex code point> (<reading>,...)` form
    #[arg(long)]
    input: PathBuf,

    /// Characters that must have a reading (e.g. a surname list)
    #[arg(long, default_value = "")]
    require: String,

    /// Where to write the compiled table
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let report = convert_table::run(&args.input, &args.require, args.out.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(out) = &args.out {
        println!("Wrote compiled table to {}", out.display());
    }
    Ok(())
}
