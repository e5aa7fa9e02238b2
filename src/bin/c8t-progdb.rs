// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Converts the community program database into generated ROM table lines.
//!
//! Reads a JSON array of program records and prints one `entry!(..)` line per
//! record that has been matched to a ROM hash. A bad record (unknown
//! platform, unknown option, unknown color) aborts the batch unless
//! `--keep-going` is given, in which case every failure is reported and the
//! exit status says so.

use c8tools::{db, error::Result};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Program database JSON file", free, required)]
    pub file: PathBuf,
    #[options(
        short = "k",
        help = "Report failing records and continue instead of aborting the batch"
    )]
    pub keep_going: bool,
}

fn main() {
    let options = Arguments::parse_args_default_or_exit();
    match run(&options) {
        Ok(0) => {}
        Ok(failures) => {
            eprintln!("{}", format_args!("{failures} records failed").bold().red());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e.bold().red());
            std::process::exit(1);
        }
    }
}

fn run(options: &Arguments) -> Result<usize> {
    let records = db::load_records(&options.file)?;
    let mut failures = 0;
    for record in &records {
        match db::table_line(record) {
            Ok(Some(line)) => println!("{line}"),
            // no sha1 yet, nothing to emit
            Ok(None) => {}
            Err(e) => {
                eprintln!("{}: {}", record.file.bold(), e.red());
                failures += 1;
                if !options.keep_going {
                    break;
                }
            }
        }
    }
    Ok(failures)
}
