// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Scans a ROM collection and reports every distinct file by content hash

use c8tools::{error::Result, rom::RomIndex};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Root directory of the ROM collection", free, required)]
    pub root: PathBuf,
}

fn main() {
    let options = Arguments::parse_args_default_or_exit();
    if let Err(e) = run(&options) {
        eprintln!("{}", e.bold().red());
        std::process::exit(1);
    }
}

fn run(options: &Arguments) -> Result<()> {
    let index = RomIndex::scan(&options.root)?;
    for (digest, group) in index.groups() {
        println!("{digest} {:?}", group.types);
        for name in &group.names {
            println!("     {}", name.display());
        }
    }
    println!(
        "Found {} unique files with {} of them typed",
        index.len(),
        index.typed()
    );
    Ok(())
}
