// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Converts the community program database into the generated ROM table.
//!
//! Each input record describes one known program: where its ROM came from,
//! who wrote it, which interpreter family it targets, and any quirk flags it
//! needs. [table_line] turns one record into one `entry!(..)` line for the
//! table the emulator compiles in, keyed by the ROM's SHA-1.

pub mod color;
pub mod program;
pub mod quirks;
pub mod variant;

pub use program::ProgramRecord;
pub use quirks::{normalize, NormalizedOptions, QuirkDefaults};
pub use variant::Variant;

use crate::error::Result;
use std::{fs::File, io::BufReader, path::Path};

/// Loads the program database: a JSON array of [ProgramRecord]
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ProgramRecord>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Formats one generated table line for a record, or [None] if the record has
/// no `sha1` (not yet matched against the ROM collection).
///
/// The options argument is omitted entirely when nothing deviates from the
/// variant's defaults. Records whose label carries no author metadata get the
/// raw filename as a trailing comment, so the table stays greppable.
pub fn table_line(record: &ProgramRecord) -> Result<Option<String>> {
    let Some(sha1) = record.sha1.as_deref() else {
        return Ok(None);
    };
    let (variant, options) = quirks::normalize(record)?;
    let name = record.name();
    let meta = record.metadata();
    let comment = if meta.is_empty() {
        format!("\t\t\t// {}", record.file)
    } else {
        String::new()
    };
    Ok(Some(match options.to_json() {
        Some(json) => {
            // two-hash raw string: resolved colors put `"#` inside the JSON,
            // which would terminate a single-hash one
            format!("entry!(\"{sha1}\", {variant}, \"{name}{meta}\", r##\"{json}\"##),{comment}")
        }
        None => format!("entry!(\"{sha1}\", {variant}, \"{name}{meta}\"),{comment}"),
    }))
}
