// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Offline tooling for maintaining the emulator's built-in ROM database.
//!
//! Two jobs live here: identifying ROM files in a collection by content hash
//! ([rom]), and converting the community program database into the
//! source-literal table the emulator embeds ([db]). The interesting part is
//! the quirk normalizer in [db::quirks], which maps the external per-program
//! quirk flags onto our variant/option model.

pub mod db;
pub mod error;
pub mod rom;

/// Common imports for the database tools
pub mod prelude {
    pub use crate::db::{self, NormalizedOptions, ProgramRecord, QuirkDefaults, Variant};
    pub use crate::error::{Error, Result};
    pub use crate::rom::{RomGroup, RomIndex};
}
