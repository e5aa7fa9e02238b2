// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Selects the interpreter variant a database program targets

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::fmt;

/// The interpreter family a program targets.
///
/// The external database only distinguishes three platforms; the two Super
/// Chip sub-variants are told apart by the program's `shiftQuirks` flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variant {
    /// Cosmac VIP interpreter
    #[default]
    Chip8,
    /// XO-Chip (Octo extended) interpreter
    XoChip,
    /// Super Chip Compatibility profile
    Schipc,
    /// Super Chip 1.1
    Schip11,
}

impl Variant {
    /// Resolves the external platform vocabulary against the program's
    /// options. Absent platform means legacy chip-8.
    pub fn resolve(platform: Option<&str>, options: Option<&Map<String, Value>>) -> Result<Self> {
        Ok(match platform {
            None | Some("chip8") => Variant::Chip8,
            Some("xochip") => Variant::XoChip,
            Some("schip") => {
                // shiftQuirks is what separates SCHIP 1.1 from the
                // compatibility profile
                let shift = options
                    .and_then(|opts| opts.get("shiftQuirks"))
                    .is_some_and(super::quirks::truthy);
                if shift {
                    Variant::Schip11
                } else {
                    Variant::Schipc
                }
            }
            Some(other) => {
                return Err(Error::UnrecognizedPlatform {
                    platform: other.to_string(),
                })
            }
        })
    }
}

impl fmt::Display for Variant {
    /// Renders the tag used in the generated table
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Chip8 => "CHIP_8",
            Variant::XoChip => "XO_CHIP",
            Variant::Schipc => "SCHIPC",
            Variant::Schip11 => "SCHIP_1_1",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(pairs: Value) -> Map<String, Value> {
        pairs.as_object().expect("test options are an object").clone()
    }

    #[test]
    fn absent_platform_is_chip8() {
        assert_eq!(Variant::resolve(None, None).unwrap(), Variant::Chip8);
    }

    #[test]
    fn named_platforms() {
        assert_eq!(Variant::resolve(Some("chip8"), None).unwrap(), Variant::Chip8);
        assert_eq!(Variant::resolve(Some("xochip"), None).unwrap(), Variant::XoChip);
        assert_eq!(Variant::resolve(Some("schip"), None).unwrap(), Variant::Schipc);
    }

    #[test]
    fn shift_quirk_upgrades_schip() {
        let shifty = opts(json!({"shiftQuirks": true}));
        assert_eq!(
            Variant::resolve(Some("schip"), Some(&shifty)).unwrap(),
            Variant::Schip11
        );
        // false stays on the compatibility profile
        let legacy = opts(json!({"shiftQuirks": false}));
        assert_eq!(
            Variant::resolve(Some("schip"), Some(&legacy)).unwrap(),
            Variant::Schipc
        );
        // ...and only schip cares about it at all
        assert_eq!(
            Variant::resolve(Some("chip8"), Some(&shifty)).unwrap(),
            Variant::Chip8
        );
    }

    #[test]
    fn unknown_platform_fails() {
        let err = Variant::resolve(Some("megachip"), None).unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedPlatform { platform } if platform == "megachip"
        ));
    }

    #[test]
    fn display_matches_table_tags() {
        assert_eq!(Variant::Chip8.to_string(), "CHIP_8");
        assert_eq!(Variant::XoChip.to_string(), "XO_CHIP");
        assert_eq!(Variant::Schipc.to_string(), "SCHIPC");
        assert_eq!(Variant::Schip11.to_string(), "SCHIP_1_1");
    }
}
