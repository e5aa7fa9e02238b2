// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Translates external quirk flags into the sparse option overrides stored
//! in the generated ROM table.
//!
//! The external database uses positive-sense flags ("this program wants the
//! quirk") while the table stores overrides relative to what each variant
//! already does. [normalize] diffs each flag against the variant's
//! [QuirkDefaults] row and emits an override only on disagreement, so a
//! record that asks for exactly its variant's stock behavior produces an
//! empty mapping.

use super::{color, program::ProgramRecord, variant::Variant};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Implicit defaults for the six behavior quirks, in the external
/// positive-flag sense.
///
/// `true` means the variant normally enables the behavior the flag names
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuirkDefaults {
    /// Shift ops in `8xy`(`6`, `E`) write the result into vX directly
    pub shift: bool,
    /// DMA instructions `Fx55`/`Fx65` leave I unchanged
    pub load_store: bool,
    /// Indexed jump `Bxnn` uses the register in the high nibble, not v0
    pub jump0: bool,
    /// Draw operations wait for the frame boundary
    pub vblank: bool,
    /// Binary ops in `8xy`(`1`, `2`, `3`) reset vF to 0
    pub logic: bool,
    /// Sprites clip at the screen edge instead of wrapping
    pub clip: bool,
}

impl From<Variant> for QuirkDefaults {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Chip8 => QuirkDefaults {
                shift: false,
                load_store: false,
                jump0: false,
                vblank: true,
                logic: true,
                clip: true,
            },
            Variant::XoChip => QuirkDefaults {
                shift: false,
                load_store: false,
                jump0: false,
                vblank: false,
                logic: false,
                clip: false,
            },
            Variant::Schipc => QuirkDefaults {
                shift: false,
                load_store: false,
                jump0: false,
                vblank: false,
                logic: false,
                clip: true,
            },
            Variant::Schip11 => QuirkDefaults {
                shift: true,
                load_store: true,
                jump0: true,
                vblank: false,
                logic: false,
                clip: true,
            },
        }
    }
}

/// The sparse result of normalizing one record: overrides that deviate from
/// the variant's defaults, plus cosmetic settings under `advanced`.
///
/// Absent key means "use the variant default"; present always means
/// "override to this value".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedOptions {
    /// Behavior overrides, in record order
    pub options: Map<String, Value>,
    /// Display/cosmetic settings (font, rotation, palette), in record order
    pub advanced: Map<String, Value>,
}

impl NormalizedOptions {
    /// True if nothing deviates from the variant's defaults
    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.advanced.is_empty()
    }

    /// Renders the combined option object, `advanced` nested last, or [None]
    /// when the mapping is empty (the table line omits the field entirely)
    pub fn to_json(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut combined = self.options.clone();
        if !self.advanced.is_empty() {
            combined.insert("advanced".to_string(), Value::Object(self.advanced.clone()));
        }
        Some(Value::Object(combined).to_string())
    }
}

/// Normalizes one program record into its variant tag and sparse option
/// overrides. Pure: same record in, same pair out.
///
/// Fails on an unrecognized platform, an unrecognized option key, or a color
/// name missing from the table.
pub fn normalize(record: &ProgramRecord) -> Result<(Variant, NormalizedOptions)> {
    let variant = Variant::resolve(record.platform.as_deref(), record.options.as_ref())?;
    let defaults = QuirkDefaults::from(variant);
    let mut norm = NormalizedOptions::default();
    let Some(opts) = &record.options else {
        return Ok((variant, norm));
    };
    for (key, value) in opts {
        match key.as_str() {
            "shiftQuirks" => diff(&mut norm, "optJustShiftVx", value, defaults.shift),
            "loadStoreQuirks" => diff(&mut norm, "optLoadStoreDontIncI", value, defaults.load_store),
            "jumpQuirks" => diff(&mut norm, "optJump0Bxnn", value, defaults.jump0),
            "vBlankQuirks" => diff_inverted(&mut norm, "optInstantDxyn", value, defaults.vblank),
            "logicQuirks" => diff_inverted(&mut norm, "optDontResetVf", value, defaults.logic),
            "clipQuirks" => diff_inverted(&mut norm, "optWrapSprites", value, defaults.clip),
            "tickrate" => {
                norm.options
                    .insert("instructionsPerFrame".to_string(), value.clone());
            }
            "fontStyle" | "screenRotation" => {
                norm.advanced.insert(key.clone(), value.clone());
            }
            "backgroundColor" => put_color(&mut norm, "col0", value)?,
            "fillColor" => put_color(&mut norm, "col1", value)?,
            "fillColor2" => put_color(&mut norm, "col2", value)?,
            "blendColor" => put_color(&mut norm, "col3", value)?,
            "buzzColor" | "quietColor" => put_color(&mut norm, key, value)?,
            // redundant with the resolved variant
            "enableXO" => {}
            // not representable in our option model
            "touchInputMode" | "vfOrderQuirks" => {}
            _ => {
                return Err(Error::UnrecognizedOption {
                    key: key.clone(),
                    value: value.clone(),
                })
            }
        }
    }
    Ok((variant, norm))
}

/// Emits the record's value verbatim when it disagrees with the default
fn diff(norm: &mut NormalizedOptions, key: &str, value: &Value, default: bool) {
    if truthy(value) != default {
        norm.options.insert(key.to_string(), value.clone());
    }
}

/// Emits the *inverted* flag when it disagrees with the default; these target
/// options have the opposite sense of their external flags
fn diff_inverted(norm: &mut NormalizedOptions, key: &str, value: &Value, default: bool) {
    let value = truthy(value);
    if value != default {
        norm.options.insert(key.to_string(), Value::Bool(!value));
    }
}

fn put_color(norm: &mut NormalizedOptions, key: &str, value: &Value) -> Result<()> {
    let Some(name) = value.as_str() else {
        return Err(Error::UnresolvableColor {
            name: value.to_string(),
        });
    };
    norm.advanced
        .insert(key.to_string(), Value::String(color::resolve(name)?));
    Ok(())
}

/// Truthiness of a quirk value; the database mostly stores booleans but the
/// occasional 0/1 shows up
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
