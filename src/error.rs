// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for the database tools

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the database tools.
///
/// The first three variants are data errors in the external program database,
/// and are fatal for the record that carries them.
#[derive(Debug, Error)]
pub enum Error {
    /// A record names a platform outside the external vocabulary
    #[error("platform \"{platform}\" is not a recognized program platform")]
    UnrecognizedPlatform {
        /// The offending platform string
        platform: String,
    },
    /// A record carries an option key with no mapping in our option model
    #[error("option \"{key}\" (= {value}) is not a recognized program option")]
    UnrecognizedOption {
        /// The offending option key
        key: String,
        /// The value it carried
        value: serde_json::Value,
    },
    /// A named color absent from the color table
    #[error("color \"{name}\" is not in the color table")]
    UnresolvableColor {
        /// The offending color name
        name: String,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Error originated in [serde_json]
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Error originated in [walkdir]
    #[error(transparent)]
    WalkError(#[from] walkdir::Error),
}
