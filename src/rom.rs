// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Finds ROM files in a collection and identifies them by content hash.
//!
//! The database keys programs by SHA-1 of the ROM image, so identification
//! is a recursive walk, a streamed hash per file, and duplicate grouping by
//! digest. Extensions other than plain `.ch8` hint at the intended
//! interpreter and are kept as "type" annotations on the group.

use crate::error::Result;
use sha1::{Digest, Sha1};
use std::{
    collections::BTreeMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// File extensions the collection scanner treats as ROM images
pub const ROM_EXTENSIONS: [&str; 9] = [
    "c8", "c8h", "c8x", "ch10", "ch8", "hc8", "mc8", "sc8", "xo8",
];

/// True if the path carries one of the known ROM extensions
pub fn is_rom(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ROM_EXTENSIONS.contains(&ext))
}

/// Streamed SHA-1 over the file's bytes, as a lowercase hex digest
pub fn sha1_hex(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha1::new();
    let mut buf = [0u8; 65536];
    loop {
        let count = file.read(&mut buf)?;
        if count == 0 {
            break;
        }
        hasher.update(&buf[..count]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// The files sharing one content digest
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RomGroup {
    /// Every path with this digest, in walk order
    pub names: Vec<PathBuf>,
    /// Non-`.ch8` extensions seen for this digest (with the leading dot)
    pub types: Vec<String>,
}

/// Every distinct ROM under a directory root, grouped by SHA-1
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RomIndex {
    roms: BTreeMap<String, RomGroup>,
}

impl RomIndex {
    /// Walks `root` and hashes every file with a ROM extension
    pub fn scan(root: impl AsRef<Path>) -> Result<Self> {
        let mut index = Self::default();
        for entry in WalkDir::new(root) {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_rom(entry.path()) {
                continue;
            }
            index.add(entry.path())?;
        }
        Ok(index)
    }

    /// Hashes one file into the index
    pub fn add(&mut self, path: &Path) -> Result<()> {
        let digest = sha1_hex(path)?;
        let group = self.roms.entry(digest).or_default();
        group.names.push(path.to_path_buf());
        let extension = path.extension().and_then(|ext| ext.to_str());
        if let Some(extension) = extension.filter(|ext| *ext != "ch8") {
            group.types.push(format!(".{extension}"));
        }
        Ok(())
    }

    /// Groups in digest order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &RomGroup)> {
        self.roms.iter().map(|(digest, group)| (digest.as_str(), group))
    }

    /// Number of distinct digests
    pub fn len(&self) -> usize {
        self.roms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roms.is_empty()
    }

    /// Number of digests with at least one type annotation
    pub fn typed(&self) -> usize {
        self.roms.values().filter(|group| !group.types.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn extension_filter() {
        assert!(is_rom(Path::new("games/pong.ch8")));
        assert!(is_rom(Path::new("games/worm.xo8")));
        assert!(!is_rom(Path::new("games/readme.txt")));
        assert!(!is_rom(Path::new("games/pong")));
        // exact match only; the collection uses lowercase extensions
        assert!(!is_rom(Path::new("games/pong.CH8")));
    }

    #[test]
    fn sha1_of_known_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.ch8");
        fs::write(&path, b"abc").unwrap();
        assert_eq!(
            sha1_hex(&path).unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn scan_groups_duplicates_and_tracks_types() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("game.ch8"), b"same bytes").unwrap();
        fs::write(dir.path().join("sub/game.sc8"), b"same bytes").unwrap();
        fs::write(dir.path().join("other.ch8"), b"other bytes").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let index = RomIndex::scan(dir.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.typed(), 1);

        let duplicated = index
            .groups()
            .find(|(_, group)| group.names.len() == 2)
            .expect("the two identical files share a group")
            .1;
        assert_eq!(duplicated.types, vec![".sc8"]);
    }

    #[test]
    fn plain_ch8_is_untyped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("game.ch8"), b"bytes").unwrap();
        let index = RomIndex::scan(dir.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.typed(), 0);
    }
}
