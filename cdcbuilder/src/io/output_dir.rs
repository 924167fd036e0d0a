//! Output directory preparation.
//!
//! Generated artifacts from a previous run must not survive into the next
//! one, so every plain file is removed before generation. Build-script
//! fragments (`*.mak`) belong to the surrounding build and are kept.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

/// Extension of files kept across runs. Compared case-sensitively.
pub const RESERVED_EXTENSION: &str = "mak";

/// Whether `path` is preserved by [`clean_output_dir`].
///
/// Matches on the file name suffix rather than [`Path::extension`], which
/// reports no extension for a bare `.mak`.
pub fn is_reserved(path: &Path) -> bool {
    path.file_name().is_some_and(|name| {
        name.to_string_lossy()
            .strip_suffix(RESERVED_EXTENSION)
            .is_some_and(|stem| stem.ends_with('.'))
    })
}

/// Delete every immediate non-directory entry of `dir` except reserved files.
///
/// Subdirectories and their contents are left alone. Returns the removed
/// paths in sorted order. The first failing deletion aborts the cleanup.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn clean_output_dir(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if is_reserved(&path) {
            debug!(path = %path.display(), "keeping build script artifact");
            continue;
        }
        candidates.push(path);
    }
    candidates.sort();

    for path in &candidates {
        debug!(path = %path.display(), "deleting stale output");
        fs::remove_file(path)?;
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_everything_but_reserved_files() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path();
        for name in ["mnobd.cdc", "PI.cs", "XAP.xml", "notes", "cdc.mak", ".mak", "Makefile"] {
            fs::write(dir.join(name), name).expect("write");
        }

        let removed = clean_output_dir(dir).expect("clean");

        let names: Vec<String> = removed
            .iter()
            .map(|path| path.file_name().expect("name").to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Makefile", "PI.cs", "XAP.xml", "mnobd.cdc", "notes"]);
        assert_eq!(fs::read_to_string(dir.join("cdc.mak")).expect("kept"), "cdc.mak");
        assert_eq!(fs::read_to_string(dir.join(".mak")).expect("kept"), ".mak");
        assert_eq!(fs::read_dir(dir).expect("read").count(), 2);
    }

    #[test]
    fn reserved_extension_is_case_sensitive() {
        assert!(is_reserved(Path::new("out/config.mak")));
        assert!(!is_reserved(Path::new("out/config.MAK")));
        assert!(!is_reserved(Path::new("out/mak")));
        assert!(!is_reserved(Path::new("out/config.mak.bak")));
        assert!(!is_reserved(Path::new("out/configmak")));
        assert!(is_reserved(Path::new("out/.mak")));
        assert!(!is_reserved(Path::new("out/.MAK")));
    }

    #[test]
    fn leaves_subdirectories_untouched() {
        let temp = tempfile::tempdir().expect("tempdir");
        let nested = temp.path().join("nested");
        fs::create_dir(&nested).expect("mkdir");
        fs::write(nested.join("old.cdc"), "x").expect("write");

        let removed = clean_output_dir(temp.path()).expect("clean");

        assert!(removed.is_empty());
        assert!(nested.join("old.cdc").exists());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = clean_output_dir(&temp.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
