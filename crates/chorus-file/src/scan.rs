//! Input-directory scanning and basename pairing

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{FileError, FileResult};

/// Audio extensions accepted as synthesis sources.
const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "aiff", "aif", "mp3", "ogg", "m4a"];

/// One matched source recording and its annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPair {
    /// Shared basename (no extension)
    pub stem: String,
    /// Audio file path
    pub audio: PathBuf,
    /// TextGrid file path
    pub annotation: PathBuf,
}

/// Scan the input directories and pair audio with annotations by basename.
///
/// Unmatched files on either side are logged as warnings and skipped; they
/// never fail the scan. The result is sorted by stem so downstream random
/// file selection is reproducible.
pub fn scan_input_pairs(audio_dir: &Path, annotation_dir: &Path) -> FileResult<Vec<InputPair>> {
    let audio = files_by_stem(audio_dir, AUDIO_EXTENSIONS)?;
    let annotations = files_by_stem(annotation_dir, &["textgrid"])?;

    let mut pairs = Vec::new();
    for (stem, audio_path) in &audio {
        match annotations.get(stem) {
            Some(annotation_path) => pairs.push(InputPair {
                stem: stem.clone(),
                audio: audio_path.clone(),
                annotation: annotation_path.clone(),
            }),
            None => log::warn!("no TextGrid for '{}'; skipping", audio_path.display()),
        }
    }
    for (stem, annotation_path) in &annotations {
        if !audio.contains_key(stem) {
            log::warn!("no audio for '{}'; skipping", annotation_path.display());
        }
    }

    log::info!(
        "found {} input pair(s) in {} / {}",
        pairs.len(),
        audio_dir.display(),
        annotation_dir.display()
    );
    Ok(pairs)
}

/// Map stem -> path for files directly under `dir` with one of `extensions`
/// (case-insensitive). BTreeMap keeps the order deterministic.
fn files_by_stem(dir: &Path, extensions: &[&str]) -> FileResult<BTreeMap<String, PathBuf>> {
    let mut files = BTreeMap::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            FileError::Io(
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            )
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !extensions.contains(&ext.to_lowercase().as_str()) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            files.insert(stem.to_string(), path.to_path_buf());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn pairs_by_basename_and_skips_unmatched() {
        let dir = tempfile::tempdir().unwrap();
        let audio_dir = dir.path().join("wav");
        let grid_dir = dir.path().join("grids");
        fs::create_dir(&audio_dir).unwrap();
        fs::create_dir(&grid_dir).unwrap();

        fs::write(audio_dir.join("a.wav"), b"").unwrap();
        fs::write(audio_dir.join("b.wav"), b"").unwrap();
        fs::write(grid_dir.join("a.TextGrid"), b"").unwrap();
        fs::write(grid_dir.join("c.TextGrid"), b"").unwrap();

        let pairs = scan_input_pairs(&audio_dir, &grid_dir).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].stem, "a");
    }

    #[test]
    fn result_is_sorted_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let audio_dir = dir.path().join("wav");
        let grid_dir = dir.path().join("grids");
        fs::create_dir(&audio_dir).unwrap();
        fs::create_dir(&grid_dir).unwrap();

        for stem in ["zebra", "ant", "mole"] {
            fs::write(audio_dir.join(format!("{stem}.wav")), b"").unwrap();
            fs::write(grid_dir.join(format!("{stem}.TextGrid")), b"").unwrap();
        }

        let pairs = scan_input_pairs(&audio_dir, &grid_dir).unwrap();
        let stems: Vec<&str> = pairs.iter().map(|p| p.stem.as_str()).collect();
        assert_eq!(stems, vec!["ant", "mole", "zebra"]);
    }

    #[test]
    fn non_audio_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let audio_dir = dir.path().join("wav");
        let grid_dir = dir.path().join("grids");
        fs::create_dir(&audio_dir).unwrap();
        fs::create_dir(&grid_dir).unwrap();

        fs::write(audio_dir.join("notes.txt"), b"").unwrap();
        fs::write(grid_dir.join("notes.TextGrid"), b"").unwrap();

        let pairs = scan_input_pairs(&audio_dir, &grid_dir).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let grid_dir = dir.path().join("grids");
        fs::create_dir(&grid_dir).unwrap();
        assert!(scan_input_pairs(&missing, &grid_dir).is_err());
    }
}
