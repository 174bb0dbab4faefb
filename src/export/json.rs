//! JSON export/import of drill progress (selection and review stats).
//! Imports go through the same tolerant decoder as the saved checkpoint.

use crate::database::db::Result;
use crate::models::SavedState;
use log::info;
use std::fs;
use std::io;
use std::path::Path;

/// Writes `state` as pretty-printed JSON to `path`.
pub fn export_progress_to_path(state: &SavedState, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(state)?;
    fs::write(path, json_string)?;
    info!(
        "Exported {} review entries to {:?}",
        state.review_stats.len(),
        path
    );
    Ok(())
}

/// Reads progress previously written by [`export_progress_to_path`].
/// Fails if the file is missing or is not a JSON object.
pub fn import_progress(path: &Path) -> Result<SavedState> {
    let contents = fs::read_to_string(path)?;

    // Surface syntax errors to the caller instead of silently importing defaults
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    let state = SavedState::from_value(&value).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            "progress file must contain a JSON object",
        )
    })?;

    info!(
        "Imported {} review entries from {:?}",
        state.review_stats.len(),
        path
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Operator, ReviewStats};
    use std::collections::BTreeSet;

    fn create_test_state() -> SavedState {
        let mut state = SavedState {
            selected_operands: [2, 4, 8].into_iter().collect(),
            selected_operator: Operator::Divide,
            ..Default::default()
        };
        state.review_stats.insert(
            "8,4,÷".to_string(),
            ReviewStats {
                repetitions: 3,
                interval_days: 15.0,
                ease_factor: 2.7,
                next_review_epoch_ms: 1_700_000_000_000,
            },
        );
        state
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        export_progress_to_path(&create_test_state(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"selectedOperator\": \"÷\""));
        assert!(contents.contains("\"8,4,÷\""));
    }

    #[test]
    fn test_export_and_import_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let original = create_test_state();

        export_progress_to_path(&original, &path).unwrap();
        let imported = import_progress(&path).unwrap();

        assert_eq!(original, imported);
    }

    #[test]
    fn test_import_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.json");
        fs::write(
            &path,
            r#"{ "selectedNumbers": [3], "problemStats": { "3,3,×": { "nextReview": 5 } } }"#,
        )
        .unwrap();

        let state = import_progress(&path).unwrap();
        assert_eq!(state.selected_operands, BTreeSet::from([3]));
        assert_eq!(state.selected_operator, Operator::Multiply);
        assert_eq!(state.review_stats["3,3,×"].next_review_epoch_ms, 5);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_progress(Path::new("nonexistent_progress_xyz123.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(import_progress(&path).is_err());
    }

    #[test]
    fn test_import_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("array.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(import_progress(&path).is_err());
    }
}
