//! Snapshot file storage.
//!
//! Saves go to a sibling temp file that is then renamed over the snapshot,
//! so a crash mid-write never leaves a truncated save behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use homestead_core::{FarmState, snapshot};
use tracing::debug;

use crate::error::EngineError;

/// Read the snapshot at `path`. A missing file is not an error.
pub fn read_snapshot(path: &Path) -> Result<Option<String>, EngineError> {
    match std::fs::read_to_string(path) {
        Ok(json) => Ok(Some(json)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(EngineError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write the farm to `path` atomically.
pub fn write_snapshot(path: &Path, state: &FarmState) -> Result<(), EngineError> {
    let json = snapshot::encode(state)?;
    let temp = temp_path(path);
    std::fs::write(&temp, json).map_err(|source| EngineError::Io {
        path: temp.clone(),
        source,
    })?;
    std::fs::rename(&temp, path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), total_days = state.calendar.total_days(), "Snapshot saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestead_types::{GameMode, Season};

    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "homestead_persist_{tag}_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = scratch_dir("missing");
        assert_eq!(read_snapshot(&dir.join("absent.json")).unwrap(), None);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn write_then_read_restores_the_farm() {
        let dir = scratch_dir("round");
        let path = dir.join("save.json");
        let mut farm = FarmState::new_game("Disk", GameMode::Normal, Season::Summer, 0);
        farm.money = 4_321;

        write_snapshot(&path, &farm).unwrap();
        assert!(!temp_path(&path).exists());

        let json = read_snapshot(&path).unwrap().unwrap();
        assert_eq!(snapshot::decode(&json).unwrap(), farm);

        farm.money = 1;
        write_snapshot(&path, &farm).unwrap();
        let json = read_snapshot(&path).unwrap().unwrap();
        assert_eq!(snapshot::decode(&json).unwrap().money, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn temp_file_sits_next_to_the_snapshot() {
        assert_eq!(
            temp_path(Path::new("saves/farm.json")),
            PathBuf::from("saves/farm.json.tmp")
        );
    }
}
