use std::path::{Path, PathBuf};

use form_store::config::StoreSettings;
use form_store::document::SavePath;
use form_store::store::FormStore;
use tempfile::TempDir;

pub fn settings(paths: &[(&Path, bool)]) -> StoreSettings {
    StoreSettings {
        save_paths: Some(
            paths
                .iter()
                .map(|(p, enabled)| SavePath::new(p.to_path_buf(), *enabled))
                .collect(),
        ),
        ..Default::default()
    }
}

pub fn open(paths: &[(&Path, bool)]) -> FormStore {
    FormStore::open(settings(paths)).expect("store should initialize")
}

pub fn dirs(tmp: &TempDir) -> (PathBuf, PathBuf) {
    (tmp.path().join("a"), tmp.path().join("b"))
}
