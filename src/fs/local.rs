use std::io;
use std::path::Path;

use tracing::debug;

use super::{DirEntry, FileAccessor};

/// 基于 `std::fs` 的本地实现，每次调用独立打开和释放句柄
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileAccessor;

impl FileAccessor for LocalFileAccessor {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn list_entries(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            // file_type() 不跟随符号链接，这里用 metadata 跟随
            let is_file = std::fs::metadata(entry.path())
                .map(|m| m.is_file())
                .unwrap_or(false);
            entries.push(DirEntry {
                path: entry.path(),
                is_file,
            });
        }
        debug!(dir = %dir.display(), count = entries.len(), "列出目录");
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}
