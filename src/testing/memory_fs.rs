use crate::fs::{DirEntry, FileAccessor};
use indexmap::IndexMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

enum Node {
    Dir,
    File(Vec<u8>),
}

#[derive(Default)]
struct State {
    /// 路径 → 节点，保持插入顺序
    nodes: IndexMap<PathBuf, Node>,
    fail_writes: bool,
}

/// 内存文件系统
///
/// clone 出来的实例共享同一份状态，便于把一份交给 store、另一份留在测试里观察。
#[derive(Clone, Default)]
pub struct MemoryFileAccessor {
    state: Arc<Mutex<State>>,
}

impl MemoryFileAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接放入一个文件，自动补齐父目录
    pub fn insert_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            insert_dirs(&mut state, parent);
        }
        state
            .nodes
            .insert(path.to_path_buf(), Node::File(contents.as_ref().to_vec()));
    }

    pub fn insert_dir(&self, path: impl AsRef<Path>) {
        insert_dirs(&mut self.lock(), path.as_ref());
    }

    /// 删除目录及其下所有内容，模拟外部删除
    pub fn remove_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.lock().nodes.retain(|p, _| !p.starts_with(path));
    }

    /// 之后的写入全部返回 PermissionDenied
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn contains_file(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.lock().nodes.get(path.as_ref()), Some(Node::File(_)))
    }

    /// 文件内容（按 UTF-8 解读）
    pub fn file_contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.lock().nodes.get(path.as_ref()) {
            Some(Node::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn insert_dirs(state: &mut State, path: &Path) {
    for ancestor in path.ancestors().collect::<Vec<_>>().into_iter().rev() {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        state
            .nodes
            .entry(ancestor.to_path_buf())
            .or_insert(Node::Dir);
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} 不存在", path.display()),
    )
}

impl FileAccessor for MemoryFileAccessor {
    fn exists(&self, path: &Path) -> bool {
        self.lock().nodes.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.lock().nodes.get(path), Some(Node::Dir))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.lock().nodes.get(path), Some(Node::File(_)))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        if let Some(Node::File(_)) = state.nodes.get(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} 是文件", path.display()),
            ));
        }
        insert_dirs(&mut state, path);
        Ok(())
    }

    fn list_entries(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let state = self.lock();
        if !matches!(state.nodes.get(dir), Some(Node::Dir)) {
            return Err(not_found(dir));
        }
        Ok(state
            .nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .map(|(path, node)| DirEntry {
                path: path.clone(),
                is_file: matches!(node, Node::File(_)),
            })
            .collect())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.lock().nodes.get(path) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            _ => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} 不可写", path.display()),
            ));
        }
        let parent_is_dir = path
            .parent()
            .map(|p| matches!(state.nodes.get(p), Some(Node::Dir)))
            .unwrap_or(false);
        if !parent_is_dir {
            return Err(not_found(path));
        }
        state
            .nodes
            .insert(path.to_path_buf(), Node::File(contents.to_vec()));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        match state.nodes.get(path) {
            Some(Node::File(_)) => {
                state.nodes.shift_remove(path);
                Ok(())
            }
            _ => Err(not_found(path)),
        }
    }
}
