//! 目录与文件访问
//!
//! [`FileAccessor`] 把存储层对文件系统的全部需求收拢成一个接口：
//! 本地实现见 [`LocalFileAccessor`]，测试用的内存实现见
//! [`crate::testing::MemoryFileAccessor`]。

mod local;

pub use local::LocalFileAccessor;

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{FormStoreError, Result};

/// 目录中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    /// 是否为普通文件（目录、符号链接目标等均为 false）
    pub is_file: bool,
}

/// 文件系统访问接口
pub trait FileAccessor: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// 是否为普通文件（目录返回 false）
    fn is_file(&self, path: &Path) -> bool;

    /// 递归创建目录（含父目录）
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// 列出目录下的直接子项，顺序由实现决定
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// 整体覆盖写入
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// 校验持久化标识：只能是单个文件名片段
///
/// 拒绝空串、`.`、`..` 以及任何包含 `/` 或 `\` 的标识，
/// 保证解析出的路径始终直接位于保存目录下。
pub fn validate_identifier(id: &str) -> Result<()> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\'])
        || id.contains('\0');
    if invalid {
        return Err(FormStoreError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

/// 展开 `~/` 前缀
pub fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/")
        && let Some(home) = std::env::var("HOME")
            .ok()
            .or_else(|| std::env::var("USERPROFILE").ok())
    {
        return PathBuf::from(home).join(rest);
    }
    path.to_path_buf()
}

/// 扩展名是否匹配（忽略 ASCII 大小写）
pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("form1").is_ok());
        assert!(validate_identifier("contact-form.v2").is_ok());

        for bad in ["", ".", "..", "a/b", "../escape", "a\\b"] {
            match validate_identifier(bad) {
                Err(FormStoreError::InvalidIdentifier(id)) => assert_eq!(id, bad),
                other => panic!("'{}' 应该被拒绝, 实际: {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_has_extension_ignores_case() {
        assert!(has_extension(Path::new("/a/form.yaml"), "yaml"));
        assert!(has_extension(Path::new("/a/form.YAML"), "yaml"));
        assert!(has_extension(Path::new("/a/form.Yaml"), "yaml"));
        assert!(!has_extension(Path::new("/a/form.yml"), "yaml"));
        assert!(!has_extension(Path::new("/a/form"), "yaml"));
    }

    #[test]
    fn test_expand_tilde_uses_home() {
        let home = std::env::var("HOME")
            .ok()
            .or_else(|| std::env::var("USERPROFILE").ok());
        let expanded = expand_tilde(Path::new("~/forms/contact"));
        match home {
            Some(home) => assert_eq!(expanded, PathBuf::from(home).join("forms/contact")),
            None => assert_eq!(expanded, PathBuf::from("~/forms/contact")),
        }
        // 只展开开头的 `~/`
        assert_eq!(expand_tilde(Path::new("~other/x")), PathBuf::from("~other/x"));
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde(Path::new("/srv/forms")), PathBuf::from("/srv/forms"));
        assert_eq!(expand_tilde(Path::new("forms")), PathBuf::from("forms"));
    }
}
