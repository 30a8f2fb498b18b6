//! 保存目录配置加载
//!
//! 配置分两个作用域：`forms`（表单专用，优先）和 `persistence`（通用兜底）。
//! 只要 `forms` 中出现了 `savePaths`，`persistence` 的 `savePaths` 就整体忽略，
//! 不做合并；`disabledForms` 按同样的规则独立决定。
//!
//! ```yaml
//! forms:
//!   savePaths:
//!     /srv/forms: true
//!     /mnt/legacy: false
//!   disabledForms:
//!     f1: true
//! persistence:
//!   savePaths:
//!     ./data: true
//! defaultSavePath: ./forms
//! ```

use crate::document::SavePath;
use crate::error::{ConfigError, Result};
use crate::fs::expand_tilde;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 配置文件路径的环境变量
pub const CONFIG_ENV: &str = "FORM_STORE_CONFIG";
/// 覆盖默认保存目录的环境变量
pub const DEFAULT_PATH_ENV: &str = "FORM_STORE_DEFAULT_PATH";
const DEFAULT_CONFIG_FILE: &str = "form-store.yaml";

/// 单个作用域的配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeConfig {
    /// 目录 → 是否启用，保持配置中的顺序
    pub save_paths: Option<IndexMap<String, bool>>,
    /// 文档标识 → 是否禁用
    pub disabled_forms: Option<IndexMap<String, bool>>,
}

/// 配置文件的完整结构
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// 表单专用作用域
    pub forms: Option<ScopeConfig>,
    /// 通用兜底作用域
    pub persistence: Option<ScopeConfig>,
    /// 两个作用域都没有 savePaths 时使用的目录
    pub default_save_path: Option<String>,
}

/// 按优先级解析后的设置，交给 [`crate::store::FormStore::new`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSettings {
    /// `None` 表示两个作用域都没有配置；`Some(vec![])` 表示显式配置为空
    pub save_paths: Option<Vec<SavePath>>,
    pub disabled_forms: HashSet<String>,
    pub default_save_path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
        let config: StoreConfig = serde_yaml::from_reader(file)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config = serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(config)
    }

    /// 从环境变量定位配置文件；文件不存在时从空配置开始
    pub fn from_env() -> Result<Self> {
        Self::discover(None)
    }

    /// 显式给出的路径必须存在；否则按 `FORM_STORE_CONFIG` / `./form-store.yaml` 查找，
    /// 找不到时使用空配置。两种情况都会应用 `FORM_STORE_DEFAULT_PATH`。
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();
        Self::discover_with(explicit, |key| std::env::var(key).ok())
    }

    /// 与 [`discover`](Self::discover) 相同，但环境变量通过 `lookup` 读取
    pub fn discover_with(
        explicit: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let path = lookup(CONFIG_ENV).unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
                if Path::new(&path).exists() {
                    Self::load(&path)?
                } else {
                    debug!(path = %path, "配置文件不存在，使用空配置");
                    Self::default()
                }
            }
        };

        if let Some(default_path) = lookup(DEFAULT_PATH_ENV) {
            config.default_save_path = Some(default_path);
        }
        Ok(config)
    }

    /// 应用作用域优先级，得到最终设置
    pub fn settings(&self) -> StoreSettings {
        let save_paths = self
            .pick(|scope| scope.save_paths.as_ref())
            .map(|paths| {
                paths
                    .iter()
                    .map(|(path, enabled)| SavePath::new(expand_tilde(Path::new(path)), *enabled))
                    .collect()
            });

        let disabled_forms = self
            .pick(|scope| scope.disabled_forms.as_ref())
            .map(|forms| {
                forms
                    .iter()
                    .filter(|(_, disabled)| **disabled)
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default();

        StoreSettings {
            save_paths,
            disabled_forms,
            default_save_path: self
                .default_save_path
                .as_deref()
                .map(|p| expand_tilde(Path::new(p))),
        }
    }

    /// `forms` 作用域定义了该项就用它，否则退回 `persistence`
    fn pick<'a, T>(&'a self, field: impl Fn(&'a ScopeConfig) -> Option<&'a T>) -> Option<&'a T> {
        self.forms
            .as_ref()
            .and_then(&field)
            .or_else(|| self.persistence.as_ref().and_then(&field))
    }
}
