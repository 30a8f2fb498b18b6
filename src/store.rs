//! 表单定义存储
//!
//! 以持久化标识（文件名去掉扩展名）寻址，文档以 `{id}.{ext}` 的形式直接存放在
//! 某个保存目录下。多个保存目录按配置顺序查找，第一个命中的文件胜出；
//! 都没有时，新文件落在第一个启用的目录。
//!
//! ```rust,no_run
//! use form_store::config::StoreConfig;
//! use form_store::document::FormDefinition;
//! use form_store::store::FormStore;
//!
//! # fn example() -> form_store::error::Result<()> {
//! let store = FormStore::open(StoreConfig::from_env()?.settings())?;
//! store.save("contact", &FormDefinition::new("contact").with_label("联系表单"))?;
//! for form in store.list_forms()? {
//!     println!("{} ({})", form.name, form.persistence_identifier);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! 不做缓存，也没有写入保护：多个写入方同时写同一个标识时，最后一次写入生效；
//! 写到一半崩溃可能留下残缺文件。

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::codec::{DocumentCodec, YamlCodec};
use crate::config::StoreSettings;
use crate::document::{FormDefinition, FormSummary, SavePath};
use crate::error::{ConfigError, FormStoreError, Result};
use crate::fs::{FileAccessor, LocalFileAccessor, has_extension, validate_identifier};

pub struct FormStore {
    save_paths: Vec<SavePath>,
    disabled_forms: HashSet<String>,
    accessor: Box<dyn FileAccessor>,
    codec: Box<dyn DocumentCodec>,
}

impl FormStore {
    /// 本地文件系统 + YAML 编解码
    pub fn open(settings: StoreSettings) -> Result<Self> {
        Self::new(settings, Box::new(LocalFileAccessor), Box::new(YamlCodec))
    }

    /// 初始化：创建所有启用的保存目录
    ///
    /// - `save_paths` 显式为空：配置错误
    /// - `save_paths` 未配置：退回 `default_save_path`（启用并自动创建）
    /// - 两者都没有：以空集合构造，错误推迟到第一次读写
    pub fn new(
        settings: StoreSettings,
        accessor: Box<dyn FileAccessor>,
        codec: Box<dyn DocumentCodec>,
    ) -> Result<Self> {
        let StoreSettings {
            save_paths,
            disabled_forms,
            default_save_path,
        } = settings;

        let save_paths = match save_paths {
            Some(paths) if paths.is_empty() => {
                return Err(ConfigError::EmptySavePaths.into());
            }
            Some(paths) => paths,
            None => match default_save_path {
                Some(default) => {
                    warn!(path = %default.display(), "未配置 savePaths，使用默认保存目录");
                    vec![SavePath::enabled(default)]
                }
                None => Vec::new(),
            },
        };

        for save_path in save_paths.iter().filter(|p| p.enabled) {
            if !accessor.exists(&save_path.path) {
                accessor.create_dir_all(&save_path.path)?;
                info!(path = %save_path.path.display(), "已创建保存目录");
            }
        }

        info!(
            save_paths = save_paths.len(),
            enabled = save_paths.iter().filter(|p| p.enabled).count(),
            disabled_forms = disabled_forms.len(),
            extension = codec.extension(),
            "FormStore 初始化"
        );

        Ok(Self {
            save_paths,
            disabled_forms,
            accessor,
            codec,
        })
    }

    // ── 查询 ──────────────────────────────────────────────────────────────────

    pub fn save_paths(&self) -> &[SavePath] {
        &self.save_paths
    }

    pub fn enabled_save_paths(&self) -> impl Iterator<Item = &Path> {
        self.save_paths
            .iter()
            .filter(|p| p.enabled)
            .map(|p| p.path.as_path())
    }

    pub fn extension(&self) -> &str {
        self.codec.extension()
    }

    /// 按文档声明的 identifier 判断（不是文件名）
    pub fn is_disabled(&self, identifier: &str) -> bool {
        self.disabled_forms.contains(identifier)
    }

    /// 任意启用目录下存在名为 `{id}.{ext}` 的普通文件即为 true
    ///
    /// 不校验目录配置；保存目录为空时直接返回 false。
    pub fn exists(&self, id: &str) -> Result<bool> {
        validate_identifier(id)?;
        let file_name = self.file_name(id);
        Ok(self
            .enabled_save_paths()
            .any(|dir| self.accessor.is_file(&dir.join(&file_name))))
    }

    // ── 读写 ──────────────────────────────────────────────────────────────────

    pub fn load(&self, id: &str) -> Result<FormDefinition> {
        let path = self.resolve_path(id)?;
        if !self.exists(id)? {
            return Err(FormStoreError::NotFound {
                identifier: id.to_string(),
                path,
            });
        }
        self.read_form(&path)
    }

    /// 覆盖写入，不做原子替换
    pub fn save(&self, id: &str, form: &FormDefinition) -> Result<()> {
        let path = self.resolve_path(id)?;
        let bytes = self.codec.encode(form)?;
        self.accessor.write(&path, &bytes)?;
        debug!(id = %id, path = %path.display(), bytes = bytes.len(), "表单已保存");
        Ok(())
    }

    /// 删除解析到的文件，返回文件是否存在
    pub fn delete(&self, id: &str) -> Result<bool> {
        let path = self.resolve_path(id)?;
        if !self.accessor.is_file(&path) {
            return Ok(false);
        }
        self.accessor.remove_file(&path)?;
        debug!(id = %id, path = %path.display(), "表单已删除");
        Ok(true)
    }

    /// 汇总所有启用目录下的表单，过滤掉被禁用的
    ///
    /// 为拿到 identifier 和 label，每个文件都会完整解码一次；任一文件解码失败，
    /// 整个列表失败。
    // TODO: 解码失败时记录 warn 并跳过该文件，而不是让整个列表失败
    pub fn list_forms(&self) -> Result<Vec<FormSummary>> {
        self.assert_save_paths_valid()?;

        let mut forms = Vec::new();
        for dir in self.enabled_save_paths() {
            for entry in self.accessor.list_entries(dir)? {
                if !entry.is_file || !has_extension(&entry.path, self.extension()) {
                    continue;
                }
                let Some(stem) = entry.path.file_stem().and_then(|s| s.to_str()) else {
                    warn!(path = %entry.path.display(), "文件名不是合法 UTF-8，跳过");
                    continue;
                };

                let form = self.read_form(&entry.path)?;
                if self.is_disabled(&form.identifier) {
                    debug!(identifier = %form.identifier, path = %entry.path.display(), "表单已禁用，跳过");
                    continue;
                }
                forms.push(FormSummary::from_definition(&form, stem.to_string()));
            }
        }

        debug!(count = forms.len(), "列出表单");
        Ok(forms)
    }

    // ── 路径解析 ──────────────────────────────────────────────────────────────

    /// 依次查找启用的保存目录，返回第一个已存在的 `{dir}/{id}.{ext}`；
    /// 都不存在时返回第一个启用目录下的候选路径（不保证文件存在）
    pub fn resolve_path(&self, id: &str) -> Result<PathBuf> {
        validate_identifier(id)?;
        self.assert_save_paths_valid()?;

        let file_name = self.file_name(id);
        let mut first_candidate = None;
        for dir in self.enabled_save_paths() {
            let candidate = dir.join(&file_name);
            if self.accessor.is_file(&candidate) {
                debug!(id = %id, path = %candidate.display(), "解析到已有文件");
                return Ok(candidate);
            }
            first_candidate.get_or_insert(candidate);
        }

        first_candidate.ok_or_else(|| ConfigError::NoEnabledSavePath.into())
    }

    /// 每次解析前重新校验：目录可能在初始化之后被外部删除
    fn assert_save_paths_valid(&self) -> Result<()> {
        if self.save_paths.is_empty() {
            return Err(ConfigError::NoSavePaths.into());
        }
        for dir in self.enabled_save_paths() {
            if !self.accessor.is_dir(dir) {
                return Err(ConfigError::SavePathMissing(dir.to_path_buf()).into());
            }
        }
        if self.enabled_save_paths().next().is_none() {
            return Err(ConfigError::NoEnabledSavePath.into());
        }
        Ok(())
    }

    fn file_name(&self, id: &str) -> String {
        format!("{}.{}", id, self.extension())
    }

    fn read_form(&self, path: &Path) -> Result<FormDefinition> {
        let bytes = self.accessor.read(path)?;
        let form = self.codec.decode(&bytes).map_err(|e| e.at(path))?;
        debug!(path = %path.display(), identifier = %form.identifier, "表单已读取");
        Ok(form)
    }
}
