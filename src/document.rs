//! 表单定义文档与列表摘要

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 单个表单定义
///
/// 存储层只关心 `identifier` 和 `label`，其余顶层字段原样保存在 `extra` 中，
/// 读写时保持原有顺序。
///
/// ```yaml
/// identifier: contact
/// label: "联系表单"
/// fields:
///   - name: email
///     type: text
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// 文档声明的标识，禁用列表按它匹配（而不是文件名）
    pub identifier: String,

    /// 显示名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// 其余内容，对存储层不透明
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FormDefinition {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            label: None,
            extra: IndexMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: serde_yaml::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// 显示名称，未设置 label 时退回 identifier
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.identifier)
    }
}

/// `list_forms` 返回的一条摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    /// 文档声明的标识
    pub identifier: String,
    /// label，缺省为 identifier
    pub name: String,
    /// 文件名（不含扩展名）
    pub persistence_identifier: String,
}

impl FormSummary {
    pub(crate) fn from_definition(form: &FormDefinition, persistence_identifier: String) -> Self {
        Self {
            identifier: form.identifier.clone(),
            name: form.display_name().to_string(),
            persistence_identifier,
        }
    }
}

/// 一个保存目录及其启用状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePath {
    pub path: PathBuf,
    pub enabled: bool,
}

impl SavePath {
    pub fn new(path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            path: path.into(),
            enabled,
        }
    }

    pub fn enabled(path: impl Into<PathBuf>) -> Self {
        Self::new(path, true)
    }

    pub fn disabled(path: impl Into<PathBuf>) -> Self {
        Self::new(path, false)
    }
}
