use std::fmt;
use std::path::PathBuf;

/// 表单存储的统一错误类型
#[derive(Debug)]
pub enum FormStoreError {
    /// 保存目录配置错误
    Config(ConfigError),
    /// 持久化标识没有对应的文件
    NotFound { identifier: String, path: PathBuf },
    /// 编解码错误
    Codec(CodecError),
    /// IO 错误
    Io(std::io::Error),
    /// 持久化标识不合法（为空或包含路径分隔符）
    InvalidIdentifier(String),
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 显式配置了 savePaths，但内容为空
    EmptySavePaths,
    /// 没有任何可用的保存目录
    NoSavePaths,
    /// 所有保存目录都被禁用
    NoEnabledSavePath,
    /// 启用的保存目录在使用时不存在
    SavePathMissing(PathBuf),
    /// 配置文件未找到
    FileNotFound(String),
    /// 配置解析失败
    ParseFailed(String),
}

/// 编解码错误
#[derive(Debug)]
pub enum CodecError {
    /// 存储内容无法解析
    Decode {
        path: Option<PathBuf>,
        message: String,
    },
    /// 文档无法序列化
    Encode(String),
}

impl FormStoreError {
    /// 稳定的错误码，供 CLI 输出使用
    pub fn code(&self) -> &'static str {
        match self {
            FormStoreError::Config(_) => "E_CONFIG",
            FormStoreError::NotFound { .. } => "E_NOT_FOUND",
            FormStoreError::Codec(_) => "E_CODEC",
            FormStoreError::Io(_) => "E_IO",
            FormStoreError::InvalidIdentifier(_) => "E_INVALID_ID",
        }
    }
}

impl CodecError {
    /// 为解码错误补上出错文件的路径
    pub fn at(self, path: impl Into<PathBuf>) -> Self {
        match self {
            CodecError::Decode { message, .. } => CodecError::Decode {
                path: Some(path.into()),
                message,
            },
            other => other,
        }
    }
}

// 实现 Display trait
impl fmt::Display for FormStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormStoreError::Config(e) => write!(f, "Config Error: {}", e),
            FormStoreError::NotFound { identifier, path } => write!(
                f,
                "Form '{}' not found (looked for {})",
                identifier,
                path.display()
            ),
            FormStoreError::Codec(e) => write!(f, "Codec Error: {}", e),
            FormStoreError::Io(e) => write!(f, "IO Error: {}", e),
            FormStoreError::InvalidIdentifier(id) => {
                write!(f, "Invalid persistence identifier: '{}'", id)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptySavePaths => write!(f, "savePaths is configured but empty"),
            ConfigError::NoSavePaths => write!(f, "No save paths configured"),
            ConfigError::NoEnabledSavePath => write!(f, "No enabled save path"),
            ConfigError::SavePathMissing(path) => {
                write!(f, "Save path '{}' is not a directory", path.display())
            }
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse config: {}", msg),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Decode {
                path: Some(path),
                message,
            } => write!(f, "Failed to decode {}: {}", path.display(), message),
            CodecError::Decode {
                path: None,
                message,
            } => write!(f, "Failed to decode document: {}", message),
            CodecError::Encode(msg) => write!(f, "Failed to encode document: {}", msg),
        }
    }
}

// 实现 std::error::Error trait
impl std::error::Error for FormStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormStoreError::Io(e) => Some(e),
            FormStoreError::Config(e) => Some(e),
            FormStoreError::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for CodecError {}

// From 转换实现
impl From<std::io::Error> for FormStoreError {
    fn from(err: std::io::Error) -> Self {
        FormStoreError::Io(err)
    }
}

impl From<ConfigError> for FormStoreError {
    fn from(err: ConfigError) -> Self {
        FormStoreError::Config(err)
    }
}

impl From<CodecError> for FormStoreError {
    fn from(err: CodecError) -> Self {
        FormStoreError::Codec(err)
    }
}

// 便捷的 Result 类型别名
pub type Result<T> = std::result::Result<T, FormStoreError>;
