//! 文档编解码
//!
//! | 类型 | 扩展名 | 说明 |
//! |------|--------|------|
//! | [`YamlCodec`] | `yaml` | 默认格式 |
//! | [`JsonCodec`] | `json` | 便于与其他系统交换 |

mod json;
mod yaml;

pub use json::JsonCodec;
pub use yaml::YamlCodec;

use crate::document::FormDefinition;
use crate::error::CodecError;

/// 文档与字节之间的转换接口
pub trait DocumentCodec: Send + Sync {
    /// 规范扩展名（不带点）
    fn extension(&self) -> &str;

    fn decode(&self, bytes: &[u8]) -> Result<FormDefinition, CodecError>;

    fn encode(&self, form: &FormDefinition) -> Result<Vec<u8>, CodecError>;
}

fn decode_error(message: impl ToString) -> CodecError {
    CodecError::Decode {
        path: None,
        message: message.to_string(),
    }
}
