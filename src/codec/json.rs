use super::{DocumentCodec, decode_error};
use crate::document::FormDefinition;
use crate::error::CodecError;

/// 基于 serde_json 的编解码器，输出带缩进的 JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn extension(&self) -> &str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> Result<FormDefinition, CodecError> {
        serde_json::from_slice(bytes).map_err(decode_error)
    }

    fn encode(&self, form: &FormDefinition) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec_pretty(form).map_err(|e| CodecError::Encode(e.to_string()))
    }
}
