use super::{DocumentCodec, decode_error};
use crate::document::FormDefinition;
use crate::error::CodecError;

/// 基于 serde_yaml 的编解码器
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl DocumentCodec for YamlCodec {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn decode(&self, bytes: &[u8]) -> Result<FormDefinition, CodecError> {
        serde_yaml::from_slice(bytes).map_err(decode_error)
    }

    fn encode(&self, form: &FormDefinition) -> Result<Vec<u8>, CodecError> {
        serde_yaml::to_string(form)
            .map(String::into_bytes)
            .map_err(|e| CodecError::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keeps_extra_fields_in_order() {
        let raw = "identifier: contact\nlabel: Contact\nfields:\n- email\n- phone\nversion: 2\n";
        let form = YamlCodec.decode(raw.as_bytes()).unwrap();

        assert_eq!(form.identifier, "contact");
        assert_eq!(form.label.as_deref(), Some("Contact"));
        let keys: Vec<&str> = form.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["fields", "version"]);

        let encoded = String::from_utf8(YamlCodec.encode(&form).unwrap()).unwrap();
        assert_eq!(encoded, raw);
    }

    #[test]
    fn test_decode_without_label() {
        let form = YamlCodec.decode(b"identifier: bare\n").unwrap();
        assert_eq!(form.label, None);
        assert!(form.extra.is_empty());
    }

    #[test]
    fn test_missing_identifier_is_codec_error() {
        let err = YamlCodec.decode(b"label: nameless\n").unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_codec_error() {
        let err = YamlCodec.decode(b"identifier: [unclosed\n").unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
    }
}
