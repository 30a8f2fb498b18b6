pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod fs;
pub mod store;
pub mod testing;

pub mod prelude {
    pub use crate::codec::{DocumentCodec, JsonCodec, YamlCodec};
    pub use crate::config::{StoreConfig, StoreSettings};
    pub use crate::document::{FormDefinition, FormSummary, SavePath};
    pub use crate::error::{FormStoreError, Result};
    pub use crate::fs::{FileAccessor, LocalFileAccessor};
    pub use crate::store::FormStore;
}
