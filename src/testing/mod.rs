//! 测试基础设施
//!
//! 在不碰真实磁盘的情况下测试 [`FormStore`](crate::store::FormStore)。
//!
//! | 类型 | 用途 |
//! |------|------|
//! | [`MemoryFileAccessor`] | 内存文件系统：目录枚举顺序固定为插入顺序，可模拟目录被外部删除、写入失败 |
//!
//! # 使用示例
//!
//! ```rust
//! use form_store::codec::YamlCodec;
//! use form_store::config::StoreSettings;
//! use form_store::document::{FormDefinition, SavePath};
//! use form_store::store::FormStore;
//! use form_store::testing::MemoryFileAccessor;
//!
//! # fn main() -> form_store::error::Result<()> {
//! let fs = MemoryFileAccessor::new();
//! let settings = StoreSettings {
//!     save_paths: Some(vec![SavePath::enabled("/forms")]),
//!     ..Default::default()
//! };
//! let store = FormStore::new(settings, Box::new(fs.clone()), Box::new(YamlCodec))?;
//!
//! store.save("contact", &FormDefinition::new("contact"))?;
//! assert!(fs.contains_file("/forms/contact.yaml"));
//! # Ok(())
//! # }
//! ```

mod memory_fs;

pub use memory_fs::MemoryFileAccessor;
