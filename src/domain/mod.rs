//! ドメイン層
//!
//! ネットワークにも外部ツールにも依存しない規則（言語カタログ、入力検証）。

pub mod catalog;
pub mod error;
pub mod validator;

pub use catalog::{LanguageCatalog, Voice};
pub use error::DomainError;
