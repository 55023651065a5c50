//! DeepWord API クライアント
//!
//! - `auth`: API キー／シークレットキーと認証ヘッダー
//! - `client`: HTTP 送受信、通信設定、ストリーミング書き込み
//! - `session`: 認証済みセッションと各リモート操作
//! - `types`: リクエスト／レスポンス型

pub mod auth;
pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use auth::Credentials;
pub use client::TransportConfig;
pub use error::ApiError;
pub use session::{DeepWordSession, DownloadReport};
pub use types::VideoRecord;
