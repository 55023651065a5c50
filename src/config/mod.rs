/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - ビルド時に埋め込まれる静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる上書き設定（認証情報は含まない）
///
/// # 使用例
///
/// ```rust,no_run
/// use deepword::config::{APP_CONFIG, UserConfig};
///
/// let chunk_size = APP_CONFIG.download.chunk_size;
/// let user_config = UserConfig::load()?;
/// let endpoint = user_config.effective_endpoint();
/// # Ok::<(), deepword::config::error::ConfigError>(())
/// ```
pub mod app;
pub mod error;
pub mod user;

pub use app::APP_CONFIG;
pub use user::UserConfig;
