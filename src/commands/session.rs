/// 認証済みセッションの準備
///
/// ネットワークを使うコマンドが共通で使う。ユーザー設定から通信設定を組み立て、
/// 認証情報を取得してセッションを作成する（ここで1回検証リクエストが飛ぶ）。
use crate::presentation::input;
use anyhow::{Context, Result};
use deepword::config::UserConfig;
use deepword::{DeepWordSession, TransportConfig};

/// コマンド実行に必要なセッションと設定
pub struct SessionContext {
    pub session: DeepWordSession,
    pub user_config: UserConfig,
}

/// ユーザー設定から通信設定を作成
pub fn transport_from(user_config: &UserConfig) -> TransportConfig {
    TransportConfig::new(user_config.effective_endpoint())
        .with_accept_invalid_certs(user_config.effective_accept_invalid_certs())
}

/// セッションを開く
pub async fn open(from_stdin: bool) -> Result<SessionContext> {
    let user_config = UserConfig::load()
        .context("Failed to load user configuration. Please check your config.toml file.")?;

    let credentials = input::read_credentials(from_stdin)?;

    let session = DeepWordSession::connect(credentials, transport_from(&user_config))
        .await
        .context("Failed to log in to DeepWord")?;

    Ok(SessionContext {
        session,
        user_config,
    })
}
