use crate::commands::result::{CommandResult, CreditsResult};
use crate::commands::session;
use anyhow::{Context, Result};

/// クレジットコマンドを実行する
///
/// アカウントに残っているクレジット数を取得します。
pub async fn execute(from_stdin: bool) -> Result<CommandResult> {
    let ctx = session::open(from_stdin).await?;

    let available_credits = ctx
        .session
        .available_credits()
        .await
        .context("Failed to fetch available credits")?;

    Ok(CommandResult::Credits(CreditsResult { available_credits }))
}
