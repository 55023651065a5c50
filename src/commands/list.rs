use crate::commands::result::{CommandResult, ListResult};
use crate::commands::session;
use anyhow::{Context, Result};

/// リストコマンドを実行する
///
/// アカウントで生成した動画の一覧を取得します。
/// 生成中の動画も含まれ、status で区別できます。
pub async fn execute(from_stdin: bool) -> Result<CommandResult> {
    let ctx = session::open(from_stdin).await?;

    let videos = ctx
        .session
        .list_videos()
        .await
        .context("Failed to fetch video list")?;
    let total_count = videos.len();

    Ok(CommandResult::List(ListResult {
        videos,
        total_count,
    }))
}
