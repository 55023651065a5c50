use crate::commands::result::{BatchResult, CommandResult, DownloadResult};
use crate::commands::session;
use anyhow::{Context, Result};
use deepword::config::APP_CONFIG;
use std::path::PathBuf;

/// 動画1本をダウンロードする
///
/// 生成中の場合は NotReady エラー（終了コード 4）になる。
pub async fn execute_one(video_id: &str, folder: Option<&str>, from_stdin: bool) -> Result<CommandResult> {
    let ctx = session::open(from_stdin).await?;
    let folder = ctx.user_config.resolve_download_path(folder.unwrap_or("."));

    let path = ctx
        .session
        .download_video_to(video_id, &folder)
        .await
        .with_context(|| format!("Failed to download video {}", video_id))?;

    Ok(CommandResult::Download(DownloadResult {
        video_id: video_id.to_string(),
        path,
    }))
}

/// 生成済みの全動画をダウンロードする
pub async fn execute_all(folder: Option<&str>, from_stdin: bool) -> Result<CommandResult> {
    let ctx = session::open(from_stdin).await?;
    let folder = target_folder(&ctx, folder, &APP_CONFIG.download.videos_dir);

    let report = ctx
        .session
        .download_all_videos(&folder)
        .await
        .context("Failed to download videos")?;

    Ok(CommandResult::DownloadAll(BatchResult { report }))
}

/// 音声サンプルをすべてダウンロードする
pub async fn execute_samples(folder: Option<&str>, from_stdin: bool) -> Result<CommandResult> {
    let ctx = session::open(from_stdin).await?;
    let folder = target_folder(&ctx, folder, &APP_CONFIG.download.audio_samples_dir);

    let report = ctx
        .session
        .download_audio_samples(&folder)
        .await
        .context("Failed to download audio samples")?;

    Ok(CommandResult::Samples(BatchResult { report }))
}

/// ビデオアクターをすべてダウンロードする
pub async fn execute_actors(folder: Option<&str>, from_stdin: bool) -> Result<CommandResult> {
    let ctx = session::open(from_stdin).await?;
    let folder = target_folder(&ctx, folder, &APP_CONFIG.download.video_actors_dir);

    let report = ctx
        .session
        .download_video_actors(&folder)
        .await
        .context("Failed to download video actors")?;

    Ok(CommandResult::Actors(BatchResult { report }))
}

fn target_folder(ctx: &session::SessionContext, folder: Option<&str>, default: &str) -> PathBuf {
    ctx.user_config.resolve_download_path(folder.unwrap_or(default))
}
