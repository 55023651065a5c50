use crate::commands::result::{CommandResult, GenerateResult};
use crate::commands::session;
use anyhow::{Context, Result};
use deepword::domain::validator::validate_input_file;
use std::path::Path;

/// 動画生成コマンドを実行する
///
/// 話している人物の動画と音声をアップロードし、生成ジョブを依頼します。
/// 生成完了は待たないので、`deepword list` で状態を確認してください。
pub async fn execute(
    video: &str,
    audio: &str,
    title: Option<&str>,
    from_stdin: bool,
) -> Result<CommandResult> {
    validate_input_file(Path::new(video)).context("Invalid video file")?;
    validate_input_file(Path::new(audio)).context("Invalid audio file")?;

    let ctx = session::open(from_stdin).await?;

    let response = ctx
        .session
        .generate_video(video, audio, title)
        .await
        .context("Video generation request failed")?;

    Ok(CommandResult::Generate(GenerateResult { response }))
}
