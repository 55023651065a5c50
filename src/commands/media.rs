/// ローカルメディアコマンド
///
/// 認証もネットワークも使わず、ffmpeg / ffprobe に処理を委譲する。
use crate::commands::result::{CommandResult, FpsResult, MediaFileResult, ResolutionResult, TimeResult};
use anyhow::{Context, Result};
use deepword::media;
use std::path::PathBuf;

/// trim-video の出力ファイル名の既定値
pub const DEFAULT_TRIMMED_VIDEO: &str = "trimmed_video.mp4";
/// trim-audio の出力ファイル名の既定値
pub const DEFAULT_TRIMMED_AUDIO: &str = "trimmed_audio.mp3";

/// 秒数指定（"90" でも "00:01:30" でも可）を秒に変換する
pub fn parse_seconds(value: &str) -> Result<u64> {
    if value.contains(':') {
        return media::to_secs(value).with_context(|| format!("Invalid time '{}'", value));
    }
    value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid seconds '{}'. Use whole seconds or hh:mm:ss.", value))
}

pub fn trim_video(video: &str, start: &str, end: &str, outfile: Option<&str>) -> Result<CommandResult> {
    let output = outfile.unwrap_or(DEFAULT_TRIMMED_VIDEO);
    media::trim_video(video, parse_seconds(start)?, parse_seconds(end)?, output)
        .context("Failed to trim video")?;

    Ok(CommandResult::TrimVideo(MediaFileResult {
        source: PathBuf::from(video),
        output: PathBuf::from(output),
    }))
}

pub fn trim_audio(audio: &str, start: &str, end: &str, outfile: Option<&str>) -> Result<CommandResult> {
    let output = outfile.unwrap_or(DEFAULT_TRIMMED_AUDIO);
    media::trim_audio(audio, parse_seconds(start)?, parse_seconds(end)?, output)
        .context("Failed to trim audio")?;

    Ok(CommandResult::TrimAudio(MediaFileResult {
        source: PathBuf::from(audio),
        output: PathBuf::from(output),
    }))
}

pub fn convert_audio(audio: &str, outfile: &str) -> Result<CommandResult> {
    media::change_audio_format(audio, outfile).context("Failed to convert audio")?;

    Ok(CommandResult::ConvertAudio(MediaFileResult {
        source: PathBuf::from(audio),
        output: PathBuf::from(outfile),
    }))
}

pub fn resolution(video: &str) -> Result<CommandResult> {
    let resolution = media::check_resolution(video).context("Failed to read video resolution")?;

    Ok(CommandResult::Resolution(ResolutionResult {
        path: PathBuf::from(video),
        resolution,
    }))
}

pub fn fps(video: &str) -> Result<CommandResult> {
    let fps = media::check_fps(video).context("Failed to read video frame rate")?;

    Ok(CommandResult::Fps(FpsResult {
        path: PathBuf::from(video),
        fps,
    }))
}

/// 秒数を hh:mm:ss に変換する
pub fn to_hhmmss(value: &str) -> Result<CommandResult> {
    let seconds: i64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid seconds '{}'", value))?;
    let output = media::to_hhmmss(seconds)?;

    Ok(CommandResult::Time(TimeResult {
        input: value.to_string(),
        output,
    }))
}

/// hh:mm:ss を秒数に変換する
pub fn to_secs(value: &str) -> Result<CommandResult> {
    let output = media::to_secs(value)?.to_string();

    Ok(CommandResult::Time(TimeResult {
        input: value.to_string(),
        output,
    }))
}
