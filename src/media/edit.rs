/// 動画・音声の切り出しと形式変換（ffmpeg）
///
/// どの関数も元ファイルは変更せず、出力先を上書きする。
use crate::domain::error::DomainError;
use crate::domain::validator::{media_format, validate_input_file};
use crate::media::error::MediaError;
use crate::media::tool::MediaTools;
use std::ffi::OsString;
use std::path::Path;

fn check_range(start: u64, end: u64) -> Result<(), DomainError> {
    if end <= start {
        return Err(DomainError::InvalidRange { start, end });
    }
    Ok(())
}

/// パスはバイト列のまま渡す（UTF-8 でない名前も壊さない）
fn path_arg(path: &Path) -> OsString {
    path.as_os_str().to_os_string()
}

/// trim_video の ffmpeg 引数（ストリームコピー）
pub fn trim_video_args(video: &Path, start: u64, end: u64, outfile: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-ss".into(),
        start.to_string().into(),
        "-i".into(),
        path_arg(video),
        "-t".into(),
        (end - start).to_string().into(),
        "-map".into(),
        "0".into(),
        "-vcodec".into(),
        "copy".into(),
        "-acodec".into(),
        "copy".into(),
        path_arg(outfile),
    ]
}

/// trim_audio の ffmpeg 引数（出力拡張子の形式で再エンコード）
pub fn trim_audio_args(audio: &Path, start: u64, end: u64, outfile: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        path_arg(audio),
        "-ss".into(),
        start.to_string().into(),
        "-to".into(),
        end.to_string().into(),
        path_arg(outfile),
    ]
}

/// 動画を start 秒から end 秒まで切り出して outfile に書き込む
pub fn trim_video(
    video: impl AsRef<Path>,
    start: u64,
    end: u64,
    outfile: impl AsRef<Path>,
) -> Result<(), MediaError> {
    trim_video_with(&MediaTools::default(), video.as_ref(), start, end, outfile.as_ref())
}

pub fn trim_video_with(
    tools: &MediaTools,
    video: &Path,
    start: u64,
    end: u64,
    outfile: &Path,
) -> Result<(), MediaError> {
    validate_input_file(video)?;
    check_range(start, end)?;

    tools.run_ffmpeg(trim_video_args(video, start, end, outfile))?;
    tracing::info!(source = %video.display(), output = %outfile.display(), "trimmed video");
    Ok(())
}

/// 音声を start 秒から end 秒まで切り出して outfile に書き込む
pub fn trim_audio(
    audio: impl AsRef<Path>,
    start: u64,
    end: u64,
    outfile: impl AsRef<Path>,
) -> Result<(), MediaError> {
    trim_audio_with(&MediaTools::default(), audio.as_ref(), start, end, outfile.as_ref())
}

pub fn trim_audio_with(
    tools: &MediaTools,
    audio: &Path,
    start: u64,
    end: u64,
    outfile: &Path,
) -> Result<(), MediaError> {
    validate_input_file(audio)?;
    check_range(start, end)?;
    media_format(outfile)?;

    tools.run_ffmpeg(trim_audio_args(audio, start, end, outfile))?;
    tracing::info!(source = %audio.display(), output = %outfile.display(), "trimmed audio");
    Ok(())
}

/// 音声ファイルの形式を変換する（形式は両方の拡張子から推定）
pub fn change_audio_format(audio: impl AsRef<Path>, outfile: impl AsRef<Path>) -> Result<(), MediaError> {
    change_audio_format_with(&MediaTools::default(), audio.as_ref(), outfile.as_ref())
}

pub fn change_audio_format_with(tools: &MediaTools, audio: &Path, outfile: &Path) -> Result<(), MediaError> {
    validate_input_file(audio)?;
    let from = media_format(audio)?;
    let to = media_format(outfile)?;

    tools.run_ffmpeg([OsString::from("-y"), OsString::from("-i"), path_arg(audio), path_arg(outfile)])?;
    tracing::info!(%from, %to, output = %outfile.display(), "converted audio");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn missing_tools() -> MediaTools {
        MediaTools {
            ffmpeg: "deepword-no-such-ffmpeg".to_string(),
            ffprobe: "deepword-no-such-ffprobe".to_string(),
        }
    }

    #[test]
    fn test_trim_video_args() {
        let args = trim_video_args(Path::new("in.mp4"), 5, 12, Path::new("out.mp4"));
        assert_eq!(
            args,
            vec![
                "-y", "-ss", "5", "-i", "in.mp4", "-t", "7", "-map", "0", "-vcodec", "copy",
                "-acodec", "copy", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_trim_audio_args() {
        let args = trim_audio_args(Path::new("in.wav"), 1, 3, Path::new("out.mp3"));
        assert_eq!(args, vec!["-y", "-i", "in.wav", "-ss", "1", "-to", "3", "out.mp3"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_passed_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"clip-\xff.wav");
        let args = trim_audio_args(Path::new(raw), 0, 1, Path::new("out.mp3"));
        assert_eq!(args[2].as_os_str(), raw);
    }

    #[test]
    fn test_invalid_range_rejected_before_tool() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("in.mp4");
        fs::write(&src, b"x").unwrap();

        let err = trim_video_with(&missing_tools(), &src, 10, 10, &temp_dir.path().join("o.mp4"))
            .unwrap_err();
        assert!(matches!(
            err,
            MediaError::InvalidArgument(DomainError::InvalidRange { start: 10, end: 10 })
        ));
    }

    #[test]
    fn test_missing_source_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = change_audio_format_with(
            &missing_tools(),
            &temp_dir.path().join("nope.wav"),
            &temp_dir.path().join("out.mp3"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MediaError::InvalidArgument(DomainError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_output_extension_required() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("in.wav");
        fs::write(&src, b"x").unwrap();

        let err = change_audio_format_with(&missing_tools(), &src, &temp_dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(
            err,
            MediaError::InvalidArgument(DomainError::MissingExtension { .. })
        ));
    }

    #[test]
    fn test_missing_tool_reported() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("in.wav");
        fs::write(&src, b"x").unwrap();

        let err = trim_audio_with(&missing_tools(), &src, 0, 1, &temp_dir.path().join("o.mp3"))
            .unwrap_err();
        assert!(matches!(err, MediaError::ToolNotFound { .. }));
    }
}
