/// 動画・音声ファイルのメタデータ取得（ffprobe）
///
/// ```text
/// file ──→ build_probe_args ──→ ffprobe -of json ──→ parse_probe_json ──→ ProbeReport
/// ```
use crate::domain::validator::validate_input_file;
use crate::media::error::MediaError;
use crate::media::tool::MediaTools;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::Path;

const FFPROBE: &str = "ffprobe";

/// 動画の解像度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub height: u32,
    pub width: u32,
}

/// ffprobe の JSON 出力（必要な部分のみ）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeReport {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
    #[serde(default)]
    pub format: Option<ProbeFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeStream {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub r_frame_rate: Option<String>,
    pub avg_frame_rate: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeFormat {
    /// 秒（ffprobe は文字列で返す）
    pub duration: Option<String>,
}

impl ProbeStream {
    /// フレームレート（avg を優先し、なければ r を使う）
    pub fn fps(&self) -> Option<f64> {
        self.avg_frame_rate
            .as_deref()
            .and_then(parse_rate)
            .or_else(|| self.r_frame_rate.as_deref().and_then(parse_rate))
    }
}

/// ffprobe の引数を組み立てる
pub fn build_probe_args(path: &Path, video_stream: bool) -> Vec<OsString> {
    let entries: &[&str] = if video_stream {
        &[
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,r_frame_rate,avg_frame_rate",
        ]
    } else {
        &["-show_entries", "format=duration"]
    };

    let mut args: Vec<OsString> = vec!["-v".into(), "error".into()];
    args.extend(entries.iter().map(OsString::from));
    args.push("-of".into());
    args.push("json".into());
    args.push(path.as_os_str().to_os_string());
    args
}

pub fn parse_probe_json(output: &str) -> Result<ProbeReport, MediaError> {
    serde_json::from_str(output).map_err(|_| MediaError::unexpected_output(FFPROBE, output))
}

/// "30000/1001" や "25" をフレームレートに変換する（0/0 は None）
pub fn parse_rate(rate: &str) -> Option<f64> {
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

fn probe_first_video_stream(tools: &MediaTools, video: &Path) -> Result<ProbeStream, MediaError> {
    validate_input_file(video)?;
    let output = tools.run_ffprobe(build_probe_args(video, true))?;
    parse_probe_json(&output)?
        .streams
        .into_iter()
        .next()
        .ok_or_else(|| MediaError::unexpected_output(FFPROBE, output))
}

/// 動画の高さ・幅を取得する
pub fn check_resolution(video: impl AsRef<Path>) -> Result<Resolution, MediaError> {
    check_resolution_with(&MediaTools::default(), video.as_ref())
}

pub fn check_resolution_with(tools: &MediaTools, video: &Path) -> Result<Resolution, MediaError> {
    let stream = probe_first_video_stream(tools, video)?;
    match (stream.height, stream.width) {
        (Some(height), Some(width)) => Ok(Resolution { height, width }),
        _ => Err(MediaError::unexpected_output(FFPROBE, format!("{:?}", stream))),
    }
}

/// 動画のフレームレートを取得する
pub fn check_fps(video: impl AsRef<Path>) -> Result<f64, MediaError> {
    check_fps_with(&MediaTools::default(), video.as_ref())
}

pub fn check_fps_with(tools: &MediaTools, video: &Path) -> Result<f64, MediaError> {
    let stream = probe_first_video_stream(tools, video)?;
    stream
        .fps()
        .ok_or_else(|| MediaError::unexpected_output(FFPROBE, format!("{:?}", stream)))
}

/// コンテナの長さ（秒）を取得する
pub fn probe_duration(path: impl AsRef<Path>) -> Result<f64, MediaError> {
    probe_duration_with(&MediaTools::default(), path.as_ref())
}

pub fn probe_duration_with(tools: &MediaTools, path: &Path) -> Result<f64, MediaError> {
    validate_input_file(path)?;
    let output = tools.run_ffprobe(build_probe_args(path, false))?;
    parse_probe_json(&output)?
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.trim().parse::<f64>().ok())
        .ok_or_else(|| MediaError::unexpected_output(FFPROBE, output))
}
