/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use deepword::media::Resolution;
use deepword::{DownloadReport, VideoRecord};
use serde::Serialize;
use std::path::PathBuf;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Credits(CreditsResult),
    List(ListResult),
    Tts(TtsResult),
    Languages(LanguagesResult),
    Generate(GenerateResult),
    Download(DownloadResult),
    DownloadAll(BatchResult),
    Samples(BatchResult),
    Actors(BatchResult),
    TrimVideo(MediaFileResult),
    TrimAudio(MediaFileResult),
    ConvertAudio(MediaFileResult),
    Resolution(ResolutionResult),
    Fps(FpsResult),
    Time(TimeResult),
    Help,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditsResult {
    pub available_credits: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResult {
    pub videos: Vec<VideoRecord>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TtsResult {
    pub path: PathBuf,
}

/// language が None なら言語一覧、Some なら話者一覧
#[derive(Debug, Clone, Serialize)]
pub struct LanguagesResult {
    pub language: Option<String>,
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResult {
    /// サーバーが返したジョブ受付の応答
    pub response: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadResult {
    pub video_id: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    #[serde(flatten)]
    pub report: DownloadReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaFileResult {
    pub source: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolutionResult {
    pub path: PathBuf,
    #[serde(flatten)]
    pub resolution: Resolution,
}

#[derive(Debug, Clone, Serialize)]
pub struct FpsResult {
    pub path: PathBuf,
    pub fps: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeResult {
    pub input: String,
    pub output: String,
}

impl CommandResult {
    /// 成功メッセージを取得（人間向け出力用）
    pub fn success_message(&self) -> String {
        match self {
            CommandResult::Credits(r) => format!("Available credits: {}", r.available_credits),
            CommandResult::List(r) => format!("Found {} video(s)", r.total_count),
            CommandResult::Tts(r) => format!("Successfully generated audio file {}", r.path.display()),
            CommandResult::Languages(_) => String::new(),
            CommandResult::Generate(_) => {
                "Generating video. This will take a few minutes.".to_string()
            }
            CommandResult::Download(r) => format!("Successfully downloaded video {}!", r.video_id),
            CommandResult::DownloadAll(r) => format!(
                "Successfully downloaded all videos in folder {}!",
                r.report.folder.display()
            ),
            CommandResult::Samples(_) => "Successfully downloaded all audio samples".to_string(),
            CommandResult::Actors(_) => "Successfully downloaded all video actors".to_string(),
            CommandResult::TrimVideo(_) => "Successfully trimmed video!".to_string(),
            CommandResult::TrimAudio(_) => "Successfully trimmed audio!".to_string(),
            CommandResult::ConvertAudio(_) => "Successfully converted audio!".to_string(),
            CommandResult::Resolution(_) | CommandResult::Fps(_) | CommandResult::Time(_) => {
                String::new()
            }
            CommandResult::Help => String::new(),
        }
    }
}
