/// API通信用の型定義
///
/// DeepWord API のリクエスト・レスポンスを (デ)シリアライズするための構造体を定義します。
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// POST /check_apikey のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateResponse {
    pub success: bool,
}

/// POST /api_get_credits/ のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsResponse {
    pub available_credits: i64,
}

/// POST /list_video_api/ のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    pub data: Vec<VideoRecord>,
}

/// 生成済み（または生成中）の動画
///
/// ステータスはサーバー側で非同期に not-ready → ready へ遷移する。
/// クライアントは参照するだけで変更しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(alias = "_id", alias = "video_id", deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// true なら処理完了
    #[serde(default, deserialize_with = "lenient_bool")]
    pub status: bool,

    #[serde(default)]
    pub video_url: Option<String>,

    /// 上記以外のフィールド（作成日時など）はそのまま保持する
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl VideoRecord {
    /// ダウンロード可能な URL（処理完了時のみ）
    pub fn ready_url(&self) -> Option<&str> {
        if self.status {
            self.video_url.as_deref().filter(|u| !u.is_empty())
        } else {
            None
        }
    }

    /// 保存用ファイル名: タイトル末尾の ".mp4" を取り除き、一度だけ付け直す
    pub fn local_file_name(&self) -> String {
        let stem = sanitize_file_name(&self.title);
        format!("{}.mp4", stem.trim_end_matches(".mp4"))
    }
}

/// POST /api_text_to_speech/ のリクエスト
#[derive(Debug, Clone, Serialize)]
pub struct TextToSpeechRequest<'a> {
    pub text: &'a str,
    pub name: &'a str,
    pub gender: &'a str,
    pub code: &'a str,
}

/// GET /api_download_video/{id} のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadStatusResponse {
    #[serde(deserialize_with = "lenient_bool")]
    pub status: bool,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub video_name: Option<String>,
}

/// POST /api_get_audio_sample のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct AudioSamplesResponse {
    pub sample_audio_files: Vec<SampleAsset>,
}

/// POST /api_get_video_actors のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct VideoActorsResponse {
    pub sample_video_files: Vec<SampleAsset>,
}

/// 参照用アセット（音声サンプル・ビデオアクター）
#[derive(Debug, Clone, Deserialize)]
pub struct SampleAsset {
    #[serde(alias = "audio_url", alias = "video_url")]
    pub url: String,
    pub title: String,
    /// 先頭の "." を含む拡張子（例: ".mp3"）
    #[serde(default)]
    pub extension: String,
}

impl SampleAsset {
    pub fn local_file_name(&self) -> String {
        sanitize_file_name(&format!("{}{}", self.title, self.extension))
    }
}

/// サーバー由来の名前からパス要素を取り除き、最後の要素だけを残す
pub fn sanitize_file_name(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    match last {
        "" | "." | ".." => "untitled".to_string(),
        other => other.to_string(),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}

/// true/false のほか "true" / 1 / "ready" なども受け付ける
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_i64().is_some_and(|v| v != 0),
        serde_json::Value::String(s) => {
            matches!(s.to_lowercase().as_str(), "true" | "1" | "ready" | "done" | "completed")
        }
        _ => false,
    })
}
