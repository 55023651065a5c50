/// DeepWord セッション
///
/// 認証済みの接続を1つ保持し、リモート操作ごとに1つのメソッドを提供します。
/// 生成時に認証情報をサーバーで検証し、失敗した場合はセッションを返しません。
///
/// 各メソッドは1回のリクエスト／レスポンスで完結し、リトライや
/// バックグラウンド処理は行いません。セッションは生成後に変更されないため、
/// 参照を複数タスクで共有しても安全です。
use crate::api::auth::Credentials;
use crate::api::client::{ApiClient, ApiResult, TransportConfig};
use crate::api::error::ApiError;
use crate::api::types::{
    AudioSamplesResponse, CreditsResponse, DownloadStatusResponse, SampleAsset,
    TextToSpeechRequest, ValidateResponse, VideoActorsResponse, VideoListResponse, VideoRecord,
    sanitize_file_name,
};
use crate::config::APP_CONFIG;
use crate::domain::catalog::LanguageCatalog;
use crate::domain::validator::validate_input_file;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Body;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// エンドポイントパス（ベースURLからの相対）
pub mod endpoints {
    pub const VALIDATE: &str = "/check_apikey";
    pub const CREDITS: &str = "/api_get_credits/";
    pub const LIST_VIDEOS: &str = "/list_video_api/";
    pub const TEXT_TO_SPEECH: &str = "/api_text_to_speech/";
    pub const DOWNLOAD_VIDEO: &str = "/api_download_video/";
    pub const GENERATE_VIDEO: &str = "/generate_video_api";
    pub const AUDIO_SAMPLES: &str = "/api_get_audio_sample";
    pub const VIDEO_ACTORS: &str = "/api_get_video_actors";
}

/// 一括ダウンロードの結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DownloadReport {
    /// 保存先フォルダ
    pub folder: PathBuf,
    /// 書き込んだファイル
    pub written: Vec<PathBuf>,
    /// 処理中のためスキップした動画ID
    pub skipped: Vec<String>,
}

/// 認証済みセッション
#[derive(Debug, Clone)]
pub struct DeepWordSession {
    client: ApiClient,
    catalog: &'static LanguageCatalog,
    chunk_size: usize,
}

impl DeepWordSession {
    /// セッションを作成し、認証情報を検証する
    ///
    /// # Errors
    /// - サーバーが success: false、または 401 / 403 を返した: `Authentication`
    /// - その他の異常応答・解釈できない応答: 生の本文を持つ `Remote`
    /// - 通信に失敗した: `Network` / `Timeout`
    pub async fn connect(credentials: Credentials, transport: TransportConfig) -> ApiResult<Self> {
        let client = ApiClient::new(&transport, credentials)?;

        let body = match client.post_json::<()>(endpoints::VALIDATE, None).await {
            Ok(body) => body,
            Err(ApiError::Remote {
                status_code: Some(401 | 403),
                ..
            }) => return Err(ApiError::Authentication),
            Err(e) => return Err(e),
        };

        let validated: ValidateResponse = ApiClient::parse_json(endpoints::VALIDATE, &body)?;
        if !validated.success {
            return Err(ApiError::Authentication);
        }

        tracing::info!(
            api_key = %client.credentials().masked_api_key(),
            "login successful"
        );

        Ok(Self {
            client,
            catalog: LanguageCatalog::bundled(),
            chunk_size: APP_CONFIG.download.chunk_size,
        })
    }

    /// 言語カタログ（列挙用）
    pub fn catalog(&self) -> &LanguageCatalog {
        self.catalog
    }

    /// 利用可能な言語名の一覧
    pub fn languages(&self) -> Vec<&str> {
        self.catalog.languages().collect()
    }

    /// 指定言語の話者一覧（言語が未知なら None）
    pub fn speakers(&self, language: &str) -> Option<&[String]> {
        self.catalog.speakers(language)
    }

    /// アカウントの残りクレジット数
    pub async fn available_credits(&self) -> ApiResult<i64> {
        let body = self.client.post_json::<()>(endpoints::CREDITS, None).await?;
        let credits: CreditsResponse = ApiClient::parse_json(endpoints::CREDITS, &body)?;
        Ok(credits.available_credits)
    }

    /// 生成した動画の一覧（サーバーの並び順のまま）
    pub async fn list_videos(&self) -> ApiResult<Vec<VideoRecord>> {
        let body = self.client.post_json::<()>(endpoints::LIST_VIDEOS, None).await?;
        let list: VideoListResponse = ApiClient::parse_json(endpoints::LIST_VIDEOS, &body)?;
        Ok(list.data)
    }

    /// テキストを音声に変換し、output_path に書き込む
    ///
    /// 言語・話者はネットワーク呼び出しの前に検証する。
    /// output_path が既に存在する場合は削除してから書き込む。
    pub async fn text_to_speech(
        &self,
        text: &str,
        language: &str,
        speaker: &str,
        output_path: impl AsRef<Path>,
    ) -> ApiResult<PathBuf> {
        let output_path = output_path.as_ref();
        let voice = self.catalog.resolve(language, speaker)?;

        remove_existing(output_path).await?;

        let request = TextToSpeechRequest {
            text,
            name: &voice.name,
            gender: &voice.gender,
            code: &voice.code,
        };
        let body = self
            .client
            .post_json(endpoints::TEXT_TO_SPEECH, Some(&request))
            .await?;

        let audio = decode_audio_payload(&body)
            .ok_or_else(|| ApiError::remote(endpoints::TEXT_TO_SPEECH, body.as_str(), None))?;

        tokio::fs::write(output_path, &audio)
            .await
            .map_err(|e| ApiError::io(format!("Failed to write {}", output_path.display()), e))?;

        tracing::info!(path = %output_path.display(), bytes = audio.len(), "generated audio file");
        Ok(output_path.to_path_buf())
    }

    /// 動画を1本カレントディレクトリにダウンロードする
    pub async fn download_video(&self, video_id: &str) -> ApiResult<PathBuf> {
        self.download_video_to(video_id, Path::new(".")).await
    }

    /// 動画を1本指定フォルダにダウンロードする
    ///
    /// # Errors
    /// サーバーが処理中と応答した場合は `NotReady`。ファイルは書き込まない。
    /// 待機・再試行は行わないので、呼び出し側で後ほど再実行すること。
    pub async fn download_video_to(&self, video_id: &str, folder: &Path) -> ApiResult<PathBuf> {
        let endpoint = format!("{}{}", endpoints::DOWNLOAD_VIDEO, video_id);
        let body = self.client.get(&endpoint).await?;
        let status: DownloadStatusResponse = ApiClient::parse_json(&endpoint, &body)?;

        if !status.status {
            return Err(ApiError::NotReady {
                video_id: video_id.to_string(),
            });
        }

        let (Some(url), Some(name)) = (status.video_url.as_deref(), status.video_name.as_deref())
        else {
            return Err(ApiError::remote(endpoint, body, None));
        };

        ensure_folder(folder).await?;
        let dest = folder.join(sanitize_file_name(name));
        self.client.stream_to_file(url, &dest, self.chunk_size).await?;

        tracing::info!(video_id, path = %dest.display(), "downloaded video");
        Ok(dest)
    }

    /// 生成済みの全動画をフォルダにダウンロードする
    ///
    /// 処理中の動画はスキップし、レポートの skipped に記録する。
    /// 処理完了の動画で1件でも失敗した場合は全体を中断してエラーを返す。
    pub async fn download_all_videos(&self, folder: impl AsRef<Path>) -> ApiResult<DownloadReport> {
        let folder = folder.as_ref();
        ensure_folder(folder).await?;

        let videos = self.list_videos().await?;
        let mut report = DownloadReport {
            folder: folder.to_path_buf(),
            ..Default::default()
        };

        for video in &videos {
            let Some(url) = video.ready_url() else {
                tracing::warn!(video_id = %video.id, title = %video.title, "skipping video that is still processing");
                report.skipped.push(video.id.clone());
                continue;
            };

            let dest = folder.join(video.local_file_name());
            self.client.stream_to_file(url, &dest, self.chunk_size).await?;
            report.written.push(dest);
        }

        tracing::info!(
            folder = %folder.display(),
            written = report.written.len(),
            skipped = report.skipped.len(),
            "downloaded all videos"
        );
        Ok(report)
    }

    /// サービスが提供する音声サンプルをすべてダウンロードする
    pub async fn download_audio_samples(&self, folder: impl AsRef<Path>) -> ApiResult<DownloadReport> {
        let body = self.client.post_json::<()>(endpoints::AUDIO_SAMPLES, None).await?;
        let samples: AudioSamplesResponse = ApiClient::parse_json(endpoints::AUDIO_SAMPLES, &body)?;
        self.download_assets(folder.as_ref(), &samples.sample_audio_files, "audio samples")
            .await
    }

    /// サービスが提供するビデオアクターをすべてダウンロードする
    pub async fn download_video_actors(&self, folder: impl AsRef<Path>) -> ApiResult<DownloadReport> {
        let body = self.client.post_json::<()>(endpoints::VIDEO_ACTORS, None).await?;
        let actors: VideoActorsResponse = ApiClient::parse_json(endpoints::VIDEO_ACTORS, &body)?;
        self.download_assets(folder.as_ref(), &actors.sample_video_files, "video actors")
            .await
    }

    async fn download_assets(
        &self,
        folder: &Path,
        assets: &[SampleAsset],
        kind: &str,
    ) -> ApiResult<DownloadReport> {
        ensure_folder(folder).await?;

        let mut report = DownloadReport {
            folder: folder.to_path_buf(),
            ..Default::default()
        };
        for asset in assets {
            let dest = folder.join(asset.local_file_name());
            self.client.stream_to_file(&asset.url, &dest, self.chunk_size).await?;
            report.written.push(dest);
        }

        tracing::info!(folder = %folder.display(), count = report.written.len(), "downloaded all {}", kind);
        Ok(report)
    }

    /// 話している人物の動画と音声から合成動画の生成を依頼する
    ///
    /// 生成はサーバー側で非同期に行われる。戻り値はジョブ受付の応答であり、
    /// 完成した動画ではない。完了は list_videos / download_video で確認する。
    pub async fn generate_video(
        &self,
        video_path: impl AsRef<Path>,
        audio_path: impl AsRef<Path>,
        title: Option<&str>,
    ) -> ApiResult<serde_json::Value> {
        let video_path = video_path.as_ref();
        let audio_path = audio_path.as_ref();
        validate_input_file(video_path)?;
        validate_input_file(audio_path)?;

        let mut form = Form::new()
            .part("video_file", file_part(video_path).await?)
            .part("audio_file", file_part(audio_path).await?);
        if let Some(title) = title {
            form = form.text("name", title.to_string());
        }

        let body = self
            .client
            .post_multipart(endpoints::GENERATE_VIDEO, form)
            .await?;
        let accepted: serde_json::Value = ApiClient::parse_json(endpoints::GENERATE_VIDEO, &body)?;

        tracing::info!("generating video; this will take a few minutes");
        Ok(accepted)
    }
}

/// 音声ペイロード（base64）をデコードする
///
/// 本文が JSON 文字列として引用符で囲まれている場合も受け付ける。
/// 改行で折り返された base64 も読めるよう、空白文字は取り除いてからデコードする。
fn decode_audio_payload(body: &str) -> Option<Vec<u8>> {
    let trimmed = body.trim();
    let quoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    let payload: String = quoted
        .replace("\\n", "")
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if payload.is_empty() {
        return None;
    }
    general_purpose::STANDARD.decode(payload).ok()
}

/// ファイルをメモリに読み込まず、送信しながら読み出すパートを作る
async fn file_part(path: &Path) -> ApiResult<Part> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| ApiError::io(format!("Failed to open {}", path.display()), e))?;
    let length = file
        .metadata()
        .await
        .map_err(|e| ApiError::io(format!("Failed to read metadata of {}", path.display()), e))?
        .len();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Part::stream_with_length(Body::from(file), length).file_name(file_name))
}

async fn ensure_folder(folder: &Path) -> ApiResult<()> {
    tokio::fs::create_dir_all(folder)
        .await
        .map_err(|e| ApiError::io(format!("Failed to create folder {}", folder.display()), e))
}

async fn remove_existing(path: &Path) -> ApiResult<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ApiError::io(format!("Failed to remove {}", path.display()), e)),
    }
}
