/// HTTPクライアント
///
/// DeepWord サービスとの通信を担当するHTTPクライアント。
/// タイムアウト、証明書ポリシー、認証ヘッダー、エラーハンドリングを含みます。
/// ヘッダーはリクエストごとに新しく組み立てるため、クライアント自体は不変です。
use crate::api::auth::Credentials;
use crate::api::error::ApiError;
use crate::config::APP_CONFIG;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufWriter};

/// APIクライアントの結果型
pub type ApiResult<T> = Result<T, ApiError>;

/// 通信設定
///
/// セッション作成時に明示的に渡す。プロセス全体の設定は変更しない。
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// APIのベースURL（末尾の "/" なし）
    pub base_url: String,
    /// 接続確立のタイムアウト（レスポンス本文の受信時間は制限しない）
    pub connect_timeout: Duration,
    /// 検証できないTLS証明書を受け入れるか
    pub accept_invalid_certs: bool,
}

impl TransportConfig {
    /// ベースURLを指定して作成（その他はビルド時設定の値）
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(APP_CONFIG.api.connect_timeout_seconds),
            accept_invalid_certs: APP_CONFIG.api.accept_invalid_certs,
        }
    }

    /// デフォルトのプロダクション環境設定
    pub fn production() -> Self {
        Self::new(APP_CONFIG.api.endpoint.clone())
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::production()
    }
}

/// APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// # Arguments
    /// * `transport` - 通信設定
    /// * `credentials` - 全リクエストに付与する認証情報
    pub fn new(transport: &TransportConfig, credentials: Credentials) -> ApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(transport.connect_timeout)
            .danger_accept_invalid_certs(transport.accept_invalid_certs)
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: transport.base_url.clone(),
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// JSON モードで POST し、本文を文字列で返す
    ///
    /// # Arguments
    /// * `endpoint` - エンドポイントパス（例: "/api_get_credits/"）
    /// * `body` - リクエストボディ（なければ空）
    pub async fn post_json<T: serde::Serialize>(
        &self,
        endpoint: &str,
        body: Option<&T>,
    ) -> ApiResult<String> {
        let mut request = self
            .client
            .post(self.build_url(endpoint))
            .headers(self.credentials.headers())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.json(body);
        }

        Self::send_and_read(request, endpoint, "POST").await
    }

    /// JSON モードで GET し、本文を文字列で返す
    pub async fn get(&self, endpoint: &str) -> ApiResult<String> {
        let request = self
            .client
            .get(self.build_url(endpoint))
            .headers(self.credentials.headers())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self::send_and_read(request, endpoint, "GET").await
    }

    /// マルチパートで POST し、本文を文字列で返す
    ///
    /// Content-Type はマルチパート境界付きで reqwest が設定する。
    pub async fn post_multipart(&self, endpoint: &str, form: Form) -> ApiResult<String> {
        let request = self
            .client
            .post(self.build_url(endpoint))
            .headers(self.credentials.headers())
            .multipart(form);

        Self::send_and_read(request, endpoint, "POST").await
    }

    /// 絶対URLの内容をファイルへストリーミング書き込みする
    ///
    /// 既存ファイルは切り詰めて上書きする。途中で失敗した場合は
    /// 不完全なファイルが残る（再開・検証は行わない）。
    ///
    /// # Returns
    /// 書き込んだバイト数
    pub async fn stream_to_file(&self, url: &str, dest: &Path, chunk_size: usize) -> ApiResult<u64> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&format!("GET {}", url), e))?;
        let mut response = Self::check_response(response, url).await?;

        let file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| ApiError::io(format!("Failed to create {}", dest.display()), e))?;
        let mut writer = BufWriter::with_capacity(chunk_size.max(1), file);
        let mut written = 0u64;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ApiError::from_transport(&format!("GET {}", url), e))?
        {
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| ApiError::io(format!("Failed to write {}", dest.display()), e))?;
            written += chunk.len() as u64;
        }

        writer
            .flush()
            .await
            .map_err(|e| ApiError::io(format!("Failed to write {}", dest.display()), e))?;

        Ok(written)
    }

    /// URLを構築
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// リクエストを送信し、成功ステータスなら本文を返す
    async fn send_and_read(request: RequestBuilder, endpoint: &str, method: &str) -> ApiResult<String> {
        tracing::debug!(method, endpoint, "sending request");

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&format!("{} {}", method, endpoint), e))?;
        let response = Self::check_response(response, endpoint).await?;

        response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&format!("{} {}", method, endpoint), e))
    }

    /// レスポンスをチェックしてエラーを返す
    ///
    /// 失敗ステータスの場合は本文をそのまま Remote エラーに載せる。
    pub async fn check_response(response: Response, endpoint: &str) -> ApiResult<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        Err(ApiError::remote(endpoint, error_body, Some(status.as_u16())))
    }

    /// JSON本文をデシリアライズ
    ///
    /// パースに失敗した場合、または必要なフィールドがない場合は
    /// 生の本文を持つ Remote エラーを返す。
    pub fn parse_json<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
        serde_json::from_str(body).map_err(|e| {
            tracing::debug!(endpoint, error = %e, "unexpected response shape");
            ApiError::remote(endpoint, body, None)
        })
    }
}
