/// API層のエラー定義
///
/// DeepWord サービスとのやり取り（認証、HTTP通信、ダウンロード書き込み）で
/// 発生するエラーを構造化して定義。
/// サーバーの応答本文は加工せずにフィールドとして保持する。
use crate::domain::error::DomainError;
use crate::error_severity::ErrorSeverity;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// 認証情報が無効（セッションは作成されない）
    #[error("authentication failed: invalid credentials")]
    Authentication,

    /// ローカルの前提条件違反（ネットワーク呼び出し前に検出）
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] DomainError),

    /// 動画がまだサーバー側で処理中
    #[error("video {video_id} is still processing; unable to download it at this time")]
    NotReady { video_id: String },

    /// サーバーの異常応答、または想定外の応答形式
    #[error("remote error from {endpoint}: {body}")]
    Remote {
        endpoint: String,
        /// サーバーが返した本文そのまま
        body: String,
        status_code: Option<u16>,
    },

    /// ネットワークエラー
    #[error("network error: {message}")]
    Network { message: String },

    /// タイムアウトエラー
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },

    /// ローカルファイルの読み書きエラー
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    pub fn remote(endpoint: impl Into<String>, body: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Remote {
            endpoint: endpoint.into(),
            body: body.into(),
            status_code,
        }
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// reqwest のエラーを分類する
    pub(crate) fn from_transport(operation: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::timeout(operation)
        } else if e.is_connect() {
            Self::network(format!("Connection failed for {}: {}", operation, e))
        } else {
            Self::network(format!("Request failed for {}: {}", operation, e))
        }
    }

    /// サーバーが返した生の本文（Remote の場合のみ）
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Remote { body, .. } => Some(body),
            _ => None,
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Authentication => ErrorSeverity::CredentialError,
            Self::InvalidArgument(e) => e.severity(),
            Self::NotReady { .. } => ErrorSeverity::RetryLater,
            Self::Remote { .. } | Self::Network { .. } | Self::Timeout { .. } | Self::Io { .. } => {
                ErrorSeverity::SystemError
            }
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Authentication => {
                Some("Check DEEPWORD_API_KEY and DEEPWORD_SECRET_KEY. Keys are generated from your DeepWord account.")
            }
            Self::InvalidArgument(e) => e.hint(),
            Self::NotReady { .. } => {
                Some("Generation takes a few minutes. Check 'deepword list' and try again later.")
            }
            Self::Network { .. } | Self::Timeout { .. } => {
                Some("Check your network connection and the configured endpoint.")
            }
            Self::Remote { .. } | Self::Io { .. } => None,
        }
    }
}
