/// 認証情報
///
/// DeepWord の API キーとシークレットキーを保持し、
/// リクエストごとに送る認証ヘッダーを生成します。
/// セッションの生存期間中は不変です。
use crate::domain::error::DomainError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;

const API_KEY_HEADER: &str = "api_key";
const SECRET_KEY_HEADER: &str = "secret_key";
/// 稼働中のサービスが読むのはこの綴り
const LEGACY_SECRET_KEY_HEADER: &str = "secerat_key";

/// API キーとシークレットキーの組
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl Credentials {
    /// 新しい認証情報を作成
    ///
    /// 空文字列・空白のみの値はローカルで拒否します。
    /// ヘッダー値として送れない文字（改行など）を含む値も拒否します。
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self, DomainError> {
        let api_key = api_key.into().trim().to_string();
        let secret_key = secret_key.into().trim().to_string();

        Self::check_field(&api_key, "api_key")?;
        Self::check_field(&secret_key, "secret_key")?;

        Ok(Self { api_key, secret_key })
    }

    fn check_field(value: &str, field: &'static str) -> Result<(), DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyCredential { field });
        }
        if HeaderValue::from_str(value).is_err() {
            return Err(DomainError::InvalidCredential { field });
        }
        Ok(())
    }

    /// 認証ヘッダーを生成
    ///
    /// 呼び出しごとに新しい HeaderMap を返すため、共有状態は変更されない。
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        // new() で検証済みなので from_str は失敗しない
        if let Ok(value) = HeaderValue::from_str(&self.api_key) {
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.secret_key) {
            headers.insert(HeaderName::from_static(SECRET_KEY_HEADER), value.clone());
            headers.insert(HeaderName::from_static(LEGACY_SECRET_KEY_HEADER), value);
        }
        headers
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API キーをマスキングして表示
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}***{}", head, tail)
        }
    }
}

// シークレットがログに出ないよう Debug は手書き
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.masked_api_key())
            .field("secret_key", &"***")
            .finish()
    }
}
