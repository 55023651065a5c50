/// ドメイン層のエラー定義
///
/// 呼び出し側が渡した値がローカルの前提条件を満たさない場合のエラー。
/// ネットワークや外部ツールを呼ぶ前に判定されるため、外部クレートのエラーは含まない。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// カタログに存在しない言語
    #[error("language '{language}' is not available; languages() lists the supported ones")]
    UnknownLanguage { language: String },

    /// 言語に対応しない話者
    #[error(
        "speaker '{speaker}' is not available for language '{language}'; speakers(\"{language}\") lists the supported ones"
    )]
    UnknownSpeaker { language: String, speaker: String },

    /// "名前 性別" 形式になっていない話者ID
    #[error("speaker '{speaker}' must be '<name> <gender>'")]
    MalformedSpeaker { speaker: String },

    /// ファイルが見つからない
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// 拡張子から形式を推定できない
    #[error("cannot infer media format of '{path}': missing file extension")]
    MissingExtension { path: String },

    /// 負の秒数
    #[error("seconds cannot be negative, got {seconds}")]
    NegativeSeconds { seconds: i64 },

    /// hh:mm:ss として解釈できない文字列
    #[error("invalid time '{value}': expected hh:mm:ss")]
    InvalidTimestamp { value: String },

    /// 開始・終了が不正な区間
    #[error("invalid time range: start {start}s must be before end {end}s")]
    InvalidRange { start: u64, end: u64 },

    /// 空の認証情報
    #[error("{field} cannot be empty")]
    EmptyCredential { field: &'static str },

    /// HTTP ヘッダーとして送れない文字（改行など）を含む認証情報
    #[error("{field} contains characters that cannot be sent in an HTTP header")]
    InvalidCredential { field: &'static str },
}

impl DomainError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyCredential { .. } | Self::InvalidCredential { .. } => {
                ErrorSeverity::CredentialError
            }
            _ => ErrorSeverity::UserError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::UnknownLanguage { .. } => {
                Some("Run 'deepword languages' to list the available languages.")
            }
            Self::UnknownSpeaker { .. } => {
                Some("Run 'deepword languages <language>' to list the speakers for a language.")
            }
            Self::MalformedSpeaker { .. } => {
                Some("Copy the speaker exactly as listed, e.g. 'Wavenet-A Male'.")
            }
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.")
            }
            Self::NotAFile { .. } => Some("Please specify a file, not a directory."),
            Self::MissingExtension { .. } => {
                Some("Add an extension such as .mp3 or .wav so the format can be inferred.")
            }
            Self::NegativeSeconds { .. } | Self::InvalidTimestamp { .. } => None,
            Self::InvalidRange { .. } => Some("The end time must be greater than the start time."),
            Self::EmptyCredential { .. } => {
                Some("Set DEEPWORD_API_KEY and DEEPWORD_SECRET_KEY, or pass them with --stdin.")
            }
            Self::InvalidCredential { .. } => {
                Some("Copy the key again without line breaks or other control characters.")
            }
        }
    }
}
