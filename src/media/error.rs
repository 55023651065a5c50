/// メディア処理層のエラー定義
///
/// 外部ツール（ffmpeg / ffprobe）の起動失敗・異常終了を表す。
/// ツールが出力したエラー本文は加工せずに保持する。
use crate::domain::error::DomainError;
use crate::error_severity::ErrorSeverity;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    /// ローカルの前提条件違反（ツール起動前に検出）
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] DomainError),

    /// ツールが見つからない
    #[error("{tool} not found; install it or configure its path")]
    ToolNotFound { tool: String },

    /// ツールが異常終了した
    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        /// ツールの標準エラー出力そのまま
        stderr: String,
    },

    /// ツールの出力を解釈できない
    #[error("unexpected output from {tool}: {output}")]
    UnexpectedOutput { tool: String, output: String },

    /// プロセス起動などの I/O エラー
    #[error("failed to run {tool}")]
    Io {
        tool: String,
        #[source]
        source: io::Error,
    },
}

impl MediaError {
    pub fn unexpected_output(tool: impl Into<String>, output: impl Into<String>) -> Self {
        Self::UnexpectedOutput {
            tool: tool.into(),
            output: output.into(),
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidArgument(e) => e.severity(),
            _ => ErrorSeverity::SystemError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument(e) => e.hint(),
            Self::ToolNotFound { .. } => {
                Some("Install FFmpeg (ffmpeg and ffprobe) and make sure it is on your PATH.")
            }
            Self::ToolFailed { .. } => {
                Some("The input may use a codec or container that FFmpeg cannot handle.")
            }
            Self::UnexpectedOutput { .. } | Self::Io { .. } => None,
        }
    }
}
