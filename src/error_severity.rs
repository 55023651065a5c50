//! 全レイヤー共通のエラー深刻度
//!
//! ライブラリの各エラー型（domain, api, media, config）は自身の深刻度を
//! このモジュールの型で表現し、CLI はそれを終了コードに変換する。
//!
//! **依存方向の原則:**
//! - 他のモジュールはこのモジュールに依存してOK
//! - このモジュールは他のモジュールに依存しない（独立）

use std::fmt;

/// エラーの深刻度と対応する終了コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// 呼び出し側の入力エラー
    ///
    /// 未知の言語・話者、存在しないファイルなど、呼び出し側が直せるもの。
    ///
    /// **Exit Code: 1**
    UserError,

    /// 認証情報・設定のエラー
    ///
    /// API キーが無効、設定ファイルが壊れているなど。
    ///
    /// **Exit Code: 2**
    CredentialError,

    /// システムエラー
    ///
    /// ネットワーク障害、サーバー側の異常応答、外部ツールの失敗など。
    ///
    /// **Exit Code: 3**
    SystemError,

    /// 後で再試行すれば成功しうる状態
    ///
    /// 動画がまだサーバー側で処理中の場合。自動リトライは行わない。
    ///
    /// **Exit Code: 4**
    RetryLater,
}

impl ErrorSeverity {
    /// 対応する Unix 終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::CredentialError => 2,
            Self::SystemError => 3,
            Self::RetryLater => 4,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserError => write!(f, "user error"),
            Self::CredentialError => write!(f, "credential error"),
            Self::SystemError => write!(f, "system error"),
            Self::RetryLater => write!(f, "retry later"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorSeverity::UserError.exit_code(), 1);
        assert_eq!(ErrorSeverity::CredentialError.exit_code(), 2);
        assert_eq!(ErrorSeverity::SystemError.exit_code(), 3);
        assert_eq!(ErrorSeverity::RetryLater.exit_code(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorSeverity::UserError.to_string(), "user error");
        assert_eq!(ErrorSeverity::CredentialError.to_string(), "credential error");
        assert_eq!(ErrorSeverity::RetryLater.to_string(), "retry later");
    }
}
