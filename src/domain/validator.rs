/// ドメインサービス: ローカルファイルの前提条件チェック
///
/// アップロードや外部ツールに渡す前に、入力ファイルを検証する。
/// ネットワークやプロセス起動より前に失敗させるのが目的。
use crate::domain::error::DomainError;
use std::path::Path;

/// 入力ファイルの検証結果
#[derive(Debug, Clone)]
pub struct ValidatedFile {
    pub size: u64,
    /// 小文字化した拡張子（なければ None）
    pub extension: Option<String>,
}

/// 入力ファイルが存在し、通常ファイルであることを検証する
///
/// # エラー
/// - ファイルが存在しない
/// - ディレクトリが指定された
pub fn validate_input_file(path: &Path) -> Result<ValidatedFile, DomainError> {
    let display = path.display().to_string();

    // メタデータが取れない場合も「見つからない」として扱う
    let metadata = std::fs::metadata(path).map_err(|_| DomainError::file_not_found(&display))?;

    if metadata.is_dir() {
        return Err(DomainError::not_a_file(display));
    }

    Ok(ValidatedFile {
        size: metadata.len(),
        extension: file_extension(path),
    })
}

/// 拡張子から形式名を推定する（"clip.MP3" -> "mp3"）
pub fn media_format(path: &Path) -> Result<String, DomainError> {
    file_extension(path).ok_or_else(|| DomainError::MissingExtension {
        path: path.display().to_string(),
    })
}

fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_lowercase())
}
