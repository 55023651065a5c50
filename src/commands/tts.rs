use crate::commands::result::{CommandResult, TtsResult};
use crate::commands::session;
use anyhow::{Context, Result};
use deepword::LanguageCatalog;

/// 出力ファイル名の既定値
pub const DEFAULT_OUTFILE: &str = "text2speech.mp3";

/// テキスト読み上げコマンドを実行する
///
/// # 引数
/// * `text` - 読み上げるテキスト
/// * `language` - 言語名（`deepword languages` で確認）
/// * `speaker` - 話者（`deepword languages <language>` で確認）
/// * `outfile` - 出力先（既存ファイルは上書き）
pub async fn execute(
    text: &str,
    language: &str,
    speaker: &str,
    outfile: &str,
    from_stdin: bool,
) -> Result<CommandResult> {
    // 認証の往復より前に言語・話者を検証する
    LanguageCatalog::bundled()
        .resolve(language, speaker)
        .context("Invalid text-to-speech arguments")?;

    let ctx = session::open(from_stdin).await?;

    let path = ctx
        .session
        .text_to_speech(text, language, speaker, outfile)
        .await
        .context("Text-to-speech failed")?;

    Ok(CommandResult::Tts(TtsResult { path }))
}
