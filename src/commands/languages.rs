use crate::commands::result::{CommandResult, LanguagesResult};
use anyhow::Result;
use deepword::{DomainError, LanguageCatalog};

/// 言語コマンドを実行する
///
/// 引数なしなら言語一覧、言語名を渡すとその言語の話者一覧を返す。
/// 同梱カタログを読むだけなので認証は不要。
pub fn execute(language: Option<&str>) -> Result<CommandResult> {
    let catalog = LanguageCatalog::bundled();

    let entries = match language {
        None => catalog.languages().map(str::to_string).collect(),
        Some(language) => catalog
            .speakers(language)
            .ok_or_else(|| DomainError::UnknownLanguage {
                language: language.to_string(),
            })?
            .to_vec(),
    };

    Ok(CommandResult::Languages(LanguagesResult {
        language: language.map(str::to_string),
        entries,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_languages() {
        let CommandResult::Languages(r) = execute(None).unwrap() else {
            panic!("unexpected result");
        };
        assert!(r.entries.contains(&"English (US)".to_string()));
    }

    #[test]
    fn test_list_speakers() {
        let CommandResult::Languages(r) = execute(Some("French")).unwrap() else {
            panic!("unexpected result");
        };
        assert_eq!(r.language.as_deref(), Some("French"));
        assert!(!r.entries.is_empty());
    }

    #[test]
    fn test_unknown_language() {
        let err = execute(Some("Klingon")).unwrap_err();
        assert!(err.downcast_ref::<DomainError>().is_some());
    }
}
