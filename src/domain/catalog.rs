/// ドメインサービス: 言語カタログ
///
/// テキスト読み上げで使える言語・話者・プロバイダーコードの静的な対応表。
/// data/languages.toml をビルド時に埋め込み、初回アクセス時に一度だけパースする。
use crate::domain::error::DomainError;
use serde::Deserialize;
use std::sync::LazyLock;

static BUNDLED: LazyLock<LanguageCatalog> = LazyLock::new(|| {
    const CATALOG_STR: &str = include_str!("../../data/languages.toml");
    LanguageCatalog::from_toml(CATALOG_STR)
        .expect("Failed to parse embedded languages.toml. This is a build-time data error.")
});

/// 1言語分のエントリ
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub code: String,
    pub speakers: Vec<String>,
}

/// 言語カタログ（読み取り専用）
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageCatalog {
    #[serde(rename = "language")]
    entries: Vec<LanguageEntry>,
}

/// 読み上げリクエストに渡す解決済みの声
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub gender: String,
    pub code: String,
}

impl LanguageCatalog {
    /// バイナリに同梱されたカタログ
    pub fn bundled() -> &'static LanguageCatalog {
        &BUNDLED
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 定義順の言語名一覧
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn entry(&self, language: &str) -> Option<&LanguageEntry> {
        self.entries.iter().find(|e| e.name == language)
    }

    pub fn speakers(&self, language: &str) -> Option<&[String]> {
        self.entry(language).map(|e| e.speakers.as_slice())
    }

    pub fn provider_code(&self, language: &str) -> Option<&str> {
        self.entry(language).map(|e| e.code.as_str())
    }

    /// 言語と話者を検証し、リクエストに使う声を返す
    ///
    /// # エラー
    /// - 言語がカタログにない: `UnknownLanguage`
    /// - 話者がその言語にない: `UnknownSpeaker`
    /// - 話者IDが "名前 性別" 形式でない: `MalformedSpeaker`
    pub fn resolve(&self, language: &str, speaker: &str) -> Result<Voice, DomainError> {
        let entry = self
            .entry(language)
            .ok_or_else(|| DomainError::UnknownLanguage {
                language: language.to_string(),
            })?;

        if !entry.speakers.iter().any(|s| s == speaker) {
            return Err(DomainError::UnknownSpeaker {
                language: language.to_string(),
                speaker: speaker.to_string(),
            });
        }

        let (name, gender) = split_speaker(speaker)?;

        Ok(Voice {
            name,
            gender,
            code: entry.code.clone(),
        })
    }
}

/// 話者IDを名前と性別に分割する
///
/// 最後の空白区切りトークンを性別、それより前をすべて名前として扱う。
/// 名前に空白が含まれていても分割できるが、トークンが2つ未満ならエラー。
pub fn split_speaker(speaker: &str) -> Result<(String, String), DomainError> {
    let malformed = || DomainError::MalformedSpeaker {
        speaker: speaker.to_string(),
    };

    let trimmed = speaker.trim();
    let (name, gender) = trimmed.rsplit_once(char::is_whitespace).ok_or_else(malformed)?;
    let name = name.trim_end();

    if name.is_empty() || gender.is_empty() {
        return Err(malformed());
    }

    Ok((name.to_string(), gender.to_string()))
}
