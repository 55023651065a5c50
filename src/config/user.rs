/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\deepword\config.toml
/// macOS:   /Users/<User>/Library/Application Support/deepword/config.toml
/// Linux:   /home/<user>/.config/deepword/config.toml
///
/// 初回起動時にテンプレートから自動的にconfig.tomlを作成します。
/// 認証情報はここには保存しません（毎回呼び出し側から渡される）。
use crate::config::app::APP_CONFIG;
use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 受け付けるログレベル
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// ユーザー設定
///
/// すべての項目は省略可能で、省略時は APP_CONFIG の値が使われる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// APIのベースURLの上書き
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// 検証できないTLS証明書を受け入れるか
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_invalid_certs: Option<bool>,

    /// ダウンロード先の親ディレクトリ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,

    /// ログレベル
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("deepword").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合は、テンプレートから自動的に作成します。
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 既存の設定ファイルだけを読み込む（ファイルは作成しない）
    ///
    /// ファイルがなければ `Ok(None)` を返します。ログ初期化のように
    /// ディスクへ書き込みたくない場面で使います。
    pub fn load_existing() -> Result<Option<Self>, ConfigError> {
        Self::load_existing_from(&Self::config_path()?)
    }

    pub fn load_existing_from(config_path: &Path) -> Result<Option<Self>, ConfigError> {
        if !config_path.exists() {
            return Ok(None);
        }
        Self::read_from(config_path).map(Some)
    }

    /// 指定パスからユーザー設定を読み込む
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        Self::read_from(config_path)
    }

    fn read_from(config_path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    /// デフォルト設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!(
                    "Failed to create default config file: {}",
                    config_path.display()
                ),
                e,
            )
        })?;

        Ok(())
    }

    /// デフォルトTOML設定を生成
    ///
    /// 全項目をコメントアウトした状態で出力し、組み込み値を参考として示す。
    fn default_toml_content() -> String {
        format!(
            r#"# DeepWord client - User Configuration
# Credentials are never stored here. Use DEEPWORD_API_KEY / DEEPWORD_SECRET_KEY.

# endpoint = "{}"
# accept_invalid_certs = {}
# download_dir = "."
# log_level = "{}"
"#,
            APP_CONFIG.api.endpoint, APP_CONFIG.api.accept_invalid_certs, APP_CONFIG.logging.level
        )
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - endpoint: http:// または https:// で始まること
    /// - log_level: trace/debug/info/warn/error のいずれか
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            let endpoint = endpoint.trim();
            if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
                return Err(ConfigError::validation_error(format!(
                    "Invalid endpoint '{}'. It must start with http:// or https://",
                    endpoint
                )));
            }
        }

        if let Some(level) = &self.log_level
            && !LOG_LEVELS.contains(&level.to_lowercase().as_str())
        {
            return Err(ConfigError::validation_error(format!(
                "Invalid log level '{}'. Must be one of: {}",
                level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// 実際に使用するベースURL
    pub fn effective_endpoint(&self) -> String {
        self.endpoint
            .as_deref()
            .map(|e| e.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| APP_CONFIG.api.endpoint.clone())
    }

    /// 実際に使用する証明書ポリシー
    pub fn effective_accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
            .unwrap_or(APP_CONFIG.api.accept_invalid_certs)
    }

    /// 実際に使用するログレベル
    pub fn effective_log_level(&self) -> String {
        self.log_level
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| APP_CONFIG.logging.level.clone())
    }

    /// 相対フォルダ名をダウンロード先ディレクトリ基準で解決する
    pub fn resolve_download_path(&self, folder: &str) -> PathBuf {
        match &self.download_dir {
            Some(base) => base.join(folder),
            None => PathBuf::from(folder),
        }
    }
}
