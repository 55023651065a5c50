/// アプリケーション設定モジュール
///
/// ビルド時に config.toml から読み込まれる静的設定を管理します。
/// これらの設定は実行時には変更できません。
/// 実行時に上書きしたい値は UserConfig 側で扱います。
use serde::Deserialize;
use std::sync::LazyLock;

/// ビルド時設定（プロセス全体で共有される読み取り専用値）
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(AppConfig::load);

/// アプリケーション全体の設定
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub download: DownloadConfig,
    pub media: MediaConfig,
    pub logging: LoggingConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// DeepWord API のベースURL
    pub endpoint: String,

    /// 接続確立のタイムアウト(秒)。転送時間には上限を設けない
    pub connect_timeout_seconds: u64,

    /// 検証できないTLS証明書を受け入れるか
    pub accept_invalid_certs: bool,
}

/// ダウンロード関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    /// ストリーミング書き込みのチャンクサイズ (バイト)
    pub chunk_size: usize,

    /// download-all のデフォルト保存先
    pub videos_dir: String,

    /// 音声サンプルのデフォルト保存先
    pub audio_samples_dir: String,

    /// ビデオアクターのデフォルト保存先
    pub video_actors_dir: String,
}

/// 外部メディアツールの設定
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// ffmpeg の実行ファイル名またはパス
    pub ffmpeg: String,

    /// ffprobe の実行ファイル名またはパス
    pub ffprobe: String,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// ログレベル (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// ビルド時に埋め込まれたconfig.tomlから設定を読み込む
    ///
    /// # Panics
    /// 設定ファイルのパースに失敗した場合はパニックします。
    /// これはビルド時設定なので、実行時エラーではなくコンパイルエラーとして扱うべきです。
    pub fn load() -> Self {
        const CONFIG_STR: &str = include_str!("../../config.toml");
        toml::from_str(CONFIG_STR)
            .expect("Failed to parse embedded config.toml. This is a build-time configuration error.")
    }
}
