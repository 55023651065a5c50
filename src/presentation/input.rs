/// プレゼンテーション層: 認証情報の入力
///
/// 環境変数または stdin から API キーとシークレットキーを取得し、
/// ライブラリの Credentials に変換します。取得した値はどこにも保存しません。
use anyhow::{Context, Result, bail};
use deepword::Credentials;
use std::env;
use std::io::{self, BufRead};

pub const API_KEY_ENV: &str = "DEEPWORD_API_KEY";
pub const SECRET_KEY_ENV: &str = "DEEPWORD_SECRET_KEY";

/// 認証情報を取得
///
/// `from_stdin` が true なら stdin の2行から、そうでなければ環境変数から読む。
pub fn read_credentials(from_stdin: bool) -> Result<Credentials> {
    if from_stdin {
        read_credentials_from_reader(io::stdin().lock())
    } else {
        read_credentials_from_env()
    }
}

/// 環境変数から認証情報を取得
pub fn read_credentials_from_env() -> Result<Credentials> {
    let api_key = env::var(API_KEY_ENV).unwrap_or_default();
    let secret_key = env::var(SECRET_KEY_ENV).unwrap_or_default();

    if api_key.trim().is_empty() || secret_key.trim().is_empty() {
        bail!(
            "Credentials not found. Set {} and {}, or pass them with --stdin.",
            API_KEY_ENV,
            SECRET_KEY_ENV
        );
    }

    Ok(Credentials::new(api_key, secret_key)?)
}

/// 2行形式で認証情報を読み取る
///
/// 形式:
///   1行目: API key
///   2行目: Secret key
pub fn read_credentials_from_reader(mut reader: impl BufRead) -> Result<Credentials> {
    let mut api_key = String::new();
    reader
        .read_line(&mut api_key)
        .context("Failed to read API key from stdin")?;

    let mut secret_key = String::new();
    reader
        .read_line(&mut secret_key)
        .context("Failed to read secret key from stdin")?;

    Credentials::new(api_key, secret_key)
        .context("Invalid credentials on stdin. Line 1 must be the API key, line 2 the secret key.")
}
