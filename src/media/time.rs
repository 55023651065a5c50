//! 秒数と "hh:mm:ss" 文字列の相互変換

use crate::domain::error::DomainError;

/// 秒数を "hh:mm:ss" に変換する
///
/// 24時間を超えても折り返さない（"25:00:00" のように時間が増える）。
pub fn to_hhmmss(seconds: i64) -> Result<String, DomainError> {
    if seconds < 0 {
        return Err(DomainError::NegativeSeconds { seconds });
    }
    let (h, rem) = (seconds / 3600, seconds % 3600);
    Ok(format!("{:02}:{:02}:{:02}", h, rem / 60, rem % 60))
}

/// "hh:mm:ss" を秒数に変換する
///
/// 各フィールドは符号なし整数。分・秒が 59 を超えていてもそのまま加算する。
pub fn to_secs(value: &str) -> Result<u64, DomainError> {
    let invalid = || DomainError::InvalidTimestamp {
        value: value.to_string(),
    };

    let fields: Vec<u64> = value
        .trim()
        .split(':')
        .map(|f| f.parse::<u64>().map_err(|_| invalid()))
        .collect::<Result<_, _>>()?;

    let [h, m, s] = fields[..] else {
        return Err(invalid());
    };

    h.checked_mul(3600)
        .and_then(|v| v.checked_add(m.checked_mul(60)?))
        .and_then(|v| v.checked_add(s))
        .ok_or_else(invalid)
}
