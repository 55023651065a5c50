/// 外部メディアツールの実行
///
/// ffmpeg / ffprobe を子プロセスとして同期的に起動し、結果を MediaError に正規化する。
use crate::config::APP_CONFIG;
use crate::media::error::MediaError;
use std::ffi::OsStr;
use std::io;
use std::process::{Command, Stdio};

/// 使用するツールのプログラム名（またはパス）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTools {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for MediaTools {
    fn default() -> Self {
        Self {
            ffmpeg: APP_CONFIG.media.ffmpeg.clone(),
            ffprobe: APP_CONFIG.media.ffprobe.clone(),
        }
    }
}

impl MediaTools {
    /// ffmpeg と ffprobe の両方が起動できるか
    pub fn is_available(&self) -> bool {
        probe_version(&self.ffmpeg) && probe_version(&self.ffprobe)
    }

    /// ffmpeg を実行する（標準出力は捨てる）
    pub fn run_ffmpeg<I, S>(&self, args: I) -> Result<(), MediaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        run(&self.ffmpeg, args).map(|_| ())
    }

    /// ffprobe を実行し、標準出力を返す
    pub fn run_ffprobe<I, S>(&self, args: I) -> Result<String, MediaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        run(&self.ffprobe, args)
    }
}

fn probe_version(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

fn run<I, S>(program: &str, args: I) -> Result<String, MediaError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null());
    tracing::debug!(?command, "running media tool");

    let output = command.output().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            MediaError::ToolNotFound {
                tool: program.to_string(),
            }
        } else {
            MediaError::Io {
                tool: program.to_string(),
                source: e,
            }
        }
    })?;

    if !output.status.success() {
        return Err(MediaError::ToolFailed {
            tool: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
