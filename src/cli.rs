use crate::commands::{self, CommandResult};
use anyhow::{Context, Result, bail};

/// グローバルフラグ（コマンド名より前後どこにあってもよい）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalFlags {
    /// 機械可読JSONを stdout に出力する
    pub machine: bool,
    /// 認証情報を stdin から読む
    pub stdin: bool,
}

/// グローバルフラグを取り除いた引数とフラグを返す
///
/// `args[0]` はプログラム名として残す。
pub fn split_flags(args: &[String]) -> (Vec<String>, GlobalFlags) {
    let mut flags = GlobalFlags::default();
    let rest = args
        .iter()
        .filter(|arg| match arg.as_str() {
            "--machine" => {
                flags.machine = true;
                false
            }
            "--stdin" => {
                flags.stdin = true;
                false
            }
            _ => true,
        })
        .cloned()
        .collect();
    (rest, flags)
}

/// CLI引数を解析し、適切なコマンドにディスパッチする
pub async fn parse_args(args: &[String], flags: GlobalFlags) -> Result<CommandResult> {
    let Some(command) = args.get(1) else {
        return Ok(commands::help::execute());
    };
    let arg = |idx: usize, what: &'static str| required(args, idx, what);
    let opt = |idx: usize| args.get(idx).map(String::as_str);
    let from_stdin = flags.stdin;

    match command.as_str() {
        "credits" => commands::credits::execute(from_stdin)
            .await
            .context("Credits command failed"),
        "list" => commands::list::execute(from_stdin)
            .await
            .context("List command failed"),
        "languages" => commands::languages::execute(opt(2)),
        "tts" => {
            let text = arg(2, "the text")?;
            let language = arg(3, "a language")?;
            let speaker = arg(4, "a speaker")?;
            let outfile = opt(5).unwrap_or(commands::tts::DEFAULT_OUTFILE);
            commands::tts::execute(text, language, speaker, outfile, from_stdin)
                .await
                .context("Text-to-speech command failed")
        }
        "generate" => {
            let video = arg(2, "a video file")?;
            let audio = arg(3, "an audio file")?;
            commands::generate::execute(video, audio, opt(4), from_stdin)
                .await
                .context("Generate command failed")
        }
        "download" => {
            let video_id = arg(2, "a video id")?;
            commands::download::execute_one(video_id, opt(3), from_stdin)
                .await
                .context("Download command failed")
        }
        "download-all" => commands::download::execute_all(opt(2), from_stdin)
            .await
            .context("Download-all command failed"),
        "samples" => commands::download::execute_samples(opt(2), from_stdin)
            .await
            .context("Samples command failed"),
        "actors" => commands::download::execute_actors(opt(2), from_stdin)
            .await
            .context("Actors command failed"),
        "trim-video" => commands::media::trim_video(
            arg(2, "a video file")?,
            arg(3, "a start time")?,
            arg(4, "an end time")?,
            opt(5),
        ),
        "trim-audio" => commands::media::trim_audio(
            arg(2, "an audio file")?,
            arg(3, "a start time")?,
            arg(4, "an end time")?,
            opt(5),
        ),
        "convert-audio" => {
            commands::media::convert_audio(arg(2, "an audio file")?, arg(3, "an output file")?)
        }
        "resolution" => commands::media::resolution(arg(2, "a video file")?),
        "fps" => commands::media::fps(arg(2, "a video file")?),
        "hhmmss" => commands::media::to_hhmmss(arg(2, "seconds")?),
        "secs" => commands::media::to_secs(arg(2, "a hh:mm:ss time")?),
        "help" => Ok(commands::help::execute()),
        _ => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            command
        ),
    }
}

/// 必須の位置引数を取得する
fn required<'a>(args: &'a [String], idx: usize, what: &str) -> Result<&'a str> {
    let command = args.get(1).map(String::as_str).unwrap_or_default();
    args.get(idx)
        .map(String::as_str)
        .with_context(|| format!("Please specify {} for '{}' command", what, command))
}
