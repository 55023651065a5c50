/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::CommandResult;
use anyhow::Result;

/// ヘルプテキスト（単一の情報源）
const HELP_TEXT: &str = "deepword
Generate synthetic talking videos with DeepWord from the command line

Usage:
  deepword [--machine] [--stdin] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for both success and error cases
  --stdin          - Read credentials from standard input
                     Format: line 1 = API key, line 2 = secret key
                     Otherwise DEEPWORD_API_KEY and DEEPWORD_SECRET_KEY are used

Account commands:
  credits                          - Show available credits
  list                             - List generated videos and their status
  tts <text> <language> <speaker> [outfile]
                                   - Convert text to speech (default: text2speech.mp3)
  languages [language]             - List languages, or the speakers of a language
  generate <video> <audio> [title] - Request a synthetic video (asynchronous)
  download <video_id> [folder]     - Download one finished video
  download-all [folder]            - Download every finished video
  samples [folder]                 - Download the reference audio samples
  actors [folder]                  - Download the reference video actors

Local media commands (require ffmpeg and ffprobe):
  trim-video <video> <start> <end> [outfile]
  trim-audio <audio> <start> <end> [outfile]
  convert-audio <audio> <outfile>  - Format inferred from the extensions
  resolution <video>               - Show height and width
  fps <video>                      - Show frame rate
  hhmmss <seconds>                 - Convert seconds to hh:mm:ss
  secs <hh:mm:ss>                  - Convert hh:mm:ss to seconds
  help                             - Display this help message

Times accept whole seconds or hh:mm:ss.

Exit codes:
  1 user error, 2 credential/config error, 3 system error, 4 video still processing";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
///
/// # Output
/// * `machine_output = false`: 人間向けの詳細メッセージ（stderr）
/// * `machine_output = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        output_machine_readable(result)
    } else {
        output_human_readable(result)
    }
}

/// 人間向けの詳細メッセージを出力（stderr）
///
/// すべての出力はstderrに送られ、stdoutはパイプライン用に予約されます。
fn output_human_readable(result: &CommandResult) -> Result<()> {
    match result {
        CommandResult::Credits(r) => {
            eprintln!("Available credits: {}", r.available_credits);
        }
        CommandResult::List(r) => {
            if r.total_count == 0 {
                eprintln!("No videos found.");
                eprintln!("Generate your first video with 'deepword generate <video> <audio>'");
            } else {
                eprintln!("Found {} video(s):", r.total_count);
                eprintln!();
                for (idx, video) in r.videos.iter().enumerate() {
                    eprintln!("---");
                    eprintln!("Video #{}", idx + 1);
                    eprintln!("ID:     {}", video.id);
                    eprintln!("Title:  {}", video.title);
                    eprintln!(
                        "Status: {}",
                        if video.status { "ready" } else { "processing" }
                    );
                    if let Some(url) = video.ready_url() {
                        eprintln!("URL:    {}", url);
                    }
                }
                eprintln!("---");
            }
        }
        CommandResult::Languages(r) => match &r.language {
            None => {
                eprintln!("Available languages:");
                for language in &r.entries {
                    eprintln!("  {}", language);
                }
            }
            Some(language) => {
                eprintln!("Speakers for {}:", language);
                for speaker in &r.entries {
                    eprintln!("  {}", speaker);
                }
            }
        },
        CommandResult::Generate(r) => {
            eprintln!("{}", result.success_message());
            eprintln!("Server response: {}", r.response);
            eprintln!();
            eprintln!("Check progress with 'deepword list' and download with 'deepword download <id>'.");
        }
        CommandResult::DownloadAll(r) | CommandResult::Samples(r) | CommandResult::Actors(r) => {
            eprintln!("{}", result.success_message());
            for path in &r.report.written {
                eprintln!("  {}", path.display());
            }
            if !r.report.skipped.is_empty() {
                eprintln!();
                eprintln!(
                    "Skipped {} video(s) still processing: {}",
                    r.report.skipped.len(),
                    r.report.skipped.join(", ")
                );
            }
        }
        CommandResult::Download(r) => {
            eprintln!("{}", result.success_message());
            eprintln!("Saved to: {}", r.path.display());
        }
        CommandResult::Tts(_)
        | CommandResult::TrimVideo(_)
        | CommandResult::TrimAudio(_)
        | CommandResult::ConvertAudio(_) => {
            eprintln!("{}", result.success_message());
        }
        CommandResult::Resolution(r) => {
            eprintln!(
                "{}: {}x{} (width x height)",
                r.path.display(),
                r.resolution.width,
                r.resolution.height
            );
        }
        CommandResult::Fps(r) => {
            eprintln!("{}: {:.3} fps", r.path.display(), r.fps);
        }
        CommandResult::Time(r) => {
            eprintln!("{}", r.output);
        }
        CommandResult::Help => print_usage(),
    }

    Ok(())
}

/// 機械可読JSONを出力（stdout）
fn output_machine_readable(result: &CommandResult) -> Result<()> {
    println!("{}", serde_json::to_string(&machine_json(result)?)?);
    Ok(())
}

/// 結果に "success": true を付けた JSON を組み立てる
fn machine_json(result: &CommandResult) -> Result<serde_json::Value> {
    let mut json = serde_json::to_value(result)?;
    if let Some(obj) = json.as_object_mut() {
        obj.insert("success".to_string(), serde_json::Value::Bool(true));
    }
    Ok(json)
}
