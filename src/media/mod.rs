//! ローカルメディアユーティリティ
//!
//! セッションとは独立した同期関数群。処理は ffmpeg / ffprobe に委譲し、
//! 失敗はすべて `MediaError` として返す。

pub mod edit;
pub mod error;
pub mod probe;
pub mod time;
pub mod tool;

pub use edit::{change_audio_format, trim_audio, trim_video};
pub use error::MediaError;
pub use probe::{Resolution, check_fps, check_resolution, probe_duration};
pub use time::{to_hhmmss, to_secs};
pub use tool::MediaTools;
