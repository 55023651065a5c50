pub mod credits;
pub mod download;
pub mod generate;
pub mod help;
pub mod languages;
pub mod list;
pub mod media;
pub mod result;
pub mod session;
pub mod tts;

pub use result::CommandResult;
