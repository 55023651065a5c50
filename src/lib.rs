//! DeepWord client library
//!
//! Authenticates against the DeepWord synthetic-video service, converts text
//! to speech, uploads a talking-head video plus audio for generation, and
//! downloads the generated videos and reference assets. The `media` module
//! wraps ffmpeg/ffprobe for local trimming, probing and audio conversion.
//!
//! ```rust,no_run
//! use deepword::{Credentials, DeepWordSession, TransportConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new("api-key", "secret-key")?;
//! let session = DeepWordSession::connect(credentials, TransportConfig::production()).await?;
//! println!("credits: {}", session.available_credits().await?);
//! session
//!     .text_to_speech("Hello there", "English (US)", "Wavenet-A Male", "hello.mp3")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod error_severity;
pub mod media;

pub use api::{ApiError, Credentials, DeepWordSession, DownloadReport, TransportConfig, VideoRecord};
pub use domain::{DomainError, LanguageCatalog};
pub use error_severity::ErrorSeverity;
pub use media::MediaError;
