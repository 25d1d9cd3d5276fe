//! Speech-to-text seam.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │             Transcriber (trait)              │
//! │                                              │
//! │   ┌───────────┐      ┌────────────────────┐  │
//! │   │ SttConfig │─────▶│ CommandTranscriber │  │
//! │   └───────────┘      └─────────┬──────────┘  │
//! │                                ▼             │
//! │                     clip path → transcript   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use voice_practice::config::SttConfig;
//! use voice_practice::stt::{CommandTranscriber, Transcriber};
//!
//! let stt = CommandTranscriber::from_config(&SttConfig::default());
//! let text = stt.transcribe(Path::new("clip.wav"), "en").unwrap();
//! println!("{text}");
//! ```

pub mod command;
pub mod engine;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use command::CommandTranscriber;
pub use engine::{TranscribeError, Transcriber};

// test-only re-export so the practice tests can import MockTranscriber
// without `use voice_practice::stt::engine::MockTranscriber`.
#[cfg(test)]
pub use engine::MockTranscriber;
