//! Voice practice: grade a spoken reading of a reference text.
//!
//! The core is [`compare`], a word-level aligner and scorer that compares a
//! reference passage with a speech-recognition transcript and reports which
//! reference words were read correctly, substituted, or skipped.  Around it:
//!
//! * [`config`]: TOML settings under the platform config directory.
//! * [`history`]: JSON log of practice attempts.
//! * [`practice`]: lesson paging and the async attempt runner.
//! * [`stt`]: the speech-to-text seam and an external-command backend.

pub mod compare;
pub mod config;
pub mod history;
pub mod practice;
pub mod stt;
