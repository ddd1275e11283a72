//! Input Master backend: accepts an audio upload, forwards it to a
//! speech-to-text service and returns the transcript as JSON.

pub mod asr;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
