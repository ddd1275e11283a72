pub mod factory;
pub mod interface;
pub mod openai_whisper;

pub use factory::TranscriberFactory;
pub use interface::{AudioUpload, Transcriber, TranscriptionError};
pub use openai_whisper::OpenAiWhisperClient;
