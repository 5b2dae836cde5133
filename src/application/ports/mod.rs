mod audio_store;
mod transcription_engine;

pub use audio_store::{AudioStore, StagedAudio, StagingError};
pub use transcription_engine::{
    DecodingOptions, EngineOutput, TranscriptionEngine, TranscriptionError,
};
