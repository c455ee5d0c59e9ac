use serde::{Deserialize, Serialize};

/// Decoded audio attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioField {
    /// Mono samples in `[-1, 1]`.
    pub array: Vec<f32>,
    /// Filename of the talk recording, relative to the split's `wav/` directory.
    pub path: String,
    pub sampling_rate: u32,
}

/// One aligned (audio, transcript, translation) example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleRecord {
    pub duration: f64,
    pub offset: f64,
    pub speaker_id: String,
    /// Talk recording the segment was cut from; shared by every sentence of a talk.
    pub doc_id: String,
    pub audio: AudioField,
    pub transcript: String,
    pub translation: String,
}
