pub mod audio;
pub mod config;
pub mod session;
pub mod sink;

pub use audio::{
    decode_frame, AudioOrigin, AudioSegment, DecodeError, EncodeError, MergeScope, TimelineStats,
    TimelineStore,
};
pub use config::Config;
pub use session::{
    Artifact, RecorderError, RecorderState, SessionConfig, SessionRecorder, SessionStats,
    ARTIFACT_CONTENT_TYPE, DEFAULT_SAMPLE_RATE,
};
pub use sink::{ArtifactSink, FsSink, SinkError};
