use chrono::{DateTime, Local, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::config::SessionConfig;
use super::stats::SessionStats;
use crate::audio::{decode_frame, wav, AudioOrigin, MergeScope, TimelineStore};
use crate::sink::{ArtifactSink, SinkError};

/// MIME type of every artifact this recorder produces
pub const ARTIFACT_CONTENT_TYPE: &str = "audio/wav";

/// Recording lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Stopped,
}

/// A finished, ready-to-deliver WAV artifact.
///
/// Immutable once produced; preparing another scope yields a new value and
/// only overwrites the recorder's last-artifact cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// The complete WAV container
    pub bytes: Vec<u8>,
    /// Derived from session id, scope, and start time
    pub filename: String,
}

#[derive(Debug, Error)]
pub enum RecorderError {
    /// The requested scope selected zero segments
    #[error("no audio data recorded for scope '{}'", .0.label())]
    NoAudioData(MergeScope),

    #[error(transparent)]
    Encode(#[from] wav::EncodeError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Orchestrates a single capture session: owns the recording lifecycle,
/// session identity, the audio timeline, and the last prepared artifact.
///
/// All mutating operations take `&mut self`, so one logical owner drives the
/// session at a time; share across tasks behind a single
/// `Arc<tokio::sync::Mutex<_>>`. Nothing here blocks or performs I/O — only
/// the artifact sink boundary does.
#[derive(Debug)]
pub struct SessionRecorder {
    config: SessionConfig,
    state: RecorderState,
    session_id: Option<Uuid>,
    started_at: Option<DateTime<Local>>,
    timeline: TimelineStore,
    last_artifact: Option<Artifact>,
}

impl SessionRecorder {
    pub fn new(config: SessionConfig) -> Self {
        info!(sample_rate = config.sample_rate, "Capture session created");

        Self {
            config,
            state: RecorderState::Idle,
            session_id: None,
            started_at: None,
            timeline: TimelineStore::new(),
            last_artifact: None,
        }
    }

    /// Begin a new recording. Start always wins: calling this while already
    /// recording discards the in-flight session and begins a fresh one.
    pub fn start(&mut self) {
        if self.state == RecorderState::Recording {
            warn!("Recording already active, starting a fresh session");
        }

        self.timeline.clear();
        self.last_artifact = None;

        let session_id = Uuid::new_v4();
        self.session_id = Some(session_id);
        self.started_at = Some(Local::now());
        self.state = RecorderState::Recording;

        info!(session_id = %session_id, "Recording started");
    }

    /// Stop recording. With at least one segment on the timeline, the full
    /// conversation is merged, encoded, and cached as the last prepared
    /// artifact; stopping with no data is valid and caches nothing.
    pub fn stop(&mut self) -> Result<(), RecorderError> {
        if self.state != RecorderState::Recording {
            warn!("Recording not active");
            return Ok(());
        }

        self.state = RecorderState::Stopped;

        if !self.timeline.is_empty() {
            let artifact = self.build_artifact(MergeScope::All)?;
            info!(
                filename = %artifact.filename,
                bytes = artifact.bytes.len(),
                "Recording stopped, conversation artifact prepared"
            );
            self.last_artifact = Some(artifact);
        } else {
            info!("Recording stopped with no audio data");
        }

        Ok(())
    }

    /// Return to idle, discarding all segments, the pending remnant, the
    /// session identity, and any cached artifact.
    pub fn clear(&mut self) {
        self.timeline.clear();
        self.last_artifact = None;
        self.session_id = None;
        self.started_at = None;
        self.state = RecorderState::Idle;

        info!("Session cleared");
    }

    /// Append a burst of locally captured samples.
    ///
    /// Outside the recording state this is a no-op: capture shutdown and
    /// in-flight callbacks race benignly.
    pub fn add_local_audio(&mut self, samples: &[i16]) {
        if self.state != RecorderState::Recording {
            return;
        }
        self.timeline.append(AudioOrigin::Local, samples);
    }

    /// Append a base64-encoded remote audio frame.
    ///
    /// A malformed frame is dropped and logged; losing one frame of a long
    /// session is preferable to losing the whole session.
    pub fn add_remote_audio(&mut self, encoded: &str) {
        if self.state != RecorderState::Recording {
            return;
        }
        match decode_frame(encoded) {
            Ok(bytes) => {
                self.timeline.append_remote_bytes(&bytes);
            }
            Err(e) => {
                warn!("Dropping malformed remote audio frame: {}", e);
            }
        }
    }

    /// Merge and encode the given scope into a named artifact, overwriting
    /// the last-artifact cache. Callable in any state once audio exists.
    pub fn prepare_artifact(&mut self, scope: MergeScope) -> Result<Artifact, RecorderError> {
        let artifact = self.build_artifact(scope)?;
        self.last_artifact = Some(artifact.clone());
        Ok(artifact)
    }

    /// Prepare an artifact and hand it to the sink. The sink's failure, if
    /// any, passes through unchanged.
    pub async fn export_artifact(
        &mut self,
        scope: MergeScope,
        sink: &dyn ArtifactSink,
    ) -> Result<String, RecorderError> {
        let artifact = self.prepare_artifact(scope)?;
        let location = sink
            .deliver(&artifact.bytes, &artifact.filename, ARTIFACT_CONTENT_TYPE)
            .await?;

        info!(
            sink = sink.name(),
            location = %location,
            "Artifact delivered"
        );

        Ok(location)
    }

    fn build_artifact(&self, scope: MergeScope) -> Result<Artifact, RecorderError> {
        let samples = self.timeline.merge(scope);
        if samples.is_empty() {
            return Err(RecorderError::NoAudioData(scope));
        }

        let bytes = wav::encode(&samples, self.config.sample_rate)?;
        Ok(Artifact {
            bytes,
            filename: self.artifact_filename(scope),
        })
    }

    /// `convo_<session-id>[_<scope>]_<yyyy-mm-dd HH_MM_SS>.wav`
    fn artifact_filename(&self, scope: MergeScope) -> String {
        let session_id = self.session_id.unwrap_or_else(Uuid::new_v4);
        let started_at = self.started_at.unwrap_or_else(Local::now);
        let scope_suffix = scope
            .suffix()
            .map(|s| format!("_{}", s))
            .unwrap_or_default();

        format!(
            "convo_{}{}_{}.wav",
            session_id,
            scope_suffix,
            started_at.format("%Y-%m-%d %H_%M_%S")
        )
    }

    /// Current session statistics, computed from running counters
    pub fn stats(&self) -> SessionStats {
        let timeline = self.timeline.stats();
        let total_bytes = timeline.local_bytes + timeline.remote_bytes;
        let sample_rate = self.config.sample_rate;

        SessionStats {
            is_recording: self.state == RecorderState::Recording,
            started_at: self.started_at.map(|t| t.with_timezone(&Utc)),
            total_duration_secs: duration_secs(total_bytes, sample_rate),
            local_duration_secs: duration_secs(timeline.local_bytes, sample_rate),
            remote_duration_secs: duration_secs(timeline.remote_bytes, sample_rate),
            total_bytes,
            local_bytes: timeline.local_bytes,
            remote_bytes: timeline.remote_bytes,
            segment_count: timeline.segment_count,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    pub fn has_data(&self) -> bool {
        !self.timeline.is_empty()
    }

    pub fn has_ready_artifact(&self) -> bool {
        self.last_artifact.is_some()
    }

    /// The most recently prepared artifact, if any
    pub fn last_artifact(&self) -> Option<&Artifact> {
        self.last_artifact.as_ref()
    }
}

/// PCM16 duration: bytes / 2 / sample rate, two-decimal precision
fn duration_secs(bytes: usize, sample_rate: u32) -> f64 {
    let secs = bytes as f64 / 2.0 / sample_rate as f64;
    (secs * 100.0).round() / 100.0
}
