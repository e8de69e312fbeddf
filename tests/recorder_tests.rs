// Integration tests for the capture session lifecycle
//
// These tests drive the recorder the way the host environment does: local
// samples and base64 remote frames arrive while recording, then the merged
// timeline is exported as a WAV artifact.

use anyhow::Result;
use base64::Engine;
use convo_capture::{MergeScope, RecorderError, RecorderState, SessionConfig, SessionRecorder};
use std::io::Cursor;

fn encode_frame(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn read_samples(wav_bytes: &[u8]) -> Result<(hound::WavSpec, Vec<i16>)> {
    let reader = hound::WavReader::new(Cursor::new(wav_bytes))?;
    let spec = reader.spec();
    let samples = reader.into_samples::<i16>().collect::<Result<Vec<_>, _>>()?;
    Ok((spec, samples))
}

#[test]
fn test_stop_produces_conversation_artifact() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());
    recorder.start();

    recorder.add_local_audio(&[100, 200]);
    // Samples 300 and 400 as little-endian PCM bytes
    recorder.add_remote_audio(&encode_frame(&[0x2C, 0x01, 0x90, 0x01]));

    recorder.stop()?;
    assert_eq!(recorder.state(), RecorderState::Stopped);
    assert!(recorder.has_ready_artifact());

    let artifact = recorder.last_artifact().expect("artifact should be cached");
    assert_eq!(artifact.bytes.len(), 52); // 44-byte header + 4 samples

    let (spec, samples) = read_samples(&artifact.bytes)?;
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 24000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(samples, vec![100, 200, 300, 400]);

    Ok(())
}

#[test]
fn test_appends_outside_recording_are_ignored() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());

    // Idle: nothing lands
    recorder.add_local_audio(&[1, 2, 3]);
    recorder.add_remote_audio(&encode_frame(&[0x01, 0x02]));
    assert!(!recorder.has_data());

    recorder.start();
    recorder.add_local_audio(&[1, 2, 3]);
    recorder.stop()?;

    // Stopped: late capture callbacks are benign no-ops
    recorder.add_local_audio(&[4, 5, 6]);
    assert_eq!(recorder.stats().segment_count, 1);

    Ok(())
}

#[test]
fn test_start_always_wins() {
    let mut recorder = SessionRecorder::new(SessionConfig::default());

    recorder.start();
    let first_id = recorder.session_id();
    recorder.add_local_audio(&[1, 2, 3]);

    // Restarting mid-recording discards in-flight segments and re-keys the
    // session
    recorder.start();
    assert!(recorder.is_recording());
    assert!(!recorder.has_data());
    assert!(!recorder.has_ready_artifact());
    assert_ne!(recorder.session_id(), first_id);
}

#[test]
fn test_prepare_is_idempotent() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());
    recorder.start();
    recorder.add_local_audio(&[7, 8, 9]);
    recorder.stop()?;

    let first = recorder.prepare_artifact(MergeScope::All)?;
    let second = recorder.prepare_artifact(MergeScope::All)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_empty_session_guard() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());
    recorder.start();

    assert!(matches!(
        recorder.prepare_artifact(MergeScope::All),
        Err(RecorderError::NoAudioData(MergeScope::All))
    ));

    // Stopping with no data is valid and caches nothing
    recorder.stop()?;
    assert!(!recorder.has_ready_artifact());

    Ok(())
}

#[test]
fn test_scope_selects_only_matching_origin() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());
    recorder.start();

    recorder.add_local_audio(&[10, 20]);
    recorder.add_remote_audio(&encode_frame(&[0x2C, 0x01])); // 300
    recorder.add_local_audio(&[30]);
    recorder.stop()?;

    let local = recorder.prepare_artifact(MergeScope::LocalOnly)?;
    let (_, samples) = read_samples(&local.bytes)?;
    assert_eq!(samples, vec![10, 20, 30]);
    assert!(local.filename.contains("_local_"));

    let remote = recorder.prepare_artifact(MergeScope::RemoteOnly)?;
    let (_, samples) = read_samples(&remote.bytes)?;
    assert_eq!(samples, vec![300]);
    assert!(remote.filename.contains("_remote_"));

    // A scope with no segments fails even though the session has data
    recorder.clear();
    recorder.start();
    recorder.add_local_audio(&[1]);
    assert!(matches!(
        recorder.prepare_artifact(MergeScope::RemoteOnly),
        Err(RecorderError::NoAudioData(MergeScope::RemoteOnly))
    ));

    Ok(())
}

#[test]
fn test_malformed_remote_frame_is_dropped() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());
    recorder.start();

    recorder.add_remote_audio("definitely not base64!!");
    assert!(!recorder.has_data());

    // The session survives and keeps accepting audio
    recorder.add_remote_audio(&encode_frame(&[0x64, 0x00]));
    recorder.stop()?;

    let artifact = recorder.last_artifact().expect("artifact should be cached");
    let (_, samples) = read_samples(&artifact.bytes)?;
    assert_eq!(samples, vec![100]);

    Ok(())
}

#[test]
fn test_odd_remote_frames_never_lose_bytes() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());
    recorder.start();

    // [0x01] then [0x02, 0x03]: first sample is [0x01, 0x02], byte 0x03
    // waits for the next frame
    recorder.add_remote_audio(&encode_frame(&[0x01]));
    recorder.add_remote_audio(&encode_frame(&[0x02, 0x03]));
    recorder.add_remote_audio(&encode_frame(&[0x04]));
    recorder.stop()?;

    let artifact = recorder.last_artifact().expect("artifact should be cached");
    let (_, samples) = read_samples(&artifact.bytes)?;
    assert_eq!(samples, vec![0x0201, 0x0403]);

    Ok(())
}

#[test]
fn test_start_discards_pending_remnant() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());
    recorder.start();
    recorder.add_remote_audio(&encode_frame(&[0x01]));

    recorder.start();
    recorder.add_remote_audio(&encode_frame(&[0x02, 0x03]));
    recorder.stop()?;

    let artifact = recorder.last_artifact().expect("artifact should be cached");
    let (_, samples) = read_samples(&artifact.bytes)?;
    // A surviving remnant would have produced 0x0201 instead
    assert_eq!(samples, vec![0x0302]);

    Ok(())
}

#[test]
fn test_stats_report_durations_and_counters() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());

    let idle = recorder.stats();
    assert!(!idle.is_recording);
    assert!(idle.started_at.is_none());
    assert_eq!(idle.total_bytes, 0);

    recorder.start();
    recorder.add_local_audio(&vec![0i16; 12_000]); // 0.5 s at 24 kHz
    let remote: Vec<u8> = vec![0; 12_000]; // 6000 samples = 0.25 s
    recorder.add_remote_audio(&encode_frame(&remote));

    let stats = recorder.stats();
    assert!(stats.is_recording);
    assert!(stats.started_at.is_some());
    assert_eq!(stats.local_bytes, 24_000);
    assert_eq!(stats.remote_bytes, 12_000);
    assert_eq!(stats.total_bytes, 36_000);
    assert_eq!(stats.local_duration_secs, 0.5);
    assert_eq!(stats.remote_duration_secs, 0.25);
    assert_eq!(stats.total_duration_secs, 0.75);
    assert_eq!(stats.segment_count, 2);

    recorder.stop()?;
    assert!(!recorder.stats().is_recording);

    Ok(())
}

#[test]
fn test_filename_embeds_session_id_and_start_time() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());
    recorder.start();
    recorder.add_local_audio(&[1]);

    let session_id = recorder.session_id().expect("recording has an id");
    let artifact = recorder.prepare_artifact(MergeScope::All)?;

    assert!(artifact.filename.starts_with("convo_"));
    assert!(artifact.filename.ends_with(".wav"));
    assert!(artifact.filename.contains(&session_id.to_string()));

    Ok(())
}

#[test]
fn test_clear_returns_to_idle() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig::default());
    recorder.start();
    recorder.add_local_audio(&[1, 2]);
    recorder.stop()?;
    assert!(recorder.has_ready_artifact());

    recorder.clear();
    assert_eq!(recorder.state(), RecorderState::Idle);
    assert!(!recorder.has_data());
    assert!(!recorder.has_ready_artifact());
    assert!(recorder.session_id().is_none());

    Ok(())
}

#[test]
fn test_custom_sample_rate_flows_into_artifact() -> Result<()> {
    let mut recorder = SessionRecorder::new(SessionConfig { sample_rate: 16_000 });
    recorder.start();
    recorder.add_local_audio(&[1, 2, 3]);
    recorder.stop()?;

    let artifact = recorder.last_artifact().expect("artifact should be cached");
    let (spec, _) = read_samples(&artifact.bytes)?;
    assert_eq!(spec.sample_rate, 16_000);

    Ok(())
}
