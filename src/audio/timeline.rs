// Arrival-ordered ledger of PCM16 audio segments
//
// Local capture and remote playback run concurrently in the host
// environment, and rapid successive frames can land within the same clock
// tick. Ordering therefore hangs off an explicit sequence counter assigned
// at append time, not wall-clock timestamps.

/// Which stream a segment of audio came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioOrigin {
    /// Produced locally by the microphone pipeline
    Local,
    /// Produced remotely by the speech-generation service
    Remote,
}

/// Selection filter applied when merging the timeline into an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeScope {
    All,
    LocalOnly,
    RemoteOnly,
}

impl MergeScope {
    pub fn matches(&self, origin: AudioOrigin) -> bool {
        match self {
            MergeScope::All => true,
            MergeScope::LocalOnly => origin == AudioOrigin::Local,
            MergeScope::RemoteOnly => origin == AudioOrigin::Remote,
        }
    }

    /// Filename suffix for this scope; the full conversation carries none
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            MergeScope::All => None,
            MergeScope::LocalOnly => Some("local"),
            MergeScope::RemoteOnly => Some("remote"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MergeScope::All => "all",
            MergeScope::LocalOnly => "local",
            MergeScope::RemoteOnly => "remote",
        }
    }
}

/// One contiguous burst of samples appended in a single call
#[derive(Debug, Clone)]
pub struct AudioSegment {
    /// Stream the segment came from
    pub origin: AudioOrigin,
    /// Owned PCM16 samples, copied at append time
    pub samples: Vec<i16>,
    /// Authoritative chronological position within the session
    pub arrival_sequence: u64,
}

/// O(1) accounting snapshot derived from running counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineStats {
    pub local_bytes: usize,
    pub remote_bytes: usize,
    pub segment_count: usize,
}

/// Append-only, arrival-ordered store of audio segments.
///
/// Segments are tagged by origin and carry a strictly increasing
/// `arrival_sequence`. Remote audio enters as raw bytes; an odd trailing
/// byte is held back and prepended to the next remote frame so every stored
/// segment stays sample-aligned without ever dropping a byte.
#[derive(Debug, Default)]
pub struct TimelineStore {
    segments: Vec<AudioSegment>,
    next_sequence: u64,
    /// Carried-over byte from an odd-length remote frame
    pending_remote_byte: Option<u8>,
    local_bytes: usize,
    remote_bytes: usize,
}

impl TimelineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment of samples. Empty input is a no-op and consumes no
    /// sequence number. Returns the assigned arrival sequence.
    pub fn append(&mut self, origin: AudioOrigin, samples: &[i16]) -> Option<u64> {
        if samples.is_empty() {
            return None;
        }
        Some(self.push_segment(origin, samples.to_vec()))
    }

    /// Append remote audio as raw little-endian PCM bytes.
    ///
    /// Any pending remnant byte is prepended first; if the combined length
    /// is odd, the final byte becomes the new remnant. Returns the assigned
    /// arrival sequence, or None when nothing sample-aligned remained.
    pub fn append_remote_bytes(&mut self, raw: &[u8]) -> Option<u64> {
        let mut bytes = Vec::with_capacity(raw.len() + 1);
        if let Some(carried) = self.pending_remote_byte.take() {
            bytes.push(carried);
        }
        bytes.extend_from_slice(raw);

        if bytes.len() % 2 == 1 {
            self.pending_remote_byte = bytes.pop();
        }
        if bytes.is_empty() {
            return None;
        }

        let samples: Vec<i16> = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Some(self.push_segment(AudioOrigin::Remote, samples))
    }

    fn push_segment(&mut self, origin: AudioOrigin, samples: Vec<i16>) -> u64 {
        let arrival_sequence = self.next_sequence;
        self.next_sequence += 1;

        match origin {
            AudioOrigin::Local => self.local_bytes += samples.len() * 2,
            AudioOrigin::Remote => self.remote_bytes += samples.len() * 2,
        }

        self.segments.push(AudioSegment {
            origin,
            samples,
            arrival_sequence,
        });

        arrival_sequence
    }

    /// Concatenate all matching segments in arrival order.
    ///
    /// Segments are stored in append order and sequences are strictly
    /// increasing, so filtering preserves chronology. An empty result is a
    /// valid value, not an error.
    pub fn merge(&self, scope: MergeScope) -> Vec<i16> {
        self.segments
            .iter()
            .filter(|segment| scope.matches(segment.origin))
            .flat_map(|segment| segment.samples.iter().copied())
            .collect()
    }

    pub fn stats(&self) -> TimelineStats {
        TimelineStats {
            local_bytes: self.local_bytes,
            remote_bytes: self.remote_bytes,
            segment_count: self.segments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Discard all segments, counters, and any pending remnant byte
    pub fn clear(&mut self) {
        self.segments.clear();
        self.next_sequence = 0;
        self.pending_remote_byte = None;
        self.local_bytes = 0;
        self.remote_bytes = 0;
    }
}
