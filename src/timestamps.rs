//! Inline `[MM:SS]` markers in assistant text.
//!
//! Answers from the backend cite moments of the video as bracketed two-digit
//! minute/second pairs. [`tokenize`] splits a message into plain text and
//! timestamp segments so the chat view can render the markers as seek buttons.

/// Length of a marker such as `[02:15]`.
const MARKER_LEN: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Timestamp { literal: &'a str, seconds: u32 },
}

impl<'a> Segment<'a> {
    /// The exact slice of the input this segment covers.
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Text(text) => text,
            Segment::Timestamp { literal, .. } => literal,
        }
    }

    pub fn seconds(&self) -> Option<u32> {
        match self {
            Segment::Text(_) => None,
            Segment::Timestamp { seconds, .. } => Some(*seconds),
        }
    }
}

/// Split `text` into plain and timestamp segments, left to right.
///
/// Markers never overlap and carry no range check: `[99:99]` is 6039 seconds.
/// Empty text runs around markers are dropped; text without any marker comes
/// back as a single text segment, even when it is empty.
pub fn tokenize(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut run_start = 0;
    let mut index = 0;

    while index + MARKER_LEN <= bytes.len() {
        match marker_seconds(&bytes[index..index + MARKER_LEN]) {
            Some(seconds) => {
                if run_start < index {
                    segments.push(Segment::Text(&text[run_start..index]));
                }
                segments.push(Segment::Timestamp {
                    literal: &text[index..index + MARKER_LEN],
                    seconds,
                });
                index += MARKER_LEN;
                run_start = index;
            }
            None => index += 1,
        }
    }

    if segments.is_empty() {
        return vec![Segment::Text(text)];
    }
    if run_start < text.len() {
        segments.push(Segment::Text(&text[run_start..]));
    }
    segments
}

fn marker_seconds(window: &[u8]) -> Option<u32> {
    match window {
        [b'[', m1, m2, b':', s1, s2, b']'] => {
            let minutes = two_digits(*m1, *m2)?;
            let seconds = two_digits(*s1, *s2)?;
            Some(minutes * 60 + seconds)
        }
        _ => None,
    }
}

fn two_digits(tens: u8, ones: u8) -> Option<u32> {
    if tens.is_ascii_digit() && ones.is_ascii_digit() {
        Some(u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
    } else {
        None
    }
}

/// Format a playback position as `MM:SS`, the label the backend uses for sources.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
