//! Stdin chunk reassembly.
//!
//! Terminal input arrives in arbitrary chunks; an escape sequence can be
//! split across reads. `StdinBuffer` holds an incomplete tail until it
//! completes or a hold deadline passes, and carves bracketed paste out into
//! its own event so pasted bytes are never key-parsed.

use std::time::{Duration, Instant};

const PASTE_START: &str = "\x1b[200~";
const PASTE_END: &str = "\x1b[201~";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdinEvent {
    Data(String),
    Paste(String),
}

/// Reassembles raw reads into complete key sequences and paste events.
pub struct StdinBuffer {
    pending: String,
    paste: Option<String>,
    hold_ms: u64,
    deadline: Option<Instant>,
}

impl StdinBuffer {
    pub fn new(hold_ms: u64) -> Self {
        Self {
            pending: String::new(),
            paste: None,
            hold_ms,
            deadline: None,
        }
    }

    pub fn process(&mut self, data: &[u8]) -> Vec<StdinEvent> {
        self.deadline = None;

        // Some terminals send alt-chords as one byte with the high bit set.
        let text = match data {
            &[byte] if byte > 127 => format!("\x1b{}", (byte - 128) as char),
            _ => String::from_utf8_lossy(data).into_owned(),
        };
        self.pending.push_str(&text);

        let mut events = Vec::new();
        self.drain_complete(&mut events);
        if !self.pending.is_empty() {
            self.deadline = Some(Instant::now() + Duration::from_millis(self.hold_ms));
        }
        events
    }

    /// Emits the buffered tail verbatim once its hold deadline has passed.
    /// Bytes are never dropped; a malformed tail leaves as-is.
    pub fn flush_due(&mut self, now: Instant) -> Vec<StdinEvent> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.pending.is_empty() {
                    Vec::new()
                } else {
                    vec![StdinEvent::Data(std::mem::take(&mut self.pending))]
                }
            }
            _ => Vec::new(),
        }
    }

    /// Poll timeout that wakes in time for a pending flush deadline.
    pub fn next_timeout_ms(&self, now: Instant, default_ms: i32) -> i32 {
        let Some(deadline) = self.deadline else {
            return default_ms;
        };
        let remaining = deadline.saturating_duration_since(now).as_millis();
        let capped = remaining.min(default_ms.max(0) as u128) as i32;
        capped.max(0)
    }

    fn drain_complete(&mut self, events: &mut Vec<StdinEvent>) {
        loop {
            if let Some(paste) = self.paste.as_mut() {
                let Some(end) = self.pending.find(PASTE_END) else {
                    paste.push_str(&self.pending);
                    self.pending.clear();
                    return;
                };
                paste.push_str(&self.pending[..end]);
                self.pending.drain(..end + PASTE_END.len());
                let content = self.paste.take().unwrap_or_default();
                events.push(StdinEvent::Paste(content));
                continue;
            }
            if self.pending.is_empty() {
                return;
            }
            if self.pending.starts_with(PASTE_START) {
                self.pending.drain(..PASTE_START.len());
                self.paste = Some(String::new());
                continue;
            }
            match front_token_len(&self.pending) {
                Some(len) => {
                    let token: String = self.pending.drain(..len).collect();
                    events.push(StdinEvent::Data(token));
                }
                // Incomplete escape tail; wait for more bytes or the deadline.
                None => return,
            }
        }
    }
}

/// Byte length of the complete token at the front of `input`: one escape
/// sequence or one character. `None` means the tail may still grow.
fn front_token_len(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes[0] != 0x1b {
        return input.chars().next().map(char::len_utf8);
    }
    match bytes.get(1).copied() {
        // Bare ESC: held briefly in case it is the start of a sequence.
        None => None,
        // CSI: parameter and intermediate bytes, then a final byte 0x40-0x7e.
        Some(b'[') => bytes[2..]
            .iter()
            .position(|byte| (0x40..=0x7e).contains(byte))
            .map(|pos| pos + 3),
        // SS3 (ESC O x): arrows in application cursor mode.
        Some(b'O') => input[2..].chars().next().map(|ch| 2 + ch.len_utf8()),
        // Alt chord: ESC plus one character.
        Some(_) => input[1..].chars().next().map(|ch| 1 + ch.len_utf8()),
    }
}

#[cfg(test)]
mod tests {
    use super::{StdinBuffer, StdinEvent};
    use std::time::{Duration, Instant};

    fn data(text: &str) -> StdinEvent {
        StdinEvent::Data(text.to_string())
    }

    #[test]
    fn csi_split_across_reads_reassembles() {
        let mut buffer = StdinBuffer::new(10);

        assert!(buffer.process(b"\x1b").is_empty());
        assert!(buffer.process(b"[1;5").is_empty());
        assert_eq!(buffer.process(b"C"), vec![data("\x1b[1;5C")]);
    }

    #[test]
    fn ss3_and_alt_chords_complete_with_one_more_byte() {
        let mut buffer = StdinBuffer::new(10);

        assert!(buffer.process(b"\x1bO").is_empty());
        assert_eq!(buffer.process(b"A"), vec![data("\x1bOA")]);
        assert_eq!(buffer.process(b"\x1bx"), vec![data("\x1bx")]);
    }

    #[test]
    fn incomplete_tail_flushes_verbatim_after_the_deadline() {
        let mut buffer = StdinBuffer::new(10);

        assert!(buffer.process(b"\x1b[").is_empty());
        let early = buffer.flush_due(Instant::now());
        assert!(early.is_empty(), "tail must not flush before the deadline");

        let flushed = buffer.flush_due(Instant::now() + Duration::from_millis(20));
        assert_eq!(flushed, vec![data("\x1b[")]);

        let again = buffer.flush_due(Instant::now() + Duration::from_millis(40));
        assert!(again.is_empty(), "flush must be idempotent");
    }

    #[test]
    fn paste_is_segmented_even_when_split_across_reads() {
        let mut buffer = StdinBuffer::new(10);

        assert!(buffer.process(b"\x1b[200~hel").is_empty());
        let events = buffer.process(b"lo\x1b[201~");
        assert_eq!(events, vec![StdinEvent::Paste("hello".to_string())]);
    }

    #[test]
    fn mixed_chunks_preserve_order_without_drop_or_duplicate() {
        let mut buffer = StdinBuffer::new(10);
        let mut events = Vec::new();

        events.extend(buffer.process(b"a"));
        events.extend(buffer.process(b"\x1b[200~xy"));
        events.extend(buffer.process(b"\x1b[201~\x1b[A\x1b[1;5"));
        events.extend(buffer.process(b"Cb"));

        assert_eq!(
            events,
            vec![
                data("a"),
                StdinEvent::Paste("xy".to_string()),
                data("\x1b[A"),
                data("\x1b[1;5C"),
                data("b"),
            ]
        );
        let leftover = buffer.flush_due(Instant::now() + Duration::from_millis(100));
        assert!(leftover.is_empty(), "unexpected buffered data");
    }

    #[test]
    fn high_bit_meta_byte_decodes_as_an_escape_chord() {
        let mut buffer = StdinBuffer::new(10);
        assert_eq!(buffer.process(&[0xf8]), vec![data("\x1bx")]);
    }

    #[test]
    fn next_timeout_tracks_the_deadline_but_never_exceeds_the_default() {
        let mut buffer = StdinBuffer::new(10);
        let now = Instant::now();
        assert_eq!(buffer.next_timeout_ms(now, 50), 50);

        buffer.process(b"\x1b[");
        let timeout = buffer.next_timeout_ms(Instant::now(), 50);
        assert!((0..=10).contains(&timeout), "timeout was {timeout}");
    }
}
