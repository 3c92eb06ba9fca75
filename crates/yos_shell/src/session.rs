//! Session state.
//!
//! Everything a terminal session owns lives here: the current path, the
//! transcript, and the recall history. No globals — two sessions never share
//! a cursor.

use crate::clock::{Clock, SystemClock};
use crate::command::{self, Action};
use crate::content::BANNER;
use crate::history::InputHistory;

pub const HOME: &str = "/home/yohannes";
pub const USER: &str = "yohannes";
pub const HOSTNAME: &str = "os";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub input: String,
    pub output: Vec<String>,
}

pub struct Session {
    pub(crate) current_path: String,
    pub(crate) transcript: Vec<TranscriptEntry>,
    pub(crate) history: InputHistory,
    pub(crate) clock: Box<dyn Clock>,
}

impl Session {
    /// Fresh session: home directory, welcome banner, empty history.
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            current_path: HOME.to_string(),
            transcript: vec![TranscriptEntry {
                input: String::new(),
                output: BANNER.iter().map(|line| line.to_string()).collect(),
            }],
            history: InputHistory::default(),
            clock,
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Box::new(SystemClock))
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// `yohannes@os:~$` — home and its descendants display with a `~` prefix.
    pub fn prompt(&self) -> String {
        let short = if self.current_path == HOME {
            "~".to_string()
        } else if let Some(rest) = self.current_path.strip_prefix(HOME) {
            format!("~{rest}")
        } else {
            self.current_path.clone()
        };
        format!("{USER}@{HOSTNAME}:{short}$")
    }

    /// Executes one submitted line. `clear` and `exit` short-circuit without
    /// recording a transcript entry; everything else records one regardless
    /// of success.
    pub fn execute(&mut self, raw: &str) -> Action {
        command::execute(self, raw)
    }

    pub fn recall_previous(&mut self, current_input: &str) -> Option<String> {
        self.history.previous(current_input)
    }

    pub fn recall_next(&mut self) -> Option<String> {
        self.history.next()
    }

    pub(crate) fn record(&mut self, input: &str, output: Vec<String>) {
        if !input.trim().is_empty() {
            self.history.record_entry(input.to_string());
        } else {
            self.history.reset_navigation();
        }
        self.transcript.push(TranscriptEntry {
            input: input.to_string(),
            output,
        });
    }
}
