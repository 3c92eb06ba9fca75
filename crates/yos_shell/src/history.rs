//! Prompt history recall.

/// Recall over past non-empty inputs, most recent first. The in-progress
/// draft is stashed on the first "previous" step and restored when stepping
/// back past the most recent entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
    draft: Option<String>,
}

impl InputHistory {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn record_entry(&mut self, text: String) {
        self.entries.push(text);
        self.cursor = None;
        self.draft = None;
    }

    pub fn reset_navigation(&mut self) {
        self.cursor = None;
        self.draft = None;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.draft = None;
    }

    pub fn previous(&mut self, current_input: &str) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        if self.cursor.is_some_and(|index| index >= self.entries.len()) {
            self.cursor = None;
        }

        if self.cursor.is_none() {
            self.draft = Some(current_input.to_string());
        }

        let new_cursor = match self.cursor {
            Some(index) if index > 0 => index - 1,
            Some(index) => index,
            None => self.entries.len() - 1,
        };

        self.cursor = Some(new_cursor);
        Some(self.entries[new_cursor].clone())
    }

    pub fn next(&mut self) -> Option<String> {
        let current = self.cursor?;

        if current >= self.entries.len() || current + 1 >= self.entries.len() {
            self.cursor = None;
            return Some(self.draft.take().unwrap_or_default());
        }

        let next = current + 1;
        self.cursor = Some(next);
        Some(self.entries[next].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::InputHistory;

    fn seeded() -> InputHistory {
        let mut history = InputHistory::default();
        history.record_entry("ls".to_string());
        history.record_entry("pwd".to_string());
        history.record_entry("cat resume.pdf".to_string());
        history
    }

    #[test]
    fn previous_walks_most_recent_first_and_pins_at_oldest() {
        let mut history = seeded();
        assert_eq!(history.previous(""), Some("cat resume.pdf".to_string()));
        assert_eq!(history.previous(""), Some("pwd".to_string()));
        assert_eq!(history.previous(""), Some("ls".to_string()));
        // Past the oldest entry is a no-op that keeps returning it.
        assert_eq!(history.previous(""), Some("ls".to_string()));
    }

    #[test]
    fn next_restores_the_draft_past_the_newest_entry() {
        let mut history = seeded();
        assert_eq!(history.previous("tre"), Some("cat resume.pdf".to_string()));
        assert_eq!(history.previous("ignored"), Some("pwd".to_string()));
        assert_eq!(history.next(), Some("cat resume.pdf".to_string()));
        assert_eq!(history.next(), Some("tre".to_string()));
        // Not recalling: a further "next" is a no-op.
        assert_eq!(history.next(), None);
    }

    #[test]
    fn previous_on_empty_history_is_a_noop() {
        let mut history = InputHistory::default();
        assert_eq!(history.previous("draft"), None);
        assert_eq!(history.next(), None);
    }

    #[test]
    fn recording_resets_navigation() {
        let mut history = seeded();
        let _ = history.previous("draft");
        history.record_entry("tree".to_string());
        assert_eq!(history.previous(""), Some("tree".to_string()));
    }
}
