//! Scrollable terminal output.
//!
//! The transcript is the headless output sink: the dispatcher writes lines
//! into it and the UI paints them. At most one suggestion block exists at a
//! time; rendering a new one replaces the previous one.

use std::collections::VecDeque;

const MAX_LINES: usize = 500;

pub const HINT_TEXT: &str = "Type 'help' to view a list of available commands.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineKind {
    Hint,
    Banner,
    Input,
    Output,
    Error,
}

#[derive(Clone, Debug)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

pub struct Transcript {
    lines: VecDeque<Line>,
    suggestions: Option<Vec<String>>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        let mut transcript = Self {
            lines: VecDeque::new(),
            suggestions: None,
        };
        transcript.push(LineKind::Hint, HINT_TEXT);
        transcript
    }

    fn push(&mut self, kind: LineKind, text: &str) {
        self.lines.push_back(Line {
            kind,
            text: text.to_string(),
        });
        while self.lines.len() > MAX_LINES {
            self.lines.pop_front();
        }
    }

    pub fn push_output(&mut self, text: &str) {
        self.push(LineKind::Output, text);
    }

    pub fn push_error(&mut self, text: &str) {
        self.push(LineKind::Error, text);
    }

    /// Records a frozen prompt line (prompt string plus submitted input).
    pub fn push_input(&mut self, text: &str) {
        self.push(LineKind::Input, text);
    }

    pub fn push_banner(&mut self, text: &str) {
        self.push(LineKind::Banner, text);
    }

    /// Replaces any current suggestion block with a new one.
    pub fn show_suggestions(&mut self, items: Vec<String>) {
        self.suggestions = Some(items);
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions = None;
    }

    pub fn suggestions(&self) -> Option<&[String]> {
        self.suggestions.as_deref()
    }

    /// Clears all rendered output, keeping the static hint line.
    pub fn clear_screen(&mut self) {
        self.lines.clear();
        self.suggestions = None;
        self.push(LineKind::Hint, HINT_TEXT);
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Last non-input output or error line, mostly for tests.
    pub fn last_output(&self) -> Option<&str> {
        self.lines
            .iter()
            .rev()
            .find(|l| matches!(l.kind, LineKind::Output | LineKind::Error))
            .map(|l| l.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_hint_line() {
        let transcript = Transcript::new();
        let first = transcript.lines().next().unwrap();
        assert_eq!(first.kind, LineKind::Hint);
        assert_eq!(first.text, HINT_TEXT);
    }

    #[test]
    fn new_suggestions_replace_old_ones() {
        let mut transcript = Transcript::new();
        transcript.show_suggestions(vec!["help".into(), "history".into()]);
        transcript.show_suggestions(vec!["theme".into()]);
        assert_eq!(transcript.suggestions(), Some(&["theme".to_string()][..]));
    }

    #[test]
    fn clear_screen_keeps_only_hint() {
        let mut transcript = Transcript::new();
        transcript.push_output("one");
        transcript.push_output("two");
        transcript.show_suggestions(vec!["help".into()]);
        transcript.clear_screen();
        assert_eq!(transcript.len(), 1);
        assert!(transcript.suggestions().is_none());
    }

    #[test]
    fn line_buffer_is_bounded() {
        let mut transcript = Transcript::new();
        for i in 0..MAX_LINES + 50 {
            transcript.push_output(&format!("line {i}"));
        }
        assert_eq!(transcript.len(), MAX_LINES);
    }
}
