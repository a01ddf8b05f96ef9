//! User-Visible Notice Channel
//!
//! Single-line status and warning messages. The pipeline never blocks on
//! acknowledgement; `log` carries the debug detail, notices carry what the
//! user is meant to see.

pub trait NoticeSink {
    fn message(&mut self, text: &str);
}

/// Notice sink for the CLI: one line per notice on stdout.
pub struct ConsoleNotice;

impl NoticeSink for ConsoleNotice {
    fn message(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Records notices for assertions. Test-only collaborator.
#[derive(Debug, Default)]
pub struct RecordingNotice {
    pub messages: Vec<String>,
}

impl NoticeSink for RecordingNotice {
    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}

impl RecordingNotice {
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}
