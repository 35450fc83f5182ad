//! Player-facing narration.
//!
//! Handlers never print directly; they append lines here and the front end
//! decides where the text goes.

/// Ordered lines of game text.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line.
    pub fn say(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Take every line written so far, leaving the transcript empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties() {
        let mut transcript = Transcript::new();
        transcript.say("You move north.");
        transcript.blank();

        assert!(transcript.contains("north"));
        assert_eq!(transcript.drain(), vec!["You move north.".to_string(), String::new()]);
        assert!(transcript.is_empty());
    }
}
