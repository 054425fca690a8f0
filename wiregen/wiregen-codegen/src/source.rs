use std::fmt::Display;

const INDENT: &str = "    ";

/// Indentation-aware line buffer for generated source.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, text: impl Display) {
        let text = text.to_string();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(&text);
        }
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `text` and indent everything after it.
    pub(crate) fn open(&mut self, text: impl Display) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedent, then write `text`.
    pub(crate) fn close(&mut self, text: impl Display) {
        debug_assert!(self.depth > 0, "unbalanced close");
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// `} else {` style: dedent, write, indent again.
    pub(crate) fn reopen(&mut self, text: impl Display) {
        self.close(text);
        self.depth += 1;
    }

    pub(crate) fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0, "unclosed block");
        self.out
    }
}
