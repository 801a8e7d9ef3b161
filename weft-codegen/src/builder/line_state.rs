//! Line machinery shared by every rendering path.
//!
//! Text is buffered as the pending line and committed to the output on a
//! line break or on any indent-stack change. The current indent is written
//! only when a commit starts a fresh output line, using the stack as it is
//! at commit time.

use crate::{Error, Result};

use super::format::align;

#[derive(Debug)]
pub struct LineState<'a> {
    output: String,
    pending: String,
    indents: Vec<String>,
    current_indent: String,
    at_line_start: bool,
    newline: &'a str,
}

impl<'a> LineState<'a> {
    pub fn new(newline: &'a str) -> Self {
        Self {
            output: String::new(),
            pending: String::new(),
            indents: Vec::new(),
            current_indent: String::new(),
            at_line_start: true,
            newline,
        }
    }

    /// Append text that contains no line breaks.
    pub fn append(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Append text, turning each `\n` (and a `\r` right before it) into a
    /// line break.
    pub fn append_multiline(&mut self, text: &str) {
        let mut segments = text.split('\n');
        if let Some(first) = segments.next() {
            let mut segment = first;
            for next in segments {
                self.append(segment.strip_suffix('\r').unwrap_or(segment));
                self.append_line();
                segment = next;
            }
            self.append(segment);
        }
    }

    /// Append text padded to `alignment`.
    pub fn append_aligned(&mut self, text: &str, alignment: Option<i32>) {
        match alignment {
            None => self.append(text),
            Some(_) => self.append(&align(text, alignment)),
        }
    }

    /// Commit the pending line and end it.
    pub fn append_line(&mut self) {
        self.commit();
        self.output.push_str(self.newline);
        self.at_line_start = true;
    }

    pub fn push_indent(&mut self, indent: &str) {
        self.commit();
        self.indents.push(indent.to_string());
        self.current_indent.push_str(indent);
    }

    /// Take the pending text as the next indent level.
    ///
    /// At the start of a line the text is not emitted as content: the next
    /// commit writes it as part of the indent instead. Mid-line it is
    /// written out first so nothing already on the line is lost.
    pub fn push_captured_indent(&mut self) {
        let captured = std::mem::take(&mut self.pending);
        if !self.at_line_start && !captured.is_empty() {
            self.output.push_str(&captured);
        }
        self.indents.push(captured.clone());
        self.current_indent.push_str(&captured);
    }

    pub fn pop_indent(&mut self) -> Result<()> {
        self.commit();
        let indent = self
            .indents
            .pop()
            .ok_or_else(|| Error::unbalanced("pop with empty indent stack"))?;
        self.current_indent
            .truncate(self.current_indent.len() - indent.len());
        Ok(())
    }

    /// Text appended to the current line but not yet committed.
    pub fn pending_line(&self) -> &str {
        &self.pending
    }

    /// The concatenation of every pushed indent.
    pub fn current_indent(&self) -> &str {
        &self.current_indent
    }

    /// Commit whatever is pending and return the output.
    pub fn finish(mut self) -> String {
        self.commit();
        self.output
    }

    fn commit(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        if self.at_line_start {
            self.output.push_str(&self.current_indent);
        }
        self.output.push_str(&self.pending);
        self.pending.clear();
        self.at_line_start = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_applies_at_line_start_only() {
        let mut state = LineState::new("\n");
        state.append("a");
        state.push_indent("  ");
        state.append("b");
        state.append_line();
        state.append("c");
        assert_eq!(state.finish(), "ab\n  c");
    }

    #[test]
    fn test_multiline_strips_carriage_return() {
        let mut state = LineState::new("\n");
        state.push_indent("    ");
        state.append_multiline("one\r\ntwo\nthree");
        assert_eq!(state.finish(), "    one\n    two\n    three");
    }

    #[test]
    fn test_lone_break_still_breaks() {
        let mut state = LineState::new("\n");
        state.append_multiline("\n");
        state.append_multiline("x");
        assert_eq!(state.finish(), "\nx");
    }

    #[test]
    fn test_blank_lines_carry_no_indent() {
        let mut state = LineState::new("\n");
        state.push_indent("    ");
        state.append_multiline("a\n\nb");
        assert_eq!(state.finish(), "    a\n\n    b");
    }

    #[test]
    fn test_captured_indent_is_not_duplicated() {
        let mut state = LineState::new("\n");
        state.append("    ");
        state.push_captured_indent();
        assert_eq!(state.pending_line(), "");
        state.append_multiline("first\nsecond");
        state.pop_indent().unwrap();
        state.append_line();
        assert_eq!(state.finish(), "    first\n    second\n");
    }

    #[test]
    fn test_capture_mid_line_keeps_text() {
        let mut state = LineState::new("\n");
        state.append("x = ");
        state.push_indent("");
        state.append("[ ");
        state.push_captured_indent();
        state.append_multiline("1,\n2 ]");
        state.pop_indent().unwrap();
        state.pop_indent().unwrap();
        assert_eq!(state.finish(), "x = [ 1,\n[ 2 ]");
    }

    #[test]
    fn test_pop_empty_stack_fails() {
        let mut state = LineState::new("\n");
        assert!(matches!(
            state.pop_indent(),
            Err(Error::UnbalancedIndentScope { .. })
        ));
    }

    #[test]
    fn test_crlf_newline() {
        let mut state = LineState::new("\r\n");
        state.append_multiline("a\nb\n");
        assert_eq!(state.finish(), "a\r\nb\r\n");
    }
}
