//! Newline framing for the raw serial byte stream.

/// Longest partial line kept while waiting for its terminator.
pub const MAX_LINE_LEN: usize = 4096;

/// Accumulates bytes and yields complete `\n`-terminated lines.
///
/// The terminator and an optional preceding `\r` are stripped. A partial
/// line longer than [`MAX_LINE_LEN`] is noise and gets discarded.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append freshly read bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);

        let tail_start = self
            .pending
            .iter()
            .rposition(|&byte| byte == b'\n')
            .map_or(0, |idx| idx + 1);
        let tail_len = self.pending.len() - tail_start;
        if tail_len > MAX_LINE_LEN {
            tracing::warn!(bytes = tail_len, "discarding unterminated serial input");
            self.pending.truncate(tail_start);
        }
    }

    /// Pop the oldest complete line, if any.
    pub fn next_line(&mut self) -> Option<Vec<u8>> {
        let end = self.pending.iter().position(|&byte| byte == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=end).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(line)
    }

    /// Number of buffered bytes not yet returned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_nothing_without_terminator() {
        let mut buffer = LineBuffer::new();
        buffer.extend(b"TEMP:25,HU");
        assert_eq!(buffer.next_line(), None);
        assert_eq!(buffer.len(), 10);
    }

    #[test]
    fn should_join_line_split_across_reads() {
        let mut buffer = LineBuffer::new();
        buffer.extend(b"TEMP:25,HU");
        buffer.extend(b"M:60\r\n");
        assert_eq!(buffer.next_line().as_deref(), Some(&b"TEMP:25,HUM:60"[..]));
        assert!(buffer.is_empty());
    }

    #[test]
    fn should_yield_lines_in_order() {
        let mut buffer = LineBuffer::new();
        buffer.extend(b"TEMP:1,HUM:2\r\nTEMP:3,HUM:4\nTEMP:5");
        assert_eq!(buffer.next_line().as_deref(), Some(&b"TEMP:1,HUM:2"[..]));
        assert_eq!(buffer.next_line().as_deref(), Some(&b"TEMP:3,HUM:4"[..]));
        assert_eq!(buffer.next_line(), None);
        assert_eq!(buffer.len(), 6);
    }

    #[test]
    fn should_yield_empty_line_for_bare_terminator() {
        let mut buffer = LineBuffer::new();
        buffer.extend(b"\r\n");
        assert_eq!(buffer.next_line(), Some(Vec::new()));
    }

    #[test]
    fn should_discard_oversized_partial_line() {
        let mut buffer = LineBuffer::new();
        buffer.extend(b"TEMP:1,HUM:2\n");
        buffer.extend(&[b'x'; MAX_LINE_LEN + 1]);
        assert_eq!(buffer.next_line().as_deref(), Some(&b"TEMP:1,HUM:2"[..]));
        assert!(buffer.is_empty());
    }

    #[test]
    fn should_keep_partial_line_at_limit() {
        let mut buffer = LineBuffer::new();
        buffer.extend(&[b'x'; MAX_LINE_LEN]);
        assert_eq!(buffer.len(), MAX_LINE_LEN);
    }
}
