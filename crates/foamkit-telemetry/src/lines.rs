//! Newline splitting for byte streams.
//!
//! # Design
//! - Accept arbitrary chunk boundaries; only complete lines are released.
//! - Trailing `\r` is dropped so CRLF output from containers reads cleanly.

/// Accumulates raw bytes and yields complete, trimmed lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    /// Append a chunk and return every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        self.drain_complete_lines()
    }

    /// Flush any trailing partial line.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.buffer).to_string();
        self.buffer.clear();
        Some(trim_line(&line))
    }

    fn drain_complete_lines(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut start = 0usize;
        for (idx, byte) in self.buffer.iter().enumerate() {
            if *byte == b'\n' {
                let line = String::from_utf8_lossy(&self.buffer[start..idx]);
                lines.push(trim_line(&line));
                start = idx.saturating_add(1);
            }
        }
        if start > 0 {
            self.buffer.drain(0..start);
        }
        lines
    }
}

fn trim_line(line: &str) -> String {
    line.trim_end_matches(['\r', '\n']).to_string()
}

#[cfg(test)]
mod tests {
    use super::LineBuffer;

    #[test]
    fn line_buffer_splits_on_newlines() {
        let mut buffer = LineBuffer::default();
        let lines = buffer.push(b"alpha\nbeta\n");
        assert_eq!(lines, vec!["alpha".to_string(), "beta".to_string()]);
        assert!(buffer.finish().is_none());
    }

    #[test]
    fn line_buffer_keeps_partial_line() {
        let mut buffer = LineBuffer::default();
        assert!(buffer.push(b"Time = 0.").is_empty());
        assert_eq!(buffer.push(b"005\nCourant"), vec!["Time = 0.005".to_string()]);
        assert_eq!(buffer.finish(), Some("Courant".to_string()));
    }

    #[test]
    fn line_buffer_trims_crlf() {
        let mut buffer = LineBuffer::default();
        let lines = buffer.push(b"alpha\r\n");
        assert_eq!(lines, vec!["alpha".to_string()]);
    }
}
