use super::file_ops::tail_start;

/// The last `count` lines of `s`, borrowed.
pub fn tail_lines(s: &str, count: usize) -> &str {
    // Offsets from `tail_start` follow a '\n', so they are char boundaries.
    &s[tail_start(s.as_bytes(), count)..]
}
