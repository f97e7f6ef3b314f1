use std::path::Path;

use tokio::fs;

use crate::error::{Result, WrapperError};

/// Byte offset where the last `keep` lines of `content` begin.
///
/// A trailing newline terminates the last line rather than starting a new one.
pub fn tail_start(content: &[u8], keep: usize) -> usize {
    if keep == 0 {
        return content.len();
    }

    let body = content.strip_suffix(b"\n").unwrap_or(content);
    let mut seen = 0;
    for (i, byte) in body.iter().enumerate().rev() {
        if *byte == b'\n' {
            seen += 1;
            if seen == keep {
                return i + 1;
            }
        }
    }
    0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncateStats {
    pub removed_bytes: usize,
    pub kept_bytes: usize,
}

impl TruncateStats {
    pub fn is_noop(&self) -> bool {
        self.removed_bytes == 0
    }
}

/// Rewrite `path` so that only its last `keep` lines remain.
///
/// The whole file is read into memory. Files already within the limit are
/// left untouched.
pub async fn truncate_to_last_lines(path: &Path, keep: usize) -> Result<TruncateStats> {
    let log_error = |e: std::io::Error| WrapperError::LogFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let content = fs::read(path).await.map_err(log_error)?;
    let start = tail_start(&content, keep);
    let stats = TruncateStats {
        removed_bytes: start,
        kept_bytes: content.len() - start,
    };

    if !stats.is_noop() {
        fs::write(path, &content[start..]).await.map_err(log_error)?;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn numbered_lines(count: usize) -> String {
        (1..=count).map(|i| format!("line {}\n", i)).collect()
    }

    #[test]
    fn test_tail_start_keeps_last_lines() {
        let content = b"a\nb\nc\n";
        assert_eq!(&content[tail_start(content, 2)..], b"b\nc\n");
        assert_eq!(&content[tail_start(content, 1)..], b"c\n");
    }

    #[test]
    fn test_tail_start_without_trailing_newline() {
        let content = b"a\nb\nc";
        assert_eq!(&content[tail_start(content, 2)..], b"b\nc");
    }

    #[test]
    fn test_tail_start_short_content() {
        assert_eq!(tail_start(b"a\nb\n", 5), 0);
        assert_eq!(tail_start(b"a\nb\n", 2), 0);
        assert_eq!(tail_start(b"", 3), 0);
    }

    #[test]
    fn test_tail_start_keeps_blank_lines() {
        let content = b"a\n\n\nb\n";
        assert_eq!(&content[tail_start(content, 3)..], b"\n\nb\n");
    }

    #[test]
    fn test_tail_start_zero_keeps_nothing() {
        assert_eq!(tail_start(b"a\nb\n", 0), 4);
    }

    #[tokio::test]
    async fn test_truncate_to_last_lines() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(numbered_lines(1500).as_bytes()).unwrap();
        file.flush().unwrap();

        let stats = truncate_to_last_lines(file.path(), 1000).await.unwrap();
        assert!(!stats.is_noop());

        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1000);
        assert_eq!(lines[0], "line 501");
        assert_eq!(lines[999], "line 1500");
        assert!(content.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_truncate_short_file_is_untouched() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"only\ntwo lines").unwrap();
        file.flush().unwrap();

        let stats = truncate_to_last_lines(file.path(), 1000).await.unwrap();
        assert!(stats.is_noop());
        assert_eq!(
            std::fs::read_to_string(file.path()).unwrap(),
            "only\ntwo lines"
        );
    }

    #[tokio::test]
    async fn test_truncate_missing_file_fails() {
        let result = truncate_to_last_lines(Path::new("/nonexistent/backup.log"), 10).await;
        assert!(matches!(result, Err(WrapperError::LogFile { .. })));
    }
}
