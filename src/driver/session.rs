//! Driver Session
//!
//! Reads commands line by line and writes one JSON reply per line.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::driver::handlers::{dispatch, DriverState};

/// Totals for one finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Commands executed, including ones answered with an error reply
    pub commands: usize,
    /// Replies that were errors (misses, malformed lines)
    pub errors: usize,
}

/// Runs commands from `reader` until EOF, writing replies to `writer`.
///
/// Blank lines are skipped. Malformed lines and misses produce error replies
/// and never end the session; only I/O failures do.
pub async fn run_session<R, W>(
    state: &DriverState,
    reader: R,
    mut writer: W,
) -> io::Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = SessionSummary::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = dispatch(state, &line).await;
        summary.commands += 1;
        if reply.is_error() {
            summary.errors += 1;
        }

        let mut encoded = serde_json::to_vec(&reply)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
        debug!(command = summary.commands, "reply written");
    }

    info!(
        commands = summary.commands,
        errors = summary.errors,
        "session finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LruCache;
    use tokio::io::BufReader;

    async fn run(capacity: i64, input: &str) -> (SessionSummary, Vec<serde_json::Value>) {
        let state = DriverState::new(LruCache::new(capacity).unwrap());
        let mut output = Vec::new();
        let summary = run_session(&state, BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();

        let replies = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (summary, replies)
    }

    #[tokio::test]
    async fn test_session_one_reply_per_command() {
        let input = "SET 1 a\nSET 2 b\n\nGET 1\nSET 3 c\nGET 2\nGET 3\n";
        let (summary, replies) = run(2, input).await;

        assert_eq!(summary.commands, 6);
        assert_eq!(summary.errors, 1);
        assert_eq!(replies.len(), 6);
        assert_eq!(replies[2]["value"], "a");
        assert_eq!(replies[4]["error"], "Key not found: 2");
        assert_eq!(replies[5]["value"], "c");
    }

    #[tokio::test]
    async fn test_session_survives_bad_lines() {
        let (summary, replies) = run(1, "BOGUS\nSET k v\nGET\nGET k").await;

        assert_eq!(summary.commands, 4);
        assert_eq!(summary.errors, 2);
        assert_eq!(replies[3]["value"], "v");
    }

    #[tokio::test]
    async fn test_session_zero_capacity() {
        let (summary, replies) = run(0, "SET k v\nGET k\nLEN").await;

        assert_eq!(summary.errors, 1);
        assert_eq!(replies[1]["error"], "Key not found: k");
        assert_eq!(replies[2]["len"], 0);
    }

    #[tokio::test]
    async fn test_session_empty_input() {
        let (summary, replies) = run(4, "").await;
        assert_eq!(summary, SessionSummary::default());
        assert!(replies.is_empty());
    }
}
