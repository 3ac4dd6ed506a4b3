//! Session Driver Module
//!
//! This module drives a single client session: it reads command lines,
//! hands them to the [`CommandHandler`], and writes the rendered responses
//! back. The same loop serves a TCP client and the interactive terminal.
//!
//! ## Session Lifecycle
//!
//! ```text
//! 1. Session created (TCP accept or terminal start)
//!        │
//!        ▼
//! 2. Banner written (interactive only)
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │      Main Loop               │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Read one line           │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ blank? skip  exit? stop │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Parse + execute         │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Write rendered response │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │         [Loop back]          │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 4. exit sentinel / EOF / transport error
//! ```
//!
//! A failed command only produces an error line; the session keeps going.

use crate::commands::CommandHandler;
use crate::protocol::{CommandKind, Response};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter,
};
use tokio::net::TcpStream;
use tokio::signal;
use tracing::{debug, error, info, trace, warn};

/// Maximum length of a single command line (64 KB)
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Input that ends a session without being dispatched (case-insensitive)
pub const EXIT_SENTINEL: &str = "exit";

/// Prompt shown before each line in interactive sessions
pub const PROMPT: &str = "linekv> ";

/// Statistics shared by all sessions
#[derive(Debug, Default)]
pub struct SessionStats {
    /// Total number of sessions started
    pub sessions_opened: AtomicU64,
    /// Currently running sessions
    pub active_sessions: AtomicU64,
    /// Total commands processed
    pub commands_processed: AtomicU64,
    /// Commands that produced an error response
    pub command_errors: AtomicU64,
    /// Total bytes read
    pub bytes_read: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_opened(&self) {
        self.sessions_opened.fetch_add(1, Ordering::Relaxed);
        self.active_sessions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn session_closed(&self) {
        self.active_sessions.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self, failed: bool) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.command_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written.fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// How a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The exit sentinel was read
    Exit,
    /// The input stream ended
    Eof,
    /// Ctrl+C in an interactive session
    Interrupted,
}

/// Errors that end a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// I/O error on the line source or sink
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A line exceeded the length limit without a newline
    #[error("line exceeds {max} bytes")]
    LineTooLong { max: usize },
}

/// Runs one session over a line source and a response sink.
pub struct Session<R, W> {
    reader: R,
    writer: W,

    /// Peer label (for logging)
    peer: String,

    /// The command handler (shared across sessions)
    command_handler: CommandHandler,

    /// Session statistics (shared)
    stats: Arc<SessionStats>,

    /// Write a banner and prompts
    interactive: bool,

    /// Buffer for the current line
    line: Vec<u8>,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a new, non-interactive session.
    ///
    /// # Arguments
    ///
    /// * `reader` - Source of command lines
    /// * `writer` - Sink for rendered responses
    /// * `peer` - Label used in log records
    /// * `command_handler` - The command handler for executing commands
    /// * `stats` - Shared session statistics
    pub fn new(
        reader: R,
        writer: W,
        peer: impl Into<String>,
        command_handler: CommandHandler,
        stats: Arc<SessionStats>,
    ) -> Self {
        Self {
            reader,
            writer,
            peer: peer.into(),
            command_handler,
            stats,
            interactive: false,
            line: Vec::with_capacity(256),
        }
    }

    /// Turns on the greeting banner, prompts and farewell line.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Runs the session until the exit sentinel, EOF, or an I/O failure.
    pub async fn run(mut self) -> Result<SessionEnd, SessionError> {
        self.stats.session_opened();
        info!(peer = %self.peer, "Session started");

        let mut result = self.main_loop().await;
        if self.interactive && result.is_ok() {
            if let Err(e) = self.write_bytes(b"Goodbye!\n").await {
                result = Err(e);
            }
        }

        match &result {
            Ok(end) => info!(peer = %self.peer, end = ?end, "Session ended"),
            Err(SessionError::IoError(io_err))
                if io_err.kind() == std::io::ErrorKind::ConnectionReset =>
            {
                debug!(peer = %self.peer, "Connection reset by client")
            }
            Err(e) => warn!(peer = %self.peer, error = %e, "Session error"),
        }

        self.stats.session_closed();
        result
    }

    /// The main read-execute-respond loop.
    async fn main_loop(&mut self) -> Result<SessionEnd, SessionError> {
        if self.interactive {
            self.write_banner().await?;
        }

        loop {
            if self.interactive {
                self.write_bytes(PROMPT.as_bytes()).await?;
            }

            if !self.read_line().await? {
                return Ok(SessionEnd::Eof);
            }

            let line = self.line.trim_ascii();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case(EXIT_SENTINEL.as_bytes()) {
                return Ok(SessionEnd::Exit);
            }

            let response = self.command_handler.process(line);
            self.record(&response);
            self.send_response(&response).await?;
        }
    }

    /// Reads the next line into `self.line`. Returns `false` at EOF.
    async fn read_line(&mut self) -> Result<bool, SessionError> {
        self.line.clear();

        let limit = MAX_LINE_LENGTH as u64 + 1;
        let n = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.line)
            .await?;

        if n == 0 {
            return Ok(false);
        }
        self.stats.bytes_read(n);

        if n as u64 == limit && self.line.last() != Some(&b'\n') {
            error!(
                peer = %self.peer,
                size = n,
                "Line length limit exceeded"
            );
            return Err(SessionError::LineTooLong {
                max: MAX_LINE_LENGTH,
            });
        }

        trace!(peer = %self.peer, bytes = n, "Read line");
        Ok(true)
    }

    /// Updates statistics and logs the outcome of one command.
    fn record(&self, response: &Response) {
        self.stats.command_processed(response.is_error());

        match response.as_error() {
            Some(e) if e.is_internal() => {
                error!(peer = %self.peer, kind = e.kind(), error = %e, "Internal dispatch failure")
            }
            Some(e) => debug!(peer = %self.peer, kind = e.kind(), error = %e, "Command failed"),
            None => trace!(peer = %self.peer, "Command succeeded"),
        }
    }

    /// Sends a response to the client.
    async fn send_response(&mut self, response: &Response) -> Result<(), SessionError> {
        let mut buf = Vec::with_capacity(64);
        response.render_into(&mut buf);
        buf.push(b'\n');
        self.write_bytes(&buf).await
    }

    async fn write_banner(&mut self) -> Result<(), SessionError> {
        let banner = format!(
            "Welcome to LineKV v{}!\n\
             Available commands: {}\n\
             Example: SET mykey myvalue\n\
             Type '{}' to quit\n",
            crate::VERSION,
            CommandKind::names().join(", "),
            EXIT_SENTINEL,
        );
        self.write_bytes(banner.as_bytes()).await
    }

    async fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        self.stats.bytes_written(bytes.len());
        Ok(())
    }
}

/// Handles a TCP client connection.
///
/// Each line received is one command; each command gets one response line.
///
/// # Arguments
///
/// * `stream` - The TCP stream for this connection
/// * `addr` - The client's socket address
/// * `command_handler` - The command handler for executing commands
/// * `stats` - Shared session statistics
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    command_handler: CommandHandler,
    stats: Arc<SessionStats>,
) {
    let (read_half, write_half) = stream.into_split();
    let session = Session::new(
        BufReader::new(read_half),
        BufWriter::new(write_half),
        addr.to_string(),
        command_handler,
        stats,
    );

    if let Err(e) = session.run().await {
        debug!(client = %addr, error = %e, "Connection ended with error");
    }
}

/// Runs an interactive session on stdin/stdout.
///
/// Ends on the exit sentinel, end of input, or Ctrl+C.
pub async fn run_interactive(
    command_handler: CommandHandler,
    stats: Arc<SessionStats>,
) -> Result<SessionEnd, SessionError> {
    let session = Session::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        "stdin",
        command_handler,
        stats,
    )
    .interactive();

    tokio::select! {
        result = session.run() => result,
        interrupted = signal::ctrl_c() => {
            interrupted?;
            let mut stdout = tokio::io::stdout();
            stdout.write_all(b"\nGoodbye!\n").await?;
            stdout.flush().await?;
            Ok(SessionEnd::Interrupted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageEngine;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn create_handler() -> CommandHandler {
        CommandHandler::new(Arc::new(StorageEngine::new()))
    }

    async fn run_session(input: &[u8]) -> (Result<SessionEnd, SessionError>, String) {
        let mut output = Vec::new();
        let session = Session::new(
            input,
            &mut output,
            "test",
            create_handler(),
            Arc::new(SessionStats::new()),
        );
        let result = session.run().await;
        (result, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_scenario() {
        let input = b"SET mykey myvalue\n\
                      GET mykey\n\
                      EXISTS mykey\n\
                      DELETE mykey\n\
                      GET mykey\n\
                      DELETE mykey\n";

        let (result, output) = run_session(input).await;
        assert_eq!(result.unwrap(), SessionEnd::Eof);
        assert_eq!(output, "myvalue\nmyvalue\ntrue\ntrue\n(nil)\nfalse\n");
    }

    #[tokio::test]
    async fn test_errors_do_not_end_session() {
        let input = b"FOO a b\nSET a\nGET\nGET a\n";

        let (result, output) = run_session(input).await;
        assert_eq!(result.unwrap(), SessionEnd::Eof);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Error: unknown command 'FOO'"));
        assert!(lines[0].contains("SET, GET, DELETE, EXISTS"));
        assert_eq!(lines[1], "Error: SET requires a value");
        assert_eq!(lines[2], "Error: at least command and key required");
        assert_eq!(lines[3], "(nil)");
    }

    #[tokio::test]
    async fn test_exit_sentinel() {
        let input = b"SET a b\n  ExIt  \nGET a\n";

        let (result, output) = run_session(input).await;
        assert_eq!(result.unwrap(), SessionEnd::Exit);
        assert_eq!(output, "b\n");
    }

    #[tokio::test]
    async fn test_blank_lines_skipped() {
        let input = b"\n   \r\nSET a b\r\n\nGET a";

        let (result, output) = run_session(input).await;
        assert_eq!(result.unwrap(), SessionEnd::Eof);
        assert_eq!(output, "b\nb\n");
    }

    #[tokio::test]
    async fn test_line_too_long() {
        let mut input = b"SET k ".to_vec();
        input.extend(std::iter::repeat(b'x').take(MAX_LINE_LENGTH + 10));
        input.push(b'\n');

        let (result, output) = run_session(&input).await;
        assert!(matches!(result, Err(SessionError::LineTooLong { .. })));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_line_at_limit_accepted() {
        let mut input = b"SET k ".to_vec();
        input.extend(std::iter::repeat(b'x').take(MAX_LINE_LENGTH - 6));
        input.push(b'\n');

        let (result, output) = run_session(&input).await;
        assert_eq!(result.unwrap(), SessionEnd::Eof);
        assert_eq!(output.len(), MAX_LINE_LENGTH - 6 + 1);
    }

    #[tokio::test]
    async fn test_interactive_banner_and_prompt() {
        let mut output = Vec::new();
        let session = Session::new(
            &b"GET a\nexit\n"[..],
            &mut output,
            "test",
            create_handler(),
            Arc::new(SessionStats::new()),
        )
        .interactive();

        assert_eq!(session.run().await.unwrap(), SessionEnd::Exit);

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Welcome to LineKV"));
        assert!(output.contains("Available commands: SET, GET, DELETE, EXISTS"));
        assert!(output.contains("linekv> (nil)\nlinekv> "));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_session_stats() {
        let stats = Arc::new(SessionStats::new());
        let mut output = Vec::new();
        let input = b"SET a b\nFOO a\nGET a\n";

        let session = Session::new(
            &input[..],
            &mut output,
            "test",
            create_handler(),
            Arc::clone(&stats),
        );
        session.run().await.unwrap();

        assert_eq!(stats.sessions_opened.load(Ordering::Relaxed), 1);
        assert_eq!(stats.active_sessions.load(Ordering::Relaxed), 0);
        assert_eq!(stats.commands_processed.load(Ordering::Relaxed), 3);
        assert_eq!(stats.command_errors.load(Ordering::Relaxed), 1);
        assert_eq!(stats.bytes_read.load(Ordering::Relaxed), input.len() as u64);
        assert_eq!(
            stats.bytes_written.load(Ordering::Relaxed),
            output.len() as u64
        );
    }

    #[tokio::test]
    async fn test_mock_stream() {
        let reader = tokio_test::io::Builder::new()
            .read(b"SET k v\n")
            .read(b"GET ")
            .read(b"k\nDELETE k\n")
            .build();
        let writer = tokio_test::io::Builder::new()
            .write(b"v\n")
            .write(b"v\n")
            .write(b"true\n")
            .build();

        let session = Session::new(
            BufReader::new(reader),
            writer,
            "mock",
            create_handler(),
            Arc::new(SessionStats::new()),
        );
        assert_eq!(session.run().await.unwrap(), SessionEnd::Eof);
    }

    async fn create_test_server() -> (SocketAddr, Arc<StorageEngine>, Arc<SessionStats>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let storage = Arc::new(StorageEngine::new());
        let stats = Arc::new(SessionStats::new());

        let storage_clone = Arc::clone(&storage);
        let stats_clone = Arc::clone(&stats);

        tokio::spawn(async move {
            while let Ok((stream, client_addr)) = listener.accept().await {
                let handler = CommandHandler::new(Arc::clone(&storage_clone));
                let stats = Arc::clone(&stats_clone);
                tokio::spawn(handle_connection(stream, client_addr, handler, stats));
            }
        });

        (addr, storage, stats)
    }

    async fn read_lines(client: &mut TcpStream, expected: usize) -> String {
        let mut buf = vec![0u8; 1024];
        let mut total = 0;
        let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_secs(2);

        while buf[..total].iter().filter(|b| **b == b'\n').count() < expected
            && tokio::time::Instant::now() < deadline
        {
            match tokio::time::timeout(
                tokio::time::Duration::from_millis(100),
                client.read(&mut buf[total..]),
            )
            .await
            {
                Ok(Ok(n)) if n > 0 => total += n,
                Ok(_) => break,
                Err(_) => continue,
            }
        }

        String::from_utf8_lossy(&buf[..total]).into_owned()
    }

    #[tokio::test]
    async fn test_tcp_set_get() {
        let (addr, storage, _) = create_test_server().await;

        let mut client = TcpStream::connect(addr).await.unwrap();

        client.write_all(b"SET name Ariz\n").await.unwrap();
        assert_eq!(read_lines(&mut client, 1).await, "Ariz\n");

        client.write_all(b"GET name\n").await.unwrap();
        assert_eq!(read_lines(&mut client, 1).await, "Ariz\n");

        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_tcp_pipelined_commands() {
        let (addr, _, _) = create_test_server().await;

        let mut client = TcpStream::connect(addr).await.unwrap();

        client
            .write_all(b"SET k1 v1\nSET k2 v2\nGET k1\nGET k2\nEXISTS k3\n")
            .await
            .unwrap();

        let response = read_lines(&mut client, 5).await;
        assert_eq!(response, "v1\nv2\nv1\nv2\nfalse\n");
    }

    #[tokio::test]
    async fn test_tcp_clients_share_storage() {
        let (addr, _, _) = create_test_server().await;

        let mut first = TcpStream::connect(addr).await.unwrap();
        let mut second = TcpStream::connect(addr).await.unwrap();

        first.write_all(b"SET shared hello\n").await.unwrap();
        assert_eq!(read_lines(&mut first, 1).await, "hello\n");

        second.write_all(b"GET shared\n").await.unwrap();
        assert_eq!(read_lines(&mut second, 1).await, "hello\n");
    }

    #[tokio::test]
    async fn test_tcp_exit_closes_connection() {
        let (addr, _, stats) = create_test_server().await;

        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(b"SET a b\nexit\n").await.unwrap();

        let mut buf = Vec::new();
        tokio::time::timeout(
            tokio::time::Duration::from_secs(2),
            client.read_to_end(&mut buf),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(buf, b"b\n");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        assert_eq!(stats.sessions_opened.load(Ordering::Relaxed), 1);
        assert_eq!(stats.active_sessions.load(Ordering::Relaxed), 0);
    }
}
