//! Per-connection capture of raw request heads.
//!
//! # Responsibilities
//! - Copy every byte hyper reads from the socket into a per-connection log
//! - Parse the head at the front of the log with httparse
//! - Skip past the head and its Content-Length body once a request is taken
//!
//! # Design Decisions
//! - hyper lowercases header names; the log keeps them exactly as sent
//! - HTTP/1 serves one request at a time per connection, so the front of the
//!   log always belongs to the request being handled
//! - Any mismatch (chunked body, unparsable head, oversized log) stops capture
//!   for the rest of the connection; callers then fall back to hyper's headers

use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use httparse::{Request, Status, EMPTY_HEADER};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;

/// Same header limit hyper applies by default.
const MAX_HEADERS: usize = 100;

/// Upper bound on unconsumed bytes kept per connection.
const MAX_RECORDED: usize = 512 * 1024;

#[derive(Debug)]
struct HeadLog {
    buf: Vec<u8>,
    /// Bytes still to discard before recording resumes (rest of a body).
    skip: usize,
    synced: bool,
}

impl Default for HeadLog {
    fn default() -> Self {
        Self {
            buf: Vec::new(),
            skip: 0,
            synced: true,
        }
    }
}

impl HeadLog {
    fn record(&mut self, bytes: &[u8]) {
        if !self.synced {
            return;
        }

        let skipped = self.skip.min(bytes.len());
        self.skip -= skipped;
        let rest = &bytes[skipped..];

        if self.buf.len() + rest.len() > MAX_RECORDED {
            self.desync();
            return;
        }
        self.buf.extend_from_slice(rest);
    }

    fn desync(&mut self) {
        self.synced = false;
        self.skip = 0;
        self.buf = Vec::new();
    }

    fn take_head(&mut self, method: &str, target: &str) -> Option<Vec<(String, String)>> {
        if !self.synced {
            return None;
        }

        let parsed = {
            let mut headers = [EMPTY_HEADER; MAX_HEADERS];
            let mut req = Request::new(&mut headers);
            match req.parse(&self.buf) {
                Ok(Status::Complete(head_len))
                    if req.method == Some(method) && req.path == Some(target) =>
                {
                    let pairs: Vec<(String, String)> = req
                        .headers
                        .iter()
                        .map(|h| {
                            (
                                h.name.to_owned(),
                                String::from_utf8_lossy(h.value).into_owned(),
                            )
                        })
                        .collect();
                    Some((head_len, pairs))
                }
                _ => None,
            }
        };

        let Some((head_len, pairs)) = parsed else {
            tracing::debug!(method, target, "Raw request head not found, header capture stopped");
            self.desync();
            return None;
        };

        if is_chunked(&pairs) {
            // Framing of the chunked body is unknown here.
            self.desync();
            return Some(pairs);
        }

        let consumed = head_len + body_length(&pairs);
        let drained = consumed.min(self.buf.len());
        self.buf.drain(..drained);
        self.skip = consumed - drained;

        Some(pairs)
    }
}

fn is_chunked(pairs: &[(String, String)]) -> bool {
    pairs.iter().any(|(name, value)| {
        name.eq_ignore_ascii_case("transfer-encoding")
            && value.to_ascii_lowercase().contains("chunked")
    })
}

fn body_length(pairs: &[(String, String)]) -> usize {
    pairs
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Shared handle to one connection's head log.
#[derive(Debug, Clone, Default)]
pub struct HeadRecorder(Arc<Mutex<HeadLog>>);

impl HeadRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes read from the socket.
    pub fn record(&self, bytes: &[u8]) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(bytes);
    }

    /// Take the head of the request currently being served.
    ///
    /// Returns the header pairs exactly as sent, in wire order, or `None` when
    /// the log is out of step with the connection.
    pub fn take_head(&self, method: &str, target: &str) -> Option<Vec<(String, String)>> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take_head(method, target)
    }
}

/// A TCP stream that copies everything it reads into a [`HeadRecorder`].
#[derive(Debug)]
pub struct RecordingStream {
    inner: TcpStream,
    recorder: HeadRecorder,
}

impl RecordingStream {
    pub fn new(inner: TcpStream) -> Self {
        Self {
            inner,
            recorder: HeadRecorder::new(),
        }
    }

    pub fn recorder(&self) -> HeadRecorder {
        self.recorder.clone()
    }
}

impl AsyncRead for RecordingStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        let poll = Pin::new(&mut this.inner).poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = poll {
            let read = &buf.filled()[before..];
            if !read.is_empty() {
                this.recorder.record(read);
            }
        }
        poll
    }
}

impl AsyncWrite for RecordingStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().inner).poll_write(cx, buf)
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().inner).poll_write_vectored(cx, bufs)
    }

    fn is_write_vectored(&self) -> bool {
        self.inner.is_write_vectored()
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_owned(), value.to_owned())
    }

    #[test]
    fn test_head_keeps_case_and_order() {
        let recorder = HeadRecorder::new();
        recorder.record(b"GET /?a=1 HTTP/1.1\r\nHost: x\r\nX-Mixed-Case: V\r\nhost: y\r\n\r\n");

        let head = recorder.take_head("GET", "/?a=1").unwrap();
        assert_eq!(
            head,
            vec![pair("Host", "x"), pair("X-Mixed-Case", "V"), pair("host", "y")]
        );
    }

    #[test]
    fn test_head_split_across_reads() {
        let recorder = HeadRecorder::new();
        recorder.record(b"GET / HTTP/1.1\r\nHo");
        recorder.record(b"st: x\r\n\r\n");
        assert_eq!(recorder.take_head("GET", "/").unwrap(), vec![pair("Host", "x")]);
    }

    #[test]
    fn test_pipelined_requests_with_bodies() {
        let recorder = HeadRecorder::new();
        recorder.record(b"POST /a HTTP/1.1\r\nContent-Length: 10\r\n\r\n01234");

        let first = recorder.take_head("POST", "/a").unwrap();
        assert_eq!(first, vec![pair("Content-Length", "10")]);

        // Remaining body bytes arrive with the next head in the same read.
        recorder.record(b"56789GET /b HTTP/1.1\r\nX-Next: 1\r\n\r\n");
        assert_eq!(recorder.take_head("GET", "/b").unwrap(), vec![pair("X-Next", "1")]);
    }

    #[test]
    fn test_mismatched_request_stops_capture() {
        let recorder = HeadRecorder::new();
        recorder.record(b"GET /one HTTP/1.1\r\nHost: x\r\n\r\n");
        assert!(recorder.take_head("GET", "/other").is_none());

        recorder.record(b"GET /two HTTP/1.1\r\nHost: x\r\n\r\n");
        assert!(recorder.take_head("GET", "/two").is_none());
    }

    #[test]
    fn test_chunked_body_stops_capture_after_head() {
        let recorder = HeadRecorder::new();
        recorder.record(b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n3\r\nabc\r\n0\r\n\r\n");

        let head = recorder.take_head("POST", "/").unwrap();
        assert_eq!(head, vec![pair("Transfer-Encoding", "chunked")]);

        recorder.record(b"GET / HTTP/1.1\r\n\r\n");
        assert!(recorder.take_head("GET", "/").is_none());
    }
}
