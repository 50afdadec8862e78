//! TCP listener that hands axum recording streams.

use std::io;
use std::net::SocketAddr;

use axum::extract::connect_info::Connected;
use axum::serve::{IncomingStream, Listener};
use tokio::net::TcpListener;

use crate::net::connection::{HeadRecorder, RecordingStream};

/// Wraps a bound [`TcpListener`] so every accepted stream records its reads.
#[derive(Debug)]
pub struct RecordingListener {
    inner: TcpListener,
}

impl RecordingListener {
    pub fn new(inner: TcpListener) -> Self {
        Self { inner }
    }
}

impl Listener for RecordingListener {
    type Io = RecordingStream;
    type Addr = SocketAddr;

    async fn accept(&mut self) -> (Self::Io, Self::Addr) {
        // axum's TcpListener impl already retries and backs off on accept errors.
        let (stream, addr) = <TcpListener as Listener>::accept(&mut self.inner).await;
        tracing::trace!(peer_addr = %addr, "Connection accepted");
        (RecordingStream::new(stream), addr)
    }

    fn local_addr(&self) -> io::Result<Self::Addr> {
        self.inner.local_addr()
    }
}

/// Exposes each connection's recorder to handlers as `ConnectInfo<HeadRecorder>`.
impl Connected<IncomingStream<'_, RecordingListener>> for HeadRecorder {
    fn connect_info(stream: IncomingStream<'_, RecordingListener>) -> Self {
        stream.io().recorder()
    }
}
