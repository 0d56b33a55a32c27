//! Connection Handler
//!
//! One TCP connection, opened for a single request/response exchange.

use std::io::{self, BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use crate::config::ClientConfig;
use crate::error::{CraftError, Result};
use crate::protocol::{self, Request, Response, CLOSED_BY_SERVER};

/// A connected socket to the game server
///
/// The socket is closed when the connection is dropped, so every exit path
/// of a call releases it.
pub struct Connection {
    /// TCP stream reader (buffered for line reads)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered so a request goes out in one write)
    writer: BufWriter<TcpStream>,

    /// `host:port` as configured, for error messages and logging
    addr: String,
}

impl Connection {
    /// Connect to the configured server.
    ///
    /// Tries every address the host resolves to within one timeout, which
    /// then bounds every later read and write.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let addr = config.addr();
        let timeout = config.socket_timeout();

        let socket_addrs: Vec<SocketAddr> = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| CraftError::Connection(format!("Failed to connect to {}: {}", addr, e)))?
            .collect();

        let stream = connect_any(&socket_addrs, timeout)
            .map_err(|e| CraftError::Connection(format!("Failed to connect to {}: {}", addr, e)))?;

        let configure = |stream: &TcpStream| -> io::Result<()> {
            stream.set_nodelay(true)?;
            stream.set_read_timeout(timeout)?;
            stream.set_write_timeout(timeout)
        };
        configure(&stream).map_err(|e| {
            CraftError::Connection(format!("Failed to configure socket for {}: {}", addr, e))
        })?;

        let read_stream = stream
            .try_clone()
            .map_err(|e| CraftError::Connection(format!("Failed to clone socket for {}: {}", addr, e)))?;

        tracing::debug!("Connected to {}", addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
            addr,
        })
    }

    /// Send one encoded line. Partial writes are retried until done.
    pub fn send(&mut self, line: &[u8]) -> Result<()> {
        protocol::write_line(&mut self.writer, line).map_err(|e| self.io_error("write to", e))
    }

    /// Read one line, terminator stripped. Bytes after it are discarded.
    pub fn receive_line(&mut self) -> Result<Vec<u8>> {
        protocol::read_line(&mut self.reader).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                CraftError::Connection(CLOSED_BY_SERVER.to_string())
            } else {
                self.io_error("read from", e)
            }
        })
    }

    /// Send a request and wait for the response line
    pub fn round_trip(&mut self, request: &Request) -> Result<Response> {
        let line = protocol::encode_request(request)?;
        tracing::trace!("-> {} {}", self.addr, request.action);
        self.send(&line)?;

        let reply = self.receive_line()?;
        tracing::trace!("<- {} {} bytes", self.addr, reply.len());
        protocol::decode_response(&reply)
    }

    /// Close the socket now. Dropping the connection has the same effect.
    pub fn close(self) {
        if let Err(e) = self.writer.get_ref().shutdown(Shutdown::Both) {
            tracing::trace!("Shutdown of {} returned: {}", self.addr, e);
        }
        tracing::debug!("Closed connection to {}", self.addr);
    }

    fn io_error(&self, op: &str, e: io::Error) -> CraftError {
        let detail = match e.kind() {
            // Unix reports a read timeout as WouldBlock, Windows as TimedOut
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => "timed out".to_string(),
            io::ErrorKind::ConnectionReset => "connection reset by server".to_string(),
            _ => e.to_string(),
        };
        tracing::warn!("Failed to {} {}: {}", op, self.addr, detail);
        CraftError::Connection(format!("Failed to {} {}: {}", op, self.addr, detail))
    }
}

/// Connect to the first address that accepts.
///
/// With a timeout, all attempts share one deadline, so a host with several
/// unreachable addresses still fails within `timeout`.
pub fn connect_any(addrs: &[SocketAddr], timeout: Option<Duration>) -> io::Result<TcpStream> {
    let deadline = timeout.map(|t| Instant::now() + t);
    let mut last_err = None;

    for addr in addrs {
        let attempt = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                TcpStream::connect_timeout(addr, remaining)
            }
            None => TcpStream::connect(addr),
        };

        match attempt {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!("Connect to {} failed: {}", addr, e);
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "no addresses resolved")
    }))
}
