//! Shared test helpers: a scripted single-exchange TCP server.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use craftlink::{Client, ClientConfig};
use crossbeam::channel::{unbounded, Receiver};
use serde_json::Value;

pub const TEST_TOKEN: &str = "test-token";

/// What the mock server does after reading a request line
#[derive(Debug, Clone)]
pub enum Reply {
    /// Write the JSON value followed by a newline
    Json(Value),
    /// Write these bytes exactly, then close
    Raw(Vec<u8>),
    /// Close without writing anything
    Close,
    /// Hold the connection open without answering, then close
    Silent(Duration),
}

/// Serves one connection per scripted reply, in order
pub struct MockServer {
    addr: SocketAddr,
    requests: Receiver<String>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = unbounded();

        let handle = thread::spawn(move || {
            for reply in replies {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let _ = tx.send(line);

                let mut stream = stream;
                match reply {
                    Reply::Json(value) => {
                        let mut out = serde_json::to_vec(&value).unwrap();
                        out.push(b'\n');
                        let _ = stream.write_all(&out);
                    }
                    Reply::Raw(bytes) => {
                        let _ = stream.write_all(&bytes);
                    }
                    Reply::Close => {}
                    Reply::Silent(hold) => thread::sleep(hold),
                }
                let _ = stream.flush();
            }
        });

        Self {
            addr,
            requests: rx,
            handle,
        }
    }

    /// Serve a single successful response carrying `data`
    pub fn ok(data: Value) -> Self {
        Self::start(vec![Reply::Json(serde_json::json!({ "success": true, "data": data }))])
    }

    /// Serve a single failure response with `error`
    pub fn failing(error: &str) -> Self {
        Self::start(vec![Reply::Json(
            serde_json::json!({ "success": false, "error": error, "data": null }),
        )])
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::builder()
            .host("127.0.0.1")
            .port(self.port())
            .token(TEST_TOKEN)
            .timeout(Duration::from_secs(2))
            .build()
    }

    pub fn client(&self) -> Client {
        Client::new(self.config())
    }

    /// The next request line exactly as received, newline included
    pub fn next_raw(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(2))
            .expect("server received no request")
    }

    /// The next request line, parsed
    pub fn next_request(&self) -> Value {
        serde_json::from_str(&self.next_raw()).unwrap()
    }

    /// Params of the next request
    pub fn next_params(&self) -> Value {
        self.next_request()["params"].clone()
    }

    pub fn join(self) {
        self.handle.join().unwrap();
    }
}

/// A port with nothing listening on it
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
