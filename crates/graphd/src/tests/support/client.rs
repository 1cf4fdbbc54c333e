//! Line-oriented TCP client used to drive live sessions.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use graphd_config::SocketEndpoint;

const READ_TIMEOUT: Duration = Duration::from_secs(5);
const PROMPT_TERMINATOR: &str = "\n> ";

pub struct TestClient {
    stream: TcpStream,
    buffer: Vec<u8>,
}

impl TestClient {
    pub fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).expect("connect client");
        stream
            .set_read_timeout(Some(READ_TIMEOUT))
            .expect("set read timeout");
        Self {
            stream,
            buffer: Vec::new(),
        }
    }

    pub fn connect_endpoint(endpoint: &SocketEndpoint) -> Self {
        let SocketEndpoint::Tcp { host, port } = endpoint else {
            panic!("expected a TCP endpoint, got {endpoint}");
        };
        let addr = format!("{host}:{port}")
            .parse()
            .expect("endpoint should be a socket address");
        Self::connect(addr)
    }

    pub fn send_line(&mut self, line: &str) {
        self.stream
            .write_all(format!("{line}\n").as_bytes())
            .expect("write request");
    }

    /// Reads one server response: everything up to and including the next
    /// prompt, or whatever remains before the server closes the stream.
    pub fn read_response(&mut self) -> String {
        loop {
            if let Some(end) = find(&self.buffer, PROMPT_TERMINATOR.as_bytes()) {
                let response: Vec<u8> =
                    self.buffer.drain(..end + PROMPT_TERMINATOR.len()).collect();
                return String::from_utf8(response).expect("utf8 response");
            }
            let mut chunk = [0_u8; 4096];
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    let rest = std::mem::take(&mut self.buffer);
                    return String::from_utf8(rest).expect("utf8 response");
                }
                Ok(read) => self.buffer.extend_from_slice(&chunk[..read]),
                Err(error) if error.kind() == ErrorKind::Interrupted => {}
                Err(error) => panic!("read response: {error}"),
            }
        }
    }

    /// Returns true once the server has closed the connection.
    pub fn is_closed(&mut self) -> bool {
        let mut byte = [0_u8; 1];
        matches!(self.stream.read(&mut byte), Ok(0))
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
