//! Connection abstractions and newline framing for the listener.

use std::io::{self, Read, Write};
use std::net::TcpStream;

#[cfg(unix)]
use std::os::unix::net::UnixStream;

/// Largest request line accepted from a client, terminator included.
pub(crate) const MAX_LINE_BYTES: usize = 64 * 1024;

/// Stream types accepted by the listener.
pub(crate) enum ConnectionStream {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl ConnectionStream {
    /// Human-readable peer description for logs.
    pub(crate) fn peer(&self) -> String {
        match self {
            Self::Tcp(stream) => stream
                .peer_addr()
                .map_or_else(|_| "tcp:unknown".to_owned(), |addr| addr.to_string()),
            #[cfg(unix)]
            Self::Unix(_) => "unix".to_owned(),
        }
    }
}

impl Read for ConnectionStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.read(buf),
        }
    }
}

impl Write for ConnectionStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            Self::Unix(stream) => stream.flush(),
        }
    }
}

/// Handles accepted socket connections.
pub(crate) trait ConnectionHandler: Send + Sync + 'static {
    /// Handles a single connection until it closes. Implementations should
    /// avoid panicking.
    fn handle(&self, stream: ConnectionStream);
}

/// Splits a byte stream into newline-terminated lines.
///
/// Bytes read past the end of one line are kept for the next call, so a
/// client may pipeline several requests in one write.
#[derive(Debug, Default)]
pub(crate) struct LineReader {
    pending: Vec<u8>,
}

impl LineReader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the next line with any trailing `\r\n` removed, or `None` once
    /// the peer has closed the stream and nothing is buffered.
    ///
    /// A final unterminated line is returned as-is. Lines longer than
    /// [`MAX_LINE_BYTES`] fail with [`io::ErrorKind::InvalidData`].
    pub(crate) fn read_line<R: Read>(&mut self, stream: &mut R) -> io::Result<Option<String>> {
        let mut chunk = [0_u8; 1024];
        loop {
            if let Some(line) = self.take_line()? {
                return Ok(Some(line));
            }
            enforce_request_limit(self.pending.len())?;

            let bytes_read = read_chunk_with_retry(stream, &mut chunk)?;
            if bytes_read == 0 {
                return Ok(self.take_remainder());
            }
            self.pending.extend_from_slice(&chunk[..bytes_read]);
        }
    }

    fn take_line(&mut self) -> io::Result<Option<String>> {
        let Some(pos) = self.pending.iter().position(|byte| *byte == b'\n') else {
            return Ok(None);
        };
        enforce_request_limit(pos + 1)?;
        let line: Vec<u8> = self.pending.drain(..=pos).collect();
        Ok(Some(decode_line(&line)))
    }

    fn take_remainder(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.pending);
        Some(decode_line(&line))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\r', '\n'])
        .to_owned()
}

fn read_chunk_with_retry<R: Read>(stream: &mut R, chunk: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(chunk) {
            Ok(read) => return Ok(read),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}

fn enforce_request_limit(size: usize) -> io::Result<()> {
    if size > MAX_LINE_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "request exceeds maximum size",
        ));
    }
    Ok(())
}
