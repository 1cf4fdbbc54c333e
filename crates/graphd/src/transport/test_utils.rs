//! Connection handler double for listener tests.

use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use super::{ConnectionHandler, ConnectionStream};

const PEER_WAIT: Duration = Duration::from_secs(2);

/// Records the peer of every connection the listener hands over.
#[derive(Default)]
pub(crate) struct PeerLog {
    peers: Mutex<Vec<String>>,
}

impl PeerLog {
    pub(crate) fn peers(&self) -> Vec<String> {
        self.peers.lock().expect("peer log poisoned").clone()
    }

    /// Polls until at least `expected` connections were handed over.
    pub(crate) fn wait_for(&self, expected: usize) -> bool {
        let deadline = Instant::now() + PEER_WAIT;
        loop {
            if self.peers().len() >= expected {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl ConnectionHandler for PeerLog {
    fn handle(&self, stream: ConnectionStream) {
        self.peers
            .lock()
            .expect("peer log poisoned")
            .push(stream.peer());
    }
}
