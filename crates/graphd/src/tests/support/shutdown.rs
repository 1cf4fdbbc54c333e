//! Stop request that scenarios raise by hand instead of sending a signal.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::process::{ShutdownError, ShutdownSignal};

/// Each `trigger` queues one stop request; `wait` consumes one. A scenario
/// may trigger before the daemon starts waiting.
#[derive(Clone)]
pub struct TestShutdownSignal {
    requests: Sender<()>,
    pending: Arc<Mutex<Receiver<()>>>,
}

impl TestShutdownSignal {
    pub fn new() -> Self {
        let (requests, pending) = mpsc::channel();
        Self {
            requests,
            pending: Arc::new(Mutex::new(pending)),
        }
    }

    pub fn trigger(&self) {
        // The receiver lives in `self`, so the send cannot fail.
        let _ = self.requests.send(());
    }
}

impl ShutdownSignal for TestShutdownSignal {
    fn wait(&self) -> Result<(), ShutdownError> {
        let pending = self.pending.lock().expect("stop request receiver poisoned");
        pending
            .recv()
            .expect("stop request sender lives alongside the receiver");
        Ok(())
    }
}
