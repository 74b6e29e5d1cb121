//! Scripted transport for tests.

use super::Transport;
use crate::error::{Error, Result};
use bytes::Bytes;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Scripted {
    Reply(Bytes),
    Timeout,
}

/// Transport that records sent datagrams and replays queued replies.
///
/// `recv` with nothing queued behaves as a timeout.
#[derive(Debug)]
pub struct MockTransport {
    target: SocketAddr,
    replies: Mutex<VecDeque<Scripted>>,
    sent: Mutex<Vec<Bytes>>,
}

impl MockTransport {
    pub fn new(target: SocketAddr) -> Self {
        Self {
            target,
            replies: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reply datagram.
    pub fn queue_reply(&self, data: impl Into<Bytes>) {
        self.lock_replies().push_back(Scripted::Reply(data.into()));
    }

    /// Queue one timed-out receive.
    pub fn queue_timeout(&self) {
        self.lock_replies().push_back(Scripted::Timeout);
    }

    /// Datagrams sent so far, oldest first.
    pub fn sent(&self) -> Vec<Bytes> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Scripted>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Transport for MockTransport {
    async fn send(&self, data: &[u8]) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Bytes::copy_from_slice(data));
        Ok(())
    }

    async fn recv(&self, request_id: u32, timeout: Duration) -> Result<Bytes> {
        let next = self.lock_replies().pop_front();
        match next {
            Some(Scripted::Reply(data)) => Ok(data),
            Some(Scripted::Timeout) | None => Err(Error::Timeout {
                target: self.target,
                elapsed: timeout,
                request_id,
                retries: 0,
            }),
        }
    }

    fn peer_addr(&self) -> SocketAddr {
        self.target
    }

    fn local_addr(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }
}
