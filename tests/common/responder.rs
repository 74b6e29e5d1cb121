//! Local UDP agent stand-in for client tests.

use bytes::Bytes;
use snmp_codec::parse_response;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

pub struct Responder {
    pub addr: SocketAddr,
    received: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl Responder {
    /// Start answering on an ephemeral loopback port.
    ///
    /// `reply` gets the attempt number (0-based) and the request ID decoded
    /// from the datagram; `None` drops the request.
    pub async fn spawn<F>(reply: F) -> Self
    where
        F: Fn(usize, u32) -> Option<Bytes> + Send + Sync + 'static,
    {
        Self::spawn_many(move |attempt, id| reply(attempt, id).into_iter().collect()).await
    }

    /// Like [`Responder::spawn`], but each request may be answered with
    /// several datagrams, sent in order.
    pub async fn spawn_many<F>(reply: F) -> Self
    where
        F: Fn(usize, u32) -> Vec<Bytes> + Send + Sync + 'static,
    {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();

        let task = tokio::spawn(async move {
            let mut buf = vec![0u8; 65535];
            loop {
                let Ok((len, from)) = socket.recv_from(&mut buf).await else {
                    return;
                };
                let attempt = counter.fetch_add(1, Ordering::SeqCst);
                // Requests share the response layout up to the request ID
                let Ok(request) = parse_response(&buf[..len]) else {
                    continue;
                };
                for data in reply(attempt, request.request_id) {
                    let _ = socket.send_to(&data, from).await;
                }
            }
        });

        Self {
            addr,
            received,
            task,
        }
    }

    /// Number of datagrams received so far.
    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }
}

impl Drop for Responder {
    fn drop(&mut self) {
        self.task.abort();
    }
}
