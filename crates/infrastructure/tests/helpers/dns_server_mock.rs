#![allow(dead_code)]
use minidns_domain::{Message, ResourceRecord, ResponseCode};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock upstream reacts to each query.
#[derive(Debug, Clone, Copy)]
pub enum MockMode {
    /// One A record per question pointing at the address.
    Answer(Ipv4Addr),
    /// Never replies.
    Silent,
    /// Replies with the right ID but an undecodable body.
    Garbage,
    /// Sends a reply with the wrong ID first, then the real answer.
    WrongIdFirst(Ipv4Addr),
    /// Replies to the first query, ignores the rest.
    AnswerOnce(Ipv4Addr),
    /// Like `Answer`, but each reply is held back for the given time.
    Delayed(Duration, Ipv4Addr),
}

pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Message>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(mode: MockMode) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?);
        let addr = socket.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = received.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Ok(query) = Message::decode(&buf[..len]) else { continue };

                        let seen = {
                            let mut log = log.lock().unwrap();
                            log.push(query.clone());
                            log.len()
                        };

                        if let MockMode::Delayed(delay, address) = mode {
                            let reply = Self::answer(&query, address);
                            let socket = socket.clone();
                            tokio::spawn(async move {
                                tokio::time::sleep(delay).await;
                                let _ = socket.send_to(&reply, peer).await;
                            });
                            continue;
                        }

                        for reply in Self::replies(mode, &query, seen) {
                            let _ = socket.send_to(&reply, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Queries received so far, in arrival order.
    pub fn received(&self) -> Vec<Message> {
        self.received.lock().unwrap().clone()
    }

    fn replies(mode: MockMode, query: &Message, seen: usize) -> Vec<Vec<u8>> {
        match mode {
            MockMode::Answer(address) | MockMode::Delayed(_, address) => {
                vec![Self::answer(query, address)]
            }
            MockMode::AnswerOnce(address) if seen == 1 => vec![Self::answer(query, address)],
            MockMode::AnswerOnce(_) | MockMode::Silent => Vec::new(),
            MockMode::Garbage => {
                let mut reply = query.encode().unwrap();
                reply[2] |= 0x80;
                // ANCOUNT=1 with a self-referencing owner name.
                reply[7] = 1;
                let at = reply.len();
                reply.extend_from_slice(&[0xC0 | (at >> 8) as u8, at as u8]);
                vec![reply]
            }
            MockMode::WrongIdFirst(address) => {
                let mut stale = Self::answer(query, Ipv4Addr::new(6, 6, 6, 6));
                stale[0] ^= 0xFF;
                vec![stale, Self::answer(query, address)]
            }
        }
    }

    fn answer(query: &Message, address: Ipv4Addr) -> Vec<u8> {
        let answers = query
            .questions
            .iter()
            .map(|q| ResourceRecord::a(q.name.clone(), address, 300))
            .collect();
        Message::response_for(query, ResponseCode::NoError, answers)
            .encode()
            .unwrap()
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
