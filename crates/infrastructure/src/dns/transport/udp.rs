//! UDP transport to the upstream resolver (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). The socket is connected once and
//! reused for every exchange; the kernel then drops datagrams from any other
//! source.

use super::resolver::resolve_upstream;
use minidns_domain::{DomainError, WireError};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Largest reply accepted from the upstream.
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

const MISSING_ID: WireError = WireError::Truncated {
    offset: 0,
    needed: 2,
};

pub struct UdpTransport {
    server_addr: SocketAddr,
    socket: Mutex<UdpSocket>,
}

impl UdpTransport {
    /// Resolves `server` (`host:port`), binds an ephemeral socket of the
    /// same address family and connects it.
    pub async fn connect(server: &str) -> Result<Self, DomainError> {
        let server_addr = resolve_upstream(server).await?;

        let bind_addr = if server_addr.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| io_error(server_addr, "bind", e))?;
        socket
            .connect(server_addr)
            .await
            .map_err(|e| io_error(server_addr, "connect", e))?;

        debug!(server = %server_addr, "UDP upstream socket connected");

        Ok(Self {
            server_addr,
            socket: Mutex::new(socket),
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    /// Sends `query` and waits for the reply carrying the same transaction
    /// ID. Replies with any other ID are discarded.
    ///
    /// Exchanges take turns on the socket. `timeout` bounds the round trip
    /// only and starts once this exchange owns the socket, so time spent
    /// queued behind other exchanges is not charged to it.
    pub async fn exchange(&self, query: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError> {
        let socket = self.socket.lock().await;
        let deadline = Instant::now() + timeout;

        let bytes_sent = tokio::time::timeout_at(deadline, socket.send(query))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| io_error(self.server_addr, "send", e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        loop {
            let bytes_received = tokio::time::timeout_at(deadline, socket.recv(&mut recv_buf))
                .await
                .map_err(|_| self.timeout_error())?
                .map_err(|e| io_error(self.server_addr, "receive", e))?;

            let response = &recv_buf[..bytes_received];
            match validate_response_id(query, response, self.server_addr) {
                Ok(()) => {
                    debug!(server = %self.server_addr, bytes_received, "UDP response received");
                    return Ok(response.to_vec());
                }
                Err(e) => {
                    warn!(error = %e, "Discarding upstream reply");
                }
            }
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::UpstreamTimeout {
            server: self.server_addr.to_string(),
        }
    }
}

/// Checks that `response` answers `query` by comparing the first two
/// octets of each datagram.
pub fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    let expected = transaction_id(query).ok_or(DomainError::Wire(MISSING_ID))?;
    let received =
        transaction_id(response).ok_or_else(|| DomainError::UpstreamMalformedResponse {
            server: server.to_string(),
            source: MISSING_ID,
        })?;

    if expected != received {
        return Err(DomainError::UpstreamIdMismatch {
            server: server.to_string(),
            expected,
            received,
        });
    }

    Ok(())
}

fn transaction_id(datagram: &[u8]) -> Option<u16> {
    match datagram {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

fn io_error(server: SocketAddr, action: &str, e: std::io::Error) -> DomainError {
    DomainError::UpstreamIo {
        server: server.to_string(),
        message: format!("{} failed: {}", action, e),
    }
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod tests;
