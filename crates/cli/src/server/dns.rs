use minidns_application::use_cases::HandleDnsQueryUseCase;
use minidns_domain::message::MAX_UDP_MESSAGE_SIZE;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};

pub async fn start_dns_server(
    bind_addr: String,
    handler: Arc<HandleDnsQueryUseCase>,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = Arc::new(create_udp_socket(socket_addr)?);

    info!(
        bind_address = %socket.local_addr()?,
        resolver = handler.resolver_name(),
        "DNS server ready"
    );

    serve(socket, handler).await;
    Ok(())
}

/// Receives datagrams forever, handling each on its own task.
pub async fn serve(socket: Arc<UdpSocket>, handler: Arc<HandleDnsQueryUseCase>) {
    let mut recv_buf = [0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let (len, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let packet = recv_buf[..len].to_vec();
        let handler = handler.clone();
        let socket = socket.clone();
        tokio::spawn(async move {
            let Some(response) = handler.execute(&packet).await else {
                debug!(client = %from, "No reply sent");
                return;
            };
            if let Err(e) = socket.send_to(&response, from).await {
                error!(client = %from, error = %e, "UDP send error");
            }
        });
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
