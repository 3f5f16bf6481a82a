use dnsbridge_infrastructure::DatagramHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub async fn start_dns_server(
    bind_addr: String,
    handler: Arc<DatagramHandler>,
    max_datagram_size: usize,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = create_udp_socket(socket_addr)?;

    info!(bind_address = %socket_addr, max_datagram_size, "DNS server listening");

    serve(socket, handler, max_datagram_size, shutdown).await;
    Ok(())
}

const RECV_BACKOFF_MIN: Duration = Duration::from_millis(10);
const RECV_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// Errors a UDP receive reports for a single bad datagram or a stale ICMP
/// notice. The socket stays usable, so the next receive goes ahead at once.
fn is_transient(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionRefused
    )
}

/// Delay before retrying after a persistent receive error. Doubles per
/// consecutive failure up to `RECV_BACKOFF_MAX`.
#[derive(Debug)]
struct RecvBackoff {
    next: Duration,
}

impl Default for RecvBackoff {
    fn default() -> Self {
        Self {
            next: RECV_BACKOFF_MIN,
        }
    }
}

impl RecvBackoff {
    fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = (self.next * 2).min(RECV_BACKOFF_MAX);
        delay
    }

    fn reset(&mut self) {
        self.next = RECV_BACKOFF_MIN;
    }
}

/// Answer datagrams on `socket` until `shutdown` is cancelled.
///
/// Datagrams longer than `max_datagram_size` are truncated by the receive.
async fn serve(
    socket: UdpSocket,
    handler: Arc<DatagramHandler>,
    max_datagram_size: usize,
    shutdown: CancellationToken,
) {
    let mut recv_buf = vec![0u8; max_datagram_size];
    let mut backoff = RecvBackoff::default();
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut recv_buf) => match received {
                Ok((n, from)) => {
                    backoff.reset();
                    if let Some(reply) = handler.handle(&recv_buf[..n]) {
                        if let Err(e) = socket.send_to(&reply, from).await {
                            warn!(client = %from, error = %e, "Failed to send reply");
                        }
                    }
                }
                Err(e) if is_transient(e.kind()) => {
                    debug!(error = %e, "Transient UDP recv error");
                }
                Err(e) => {
                    let delay = backoff.next_delay();
                    error!(
                        error = %e,
                        retry_in_ms = delay.as_millis() as u64,
                        "UDP recv error"
                    );
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            },
        }
    }

    let stats = handler.stats();
    info!(
        received = stats.received,
        replied = stats.replied,
        dropped = stats.dropped,
        "DNS server stopped"
    );
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

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const QUERY: [u8; 21] = [
        0x00, 0x2A, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        0x01, b'a', 0x01, b'b', 0x00, 0x00, 0x01, 0x00, 0x01,
    ];

    async fn start() -> (
        SocketAddr,
        Arc<DatagramHandler>,
        CancellationToken,
        tokio::task::JoinHandle<()>,
    ) {
        let socket = create_udp_socket("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = socket.local_addr().unwrap();
        let handler = Arc::new(DatagramHandler::new());
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(serve(socket, handler.clone(), 512, shutdown.clone()));
        (addr, handler, shutdown, task)
    }

    #[tokio::test]
    async fn test_query_is_echoed_back() {
        let (addr, _handler, shutdown, task) = start().await;
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        client.send_to(&QUERY, addr).await.unwrap();
        let mut buf = [0u8; 512];
        let (n, _) = timeout(Duration::from_secs(5), client.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(&buf[..n], &QUERY);
        shutdown.cancel();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_datagram_gets_no_reply() {
        let (addr, handler, shutdown, task) = start().await;
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        client.send_to(&[0x00, 0x01, 0x02], addr).await.unwrap();
        client.send_to(&QUERY, addr).await.unwrap();

        // Only the well-formed query is answered.
        let mut buf = [0u8; 512];
        let (n, _) = timeout(Duration::from_secs(5), client.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&buf[..n], &QUERY);

        shutdown.cancel();
        task.await.unwrap();
        let stats = handler.stats();
        assert_eq!(stats.received, 2);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_transient_recv_errors() {
        assert!(is_transient(io::ErrorKind::Interrupted));
        assert!(is_transient(io::ErrorKind::WouldBlock));
        assert!(is_transient(io::ErrorKind::ConnectionReset));
        assert!(is_transient(io::ErrorKind::ConnectionRefused));
        assert!(!is_transient(io::ErrorKind::PermissionDenied));
        assert!(!is_transient(io::ErrorKind::Other));
    }

    #[test]
    fn test_recv_backoff_doubles_up_to_cap_and_resets() {
        let mut backoff = RecvBackoff::default();
        assert_eq!(backoff.next_delay(), Duration::from_millis(10));
        assert_eq!(backoff.next_delay(), Duration::from_millis(20));
        assert_eq!(backoff.next_delay(), Duration::from_millis(40));

        let delays: Vec<_> = (0..10).map(|_| backoff.next_delay()).collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(delays.last(), Some(&RECV_BACKOFF_MAX));

        backoff.reset();
        assert_eq!(backoff.next_delay(), RECV_BACKOFF_MIN);
    }
}
