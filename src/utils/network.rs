use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;

/// Primary LAN address, found by routing a UDP socket towards a public address
///
/// Connecting a UDP socket sends nothing; it only asks the kernel which local
/// interface would be used. Returns `None` without a route.
pub async fn lan_ipv4_address() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await.ok()?;
    socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80)).await.ok()?;

    match socket.local_addr().ok()? {
        SocketAddr::V4(addr) if is_reachable_from_lan(*addr.ip()) => Some(*addr.ip()),
        _ => None,
    }
}

/// URLs a browser can use to reach a server bound to `bind`
///
/// A wildcard bind is reachable through localhost and the LAN address; a
/// specific bind only through itself.
pub async fn reachable_urls(bind: SocketAddr) -> Vec<String> {
    let port = bind.port();
    if !bind.ip().is_unspecified() {
        return vec![format!("http://{}/", bind)];
    }

    let mut urls = vec![format!("http://127.0.0.1:{}/", port)];
    if let Some(lan) = lan_ipv4_address().await {
        urls.push(format!("http://{}:{}/", IpAddr::V4(lan), port));
    }
    urls
}

fn is_reachable_from_lan(ip: Ipv4Addr) -> bool {
    !ip.is_loopback() && !ip.is_unspecified()
}
