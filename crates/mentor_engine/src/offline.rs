use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

/// Answers whether the client machine has no network at all.
pub trait OfflineDetector: Send + Sync {
    fn is_offline(&self) -> bool;
}

impl<F> OfflineDetector for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_offline(&self) -> bool {
        self()
    }
}

/// Treats the machine as offline when the OS has no route to a public address.
///
/// Connecting a UDP socket only consults the routing table; no packet is sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteOfflineDetector;

const ROUTE_CHECK_TARGET: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)), 53);

impl OfflineDetector for RouteOfflineDetector {
    fn is_offline(&self) -> bool {
        let socket = match UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)) {
            Ok(socket) => socket,
            Err(_) => return true,
        };
        socket.connect(ROUTE_CHECK_TARGET).is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_detectors() {
        let offline = || true;
        let online = || false;
        assert!(offline.is_offline());
        assert!(!online.is_offline());
    }
}
