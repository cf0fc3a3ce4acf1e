//! Datagram transport used to reach a gateway.

use std::future::Future;
use std::net::{SocketAddr, SocketAddrV4};

use log::trace;

use crate::errors::Error;
use crate::frame::Frame;
use crate::runtime::{AsyncUdpSocket, UdpSocket};

type Result<T> = std::result::Result<T, Error>;

/// Hands a single frame to a gateway.
///
/// Sends are fire-and-forget: the gateway never answers, so `Ok` only means
/// the datagram left this host.
pub trait Transport: Send + Sync {
    fn send(&self, frame: &Frame, gateway: SocketAddrV4) -> impl Future<Output = Result<()>> + Send;
}

/// Sends each frame from a fresh ephemeral UDP socket.
#[derive(Debug, Clone, Copy, Default)]
pub struct UdpTransport;

impl Transport for UdpTransport {
    async fn send(&self, frame: &Frame, gateway: SocketAddrV4) -> Result<()> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| Error::socket("bind", e))?;

        socket
            .send_to(frame.as_bytes(), SocketAddr::V4(gateway))
            .await
            .map_err(|e| Error::socket("send_to", e))?;

        trace!("sent {frame} to {gateway}");
        Ok(())
    }
}
