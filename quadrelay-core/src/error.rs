/// Relay error types.
///
/// Split along the fatal/recoverable line from the server's error handling
/// design: startup and queue-level failures terminate the process, everything
/// else is handled locally by the connection or room that hit it.
use std::io;
use thiserror::Error;

/// Main error type for quadrelay operations.
#[derive(Error, Debug)]
pub enum RelayError {
    /// IO error during socket operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The listener could not be bound (address in use, permission denied, ...).
    #[error("failed to bind listener on {addr}: {source}")]
    ListenerBind {
        addr: std::net::SocketAddr,
        #[source]
        source: io::Error,
    },

    /// A peer sent a frame that does not match the fixed wire format.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// First byte of a connection did not match any known opcode.
    #[error("unrecognized opcode: {0}")]
    BadOpcode(u8),

    /// A peer's socket was closed (orderly EOF or error) before a Room
    /// finished its game-start rendezvous.
    #[error("peer disconnected: {0}")]
    PeerDisconnected(String),

    /// Attempted to join a room that doesn't exist or is already full.
    #[error("room unavailable: {0}")]
    RoomUnavailable(String),

    /// A channel used for actor/hub wiring was closed unexpectedly.
    #[error("channel closed")]
    ChannelClosed,
}

/// Result type alias for quadrelay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    #[must_use]
    pub fn peer_disconnected(detail: impl Into<String>) -> Self {
        Self::PeerDisconnected(detail.into())
    }

    #[must_use]
    pub fn room_unavailable(code: impl Into<String>) -> Self {
        Self::RoomUnavailable(code.into())
    }

    /// Whether this error represents a connection tearing down, as opposed
    /// to a programming error or resource exhaustion.
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::PeerDisconnected(_) | Self::RoomUnavailable(_) | Self::ChannelClosed
        )
    }
}
