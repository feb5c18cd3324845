//! Async TCP peer connection using `tokio`.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::{MessageKind, P2pError, P2pMessage};

/// One connection to a peer node. Frames flow through the same wire
/// format as the blocking [`read_message`](crate::read_message), just
/// against an async stream.
pub struct PeerConnection {
    stream: TcpStream,
    peer: String,
}

impl PeerConnection {
    /// Opens a TCP connection to the given peer address.
    pub async fn connect(addr: &str) -> Result<Self, P2pError> {
        let stream =
            TcpStream::connect(addr).await.map_err(P2pError::Io)?;
        tracing::info!(peer = addr, "connected");
        Ok(Self {
            stream,
            peer: addr.to_string(),
        })
    }

    /// The address this connection was opened against.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Fills `buf`, mapping end-of-stream to an incomplete read.
    async fn read_full(&mut self, buf: &mut [u8]) -> Result<(), P2pError> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self
                .stream
                .read(&mut buf[filled..])
                .await
                .map_err(P2pError::Io)?;
            if n == 0 {
                return Err(P2pError::IncompleteRead {
                    needed: buf.len() - filled,
                });
            }
            filled += n;
        }
        Ok(())
    }

    /// Reads the next frame from the peer.
    pub async fn read_message(&mut self) -> Result<P2pMessage, P2pError> {
        let mut len_bytes = [0u8; 4];
        self.read_full(&mut len_bytes).await?;
        let length = u32::from_le_bytes(len_bytes) as usize;
        crate::check_length(length)?;

        let mut body = vec![0u8; length];
        self.read_full(&mut body).await?;

        let kind = MessageKind::try_from_tag(body[0])?;
        let payload = body[1..].to_vec();
        tracing::debug!(
            peer = %self.peer,
            kind = %kind,
            payload_len = payload.len(),
            "received frame"
        );

        Ok(P2pMessage { kind, payload })
    }

    /// Sends one frame to the peer.
    pub async fn send(&mut self, msg: &P2pMessage) -> Result<(), P2pError> {
        let bytes = msg.to_bytes()?;
        self.stream
            .write_all(&bytes)
            .await
            .map_err(P2pError::Io)?;
        tracing::debug!(peer = %self.peer, kind = %msg.kind, "sent frame");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SyncRequestMessage, TypedMessage};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_frames_round_trip_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let sync = SyncRequestMessage {
                start_block: 10,
                end_block: 20,
            };
            let frame = P2pMessage::from_payload(&sync).unwrap();
            socket.write_all(&frame.to_bytes().unwrap()).await.unwrap();
        });

        let mut conn = PeerConnection::connect(&addr).await.unwrap();
        let msg = conn.read_message().await.unwrap();
        match msg.as_typed().unwrap() {
            TypedMessage::SyncRequest(sync) => {
                assert_eq!(sync.start_block, 10);
                assert_eq!(sync.end_block, 20);
            }
            other => panic!("decoded as {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_remote_close_mid_frame_is_incomplete_read() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // Declares 8 bytes, sends the tag plus 3, then hangs up.
            socket
                .write_all(&[8, 0, 0, 0, 2, 1, 2, 3])
                .await
                .unwrap();
        });

        let mut conn = PeerConnection::connect(&addr).await.unwrap();
        let err = conn.read_message().await.unwrap_err();
        assert!(matches!(err, P2pError::IncompleteRead { needed: 4 }));
        server.await.unwrap();
    }
}
