//! Connects to a peer node and dumps every frame it sends.
//!
//! Usage: `p2p-dump <host:port>`
//!
//! Frames with a typed decoder are printed as values; the rest are
//! logged by kind and size. Run with `RUST_LOG=debug` to also see the
//! per-frame transport logs.

use chainwire::prelude::*;
use chainwire_p2p::PeerConnection;

#[tokio::main]
async fn main() -> Result<(), ChainwireError> {
    chainwire::init_tracing();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:9876".to_string());

    let mut conn = PeerConnection::connect(&addr).await?;
    tracing::info!(peer = %addr, "dumping frames, ctrl-c to stop");

    let mut count = 0u64;
    loop {
        let msg = match conn.read_message().await {
            Ok(msg) => msg,
            Err(P2pError::IncompleteRead { .. }) => {
                tracing::info!(frames = count, "peer closed the connection");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        count += 1;

        match msg.as_typed() {
            Ok(TypedMessage::Time(time)) => {
                tracing::info!(n = count, xmt = time.xmt.0, "time message");
            }
            Ok(TypedMessage::GoAway(go_away)) => {
                tracing::warn!(n = count, reason = %go_away.reason, "peer says go away");
                return Ok(());
            }
            Ok(TypedMessage::SyncRequest(sync)) => {
                tracing::info!(
                    n = count,
                    start = sync.start_block,
                    end = sync.end_block,
                    "sync request"
                );
            }
            Err(P2pError::NoDecodeTarget(kind)) => {
                tracing::info!(n = count, %kind, bytes = msg.payload.len(), "frame");
            }
            Err(err) => {
                tracing::warn!(n = count, kind = %msg.kind, %err, "payload did not decode");
            }
        }
    }
}
