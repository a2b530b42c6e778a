//! Receive-side acknowledgment tracking for reliable transport protocols.
//!
//! This crate is the receive half of a reliable-delivery protocol's
//! acknowledgment machinery: it records which packet numbers arrived over an
//! unreliable, reorderable, duplicating channel, enforces hard bounds on the
//! state a misbehaving peer can make it hold, honors peer "least unacked"
//! pruning hints and produces the acknowledgment summaries the send path
//! serializes to the wire.
//!
//! There is no wire format, no I/O and no internal locking here; one
//! [`ReceivedPacketTracker`] is owned per connection and driven from the
//! connection's event loop. Congestion control, retransmission timers, frame
//! serialization and the sent-packet half live with the embedding connection
//! layer.

/// Packet-number bookkeeping and acknowledgment summary generation.
pub mod tracker;

/// Shared utilities (time abstraction).
pub mod util;

pub use tracker::{
    AckRange, AckSummary, AckTrackError, PacketNumber, ReceiveStats, ReceivedPacketTracker,
    ReceivedRangeSet,
};
pub use util::{InstantTimeSrc, TimeSource};
