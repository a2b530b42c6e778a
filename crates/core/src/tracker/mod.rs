//! Receive-side acknowledgment tracking.
//!
//! This module records which packet numbers the local endpoint has received
//! over an unreliable, reorderable, duplicating channel and produces the
//! acknowledgment summaries the peer needs to reconstruct the received set.
//!
//! Two pieces:
//!
//! - [`ReceivedRangeSet`]: an ordered collection of disjoint, non-adjacent
//!   ranges of received packet numbers with coalescing insertion and bounded
//!   growth.
//! - [`ReceivedPacketTracker`]: the connection-facing half. It validates
//!   inbound packet numbers, applies peer-advertised pruning thresholds and
//!   builds/caches [`AckSummary`] values for the send path.
//!
//! The tracker is not internally synchronized. All operations are synchronous
//! and must be driven from the connection's event loop (or otherwise
//! serialized); effects are ordered by call order, not by packet number.
//! Packet-number reordering on the wire is exactly what the tracker absorbs,
//! call reordering is not.

use std::time::Instant;

mod errors;
mod received_packet_tracker;
mod received_range_set;

pub use errors::AckTrackError;
pub use received_packet_tracker::{ReceiveStats, ReceivedPacketTracker};
pub use received_range_set::ReceivedRangeSet;

/// Sender-assigned packet sequence identifier. Strictly positive; the value 0
/// is reserved and always rejected.
pub type PacketNumber = u64;

/// Default cap on distinct packet numbers retained per tracker.
pub const DEFAULT_MAX_TRACKED_PACKETS: usize = 2000;

/// Default cap on disjoint ack ranges retained per tracker.
pub const DEFAULT_MAX_TRACKED_RANGES: usize = 1000;

/// A maximal run of consecutively received packet numbers, both ends
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckRange {
    pub first: PacketNumber,
    pub last: PacketNumber,
}

impl AckRange {
    pub(crate) fn new(first: PacketNumber, last: PacketNumber) -> Self {
        debug_assert!(first <= last);
        AckRange { first, last }
    }

    /// Number of packet numbers covered by this range.
    pub fn len(&self) -> u64 {
        self.last - self.first + 1
    }
}

/// Snapshot of everything the peer needs to reconstruct the received set.
///
/// `ack_ranges` is empty when the tracked history is a single contiguous
/// block, since `lowest_acked..=largest_acked` already describes it; when
/// gaps exist it lists every range, highest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckSummary {
    /// Highest packet number received so far.
    pub largest_acked: PacketNumber,
    /// First packet number of the earliest surviving range.
    pub lowest_acked: PacketNumber,
    /// Disjoint received ranges in descending order, or empty if the history
    /// is one contiguous block.
    pub ack_ranges: Vec<AckRange>,
    /// Arrival time of the packet that set `largest_acked`, carried through
    /// for the peer's RTT estimation.
    pub received_time: Instant,
}

impl AckSummary {
    /// True when the received set is fragmented and the summary had to
    /// enumerate individual ranges.
    pub fn has_missing_ranges(&self) -> bool {
        !self.ack_ranges.is_empty()
    }
}
