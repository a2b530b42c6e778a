use std::time::Instant;

use tracing::{trace, warn};

use super::received_range_set::ReceivedRangeSet;
use super::{
    AckSummary, AckTrackError, PacketNumber, DEFAULT_MAX_TRACKED_PACKETS,
    DEFAULT_MAX_TRACKED_RANGES,
};
use crate::util::{InstantTimeSrc, TimeSource};

/// Receive-side acknowledgment state for a single connection.
///
/// The connection layer reports every packet number it accepts off the wire
/// through [`record_received`](Self::record_received), feeds peer "least
/// unacked" hints to [`apply_peer_threshold`](Self::apply_peer_threshold) and
/// asks [`build_ack_summary`](Self::build_ack_summary) for the next outgoing
/// acknowledgment. The boolean passed there distinguishes "about to transmit
/// this" (dequeue, clears the pending state) from "peeking to decide whether
/// to piggyback" (non-destructive).
///
/// A capacity error from `record_received` means either a misbehaving peer or
/// pathological reordering; the tracker refuses the insertion and the caller
/// is expected to close the connection.
pub struct ReceivedPacketTracker<T: TimeSource = InstantTimeSrc> {
    /// Highest packet number ever accepted. Monotonic; 0 until the first
    /// packet arrives.
    largest_observed: PacketNumber,
    /// When `largest_observed` was last raised. Not updated for packets that
    /// arrive late.
    largest_observed_time: Option<Instant>,
    /// Peer threshold: packet numbers at or below it are already implicitly
    /// acknowledged and must not be re-tracked. Monotonic.
    ignore_below: PacketNumber,
    history: ReceivedRangeSet,
    /// True after a dequeuing summary build, false again as soon as any new
    /// packet is accepted.
    ack_sent_for_current_state: bool,
    cached_summary: Option<AckSummary>,
    stats: ReceiveStats,
    time_source: T,
}

impl ReceivedPacketTracker<InstantTimeSrc> {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_TRACKED_PACKETS, DEFAULT_MAX_TRACKED_RANGES)
    }

    /// Both limits must be positive.
    pub fn with_limits(max_tracked_packets: usize, max_tracked_ranges: usize) -> Self {
        Self::with_time_source(max_tracked_packets, max_tracked_ranges, InstantTimeSrc::new())
    }
}

impl<T: TimeSource> ReceivedPacketTracker<T> {
    pub fn with_time_source(
        max_tracked_packets: usize,
        max_tracked_ranges: usize,
        time_source: T,
    ) -> Self {
        ReceivedPacketTracker {
            largest_observed: 0,
            largest_observed_time: None,
            ignore_below: 0,
            history: ReceivedRangeSet::new(max_tracked_packets, max_tracked_ranges),
            ack_sent_for_current_state: false,
            cached_summary: None,
            stats: ReceiveStats::default(),
            time_source,
        }
    }

    /// Records a packet number accepted off the wire.
    ///
    /// Any accepted packet invalidates a previously handed-out acknowledgment
    /// state, even one below `largest_observed`: it may fill a gap and change
    /// the range structure the next summary reports.
    pub fn record_received(&mut self, packet_number: PacketNumber) -> Result<(), AckTrackError> {
        if packet_number == 0 {
            return Err(AckTrackError::InvalidPacketNumber);
        }
        if packet_number <= self.ignore_below {
            self.stats.below_threshold_rejected += 1;
            return Err(AckTrackError::BelowPeerThreshold);
        }
        if self.history.contains(packet_number) {
            self.stats.duplicates_rejected += 1;
            return Err(AckTrackError::DuplicatePacket);
        }
        if let Err(error) = self.history.insert(packet_number) {
            warn!(
                "refusing to track packet {}: {} ({} packets in {} ranges)",
                packet_number,
                error,
                self.history.len(),
                self.history.range_count()
            );
            return Err(error);
        }
        if packet_number > self.largest_observed {
            self.largest_observed = packet_number;
            self.largest_observed_time = Some(self.time_source.now());
        }
        self.stats.packets_recorded += 1;
        self.ack_sent_for_current_state = false;
        self.cached_summary = None;
        Ok(())
    }

    /// Applies a peer hint that nothing below `least_unacked` needs to be
    /// acknowledged anymore. Stale or out-of-order hints never lower the
    /// threshold; a hint of 0 or 1 has no effect.
    pub fn apply_peer_threshold(&mut self, least_unacked: PacketNumber) {
        let candidate = least_unacked.saturating_sub(1);
        if candidate <= self.ignore_below {
            return;
        }
        trace!(
            "raising ack threshold from {} to {}",
            self.ignore_below,
            candidate
        );
        self.ignore_below = candidate;
        self.history.delete_below_and_including(candidate);
        // Pruning may have changed the range structure, so a previously built
        // summary no longer describes the state. The pending-ack flag is left
        // alone: the peer gained no new information to be told about.
        self.cached_summary = None;
    }

    /// Builds the acknowledgment summary for the current state, or returns
    /// the cached one if nothing changed since it was built.
    ///
    /// Returns `None` when there is nothing to acknowledge (no packet ever
    /// received, or everything received has been pruned), or when `dequeue`
    /// is set and an acknowledgment for this exact state has already been
    /// handed out.
    pub fn build_ack_summary(&mut self, dequeue: bool) -> Option<AckSummary> {
        if self.history.is_empty() {
            return None;
        }
        if self.ack_sent_for_current_state && dequeue {
            return None;
        }
        if self.cached_summary.is_none() {
            self.cached_summary = Some(self.make_summary()?);
        }
        if dequeue {
            self.ack_sent_for_current_state = true;
        }
        self.cached_summary.clone()
    }

    fn make_summary(&self) -> Option<AckSummary> {
        let ranges = self.history.ranges();
        let lowest_acked = ranges.first()?.first;
        let ack_ranges = if ranges.len() == 1 {
            // A single contiguous block is fully described by
            // `lowest_acked..=largest_acked`.
            Vec::new()
        } else {
            ranges.iter().rev().copied().collect()
        };
        Some(AckSummary {
            largest_acked: self.largest_observed,
            lowest_acked,
            ack_ranges,
            received_time: self.largest_observed_time?,
        })
    }

    /// Highest packet number ever accepted, 0 if none yet.
    pub fn largest_observed(&self) -> PacketNumber {
        self.largest_observed
    }

    /// Current peer-advertised pruning threshold.
    pub fn ignore_below(&self) -> PacketNumber {
        self.ignore_below
    }

    pub fn stats(&self) -> &ReceiveStats {
        &self.stats
    }
}

/// Counters kept for observability; nothing in the tracker's behavior depends
/// on them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveStats {
    pub packets_recorded: u64,
    pub duplicates_rejected: u64,
    pub below_threshold_rejected: u64,
}
