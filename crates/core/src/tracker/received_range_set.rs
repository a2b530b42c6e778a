use super::{AckRange, AckTrackError, PacketNumber};

/// Ordered collection of disjoint, non-adjacent ranges covering exactly the
/// packet numbers received and not yet pruned.
///
/// Insertion coalesces: a packet number that extends a range by one is folded
/// into it, and two ranges that come to touch are merged, so consecutive
/// ranges are always separated by at least one missing packet number. Growth
/// is bounded both by distinct packet count and by fragment count, which caps
/// the memory an adversarial delivery pattern can pin.
pub struct ReceivedRangeSet {
    /// Ascending by `first`, pairwise disjoint, never adjacent.
    ranges: Vec<AckRange>,
    /// Sum of range lengths, maintained incrementally.
    tracked: usize,
    max_tracked_packets: usize,
    max_tracked_ranges: usize,
}

impl ReceivedRangeSet {
    pub fn new(max_tracked_packets: usize, max_tracked_ranges: usize) -> Self {
        assert!(
            max_tracked_packets > 0 && max_tracked_ranges > 0,
            "capacity limits must be positive"
        );
        ReceivedRangeSet {
            ranges: Vec::new(),
            tracked: 0,
            max_tracked_packets,
            max_tracked_ranges,
        }
    }

    /// Number of distinct packet numbers currently tracked.
    pub fn len(&self) -> usize {
        self.tracked
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of disjoint ranges currently tracked.
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Current ranges in ascending order.
    pub fn ranges(&self) -> &[AckRange] {
        &self.ranges
    }

    /// Smallest tracked packet number.
    pub fn lowest(&self) -> Option<PacketNumber> {
        self.ranges.first().map(|r| r.first)
    }

    /// Largest tracked packet number.
    pub fn highest(&self) -> Option<PacketNumber> {
        self.ranges.last().map(|r| r.last)
    }

    pub fn contains(&self, packet_number: PacketNumber) -> bool {
        let idx = self.ranges.partition_point(|r| r.first <= packet_number);
        idx > 0 && self.ranges[idx - 1].last >= packet_number
    }

    /// Adds a single packet number, merging with its neighbors where it
    /// extends a range or closes a gap. A number already present is a no-op.
    ///
    /// Fails without modifying the set when the insertion would exceed either
    /// capacity limit.
    pub fn insert(&mut self, packet_number: PacketNumber) -> Result<(), AckTrackError> {
        // Index of the first range starting above the packet number; the
        // range before it is the only one that could already contain it.
        let idx = self.ranges.partition_point(|r| r.first <= packet_number);
        if idx > 0 && self.ranges[idx - 1].last >= packet_number {
            return Ok(());
        }
        if self.tracked >= self.max_tracked_packets {
            return Err(AckTrackError::TooManyTrackedPackets);
        }

        let extends_prev = idx > 0 && self.ranges[idx - 1].last + 1 == packet_number;
        let extends_next =
            idx < self.ranges.len() && self.ranges[idx].first == packet_number + 1;
        match (extends_prev, extends_next) {
            (true, true) => {
                // The packet fills the last missing number between two
                // ranges, fusing them into one.
                self.ranges[idx - 1].last = self.ranges[idx].last;
                self.ranges.remove(idx);
            }
            (true, false) => self.ranges[idx - 1].last = packet_number,
            (false, true) => self.ranges[idx].first = packet_number,
            (false, false) => {
                if self.ranges.len() >= self.max_tracked_ranges {
                    return Err(AckTrackError::TooManyTrackedRanges);
                }
                self.ranges
                    .insert(idx, AckRange::new(packet_number, packet_number));
            }
        }
        self.tracked += 1;
        Ok(())
    }

    /// Removes every packet number at or below `threshold`: ranges entirely
    /// below it are dropped and a straddling range is truncated to begin at
    /// `threshold + 1`. Calling with a threshold at or below a previous one
    /// is a no-op.
    pub fn delete_below_and_including(&mut self, threshold: PacketNumber) {
        let fully_below = self.ranges.partition_point(|r| r.last <= threshold);
        for range in self.ranges.drain(..fully_below) {
            self.tracked -= range.len() as usize;
        }
        if let Some(first) = self.ranges.first_mut() {
            if first.first <= threshold {
                self.tracked -= (threshold - first.first + 1) as usize;
                first.first = threshold + 1;
            }
        }
    }
}
