use thiserror::Error;

/// Errors surfaced by the acknowledgment tracker.
///
/// The capacity variants are terminal for the connection: the tracker refuses
/// the insertion that would exceed its bounds and can no longer guarantee
/// correct ack reporting, so the caller must tear the connection down. The
/// remaining variants are per-packet rejections the caller drops and moves on
/// from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AckTrackError {
    #[error("invalid packet number 0")]
    InvalidPacketNumber,

    #[error("packet already received")]
    DuplicatePacket,

    #[error("packet number at or below the peer-advertised ack threshold")]
    BelowPeerThreshold,

    #[error("too many distinct received packets tracked")]
    TooManyTrackedPackets,

    #[error("too many disjoint ack ranges tracked")]
    TooManyTrackedRanges,
}

impl AckTrackError {
    /// True for the resource-bound violations that require tearing down the
    /// connection.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AckTrackError::TooManyTrackedPackets | AckTrackError::TooManyTrackedRanges
        )
    }
}
