pub(crate) mod time_source;

#[cfg(test)]
pub use time_source::MockTimeSource;
pub use time_source::{InstantTimeSrc, TimeSource};
