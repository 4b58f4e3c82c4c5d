//! Half-open time intervals.

use chrono::TimeDelta;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::TimeError;
use crate::instant::Instant;

/// `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Instant,
    end: Instant,
}

impl Interval {
    /// Create an interval. Fails unless `start < end`.
    pub fn new(start: Instant, end: Instant) -> Result<Self, TimeError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(TimeError::InvalidInterval)
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// `start <= t < end`.
    pub fn contains(&self, t: &Instant) -> bool {
        self.start <= *t && *t < self.end
    }

    /// `self` ends exactly where `next` starts.
    pub fn touches(&self, next: &Interval) -> bool {
        self.end == next.start
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn midpoint(&self) -> Instant {
        self.start.midpoint(&self.end)
    }

    /// Smallest interval covering both.
    pub fn hull(&self, other: &Interval) -> Interval {
        Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start.utc())?;
        s.serialize_field("end", &self.end.utc())?;
        s.end()
    }
}
