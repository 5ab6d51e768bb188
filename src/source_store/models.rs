use crate::error::SkipReason;

/// A track as Banshee stores it. Both columns are nullable in practice, so
/// nothing is validated at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTrackRecord {
    pub uri: Option<String>,
    pub rating: Option<i64>,
}

/// A Banshee star rating, guaranteed to be within `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceRating(u8);

impl SourceRating {
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Option<Self> {
        (stars <= Self::MAX).then_some(Self(stars))
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<Option<i64>> for SourceRating {
    type Error = SkipReason;

    fn try_from(raw: Option<i64>) -> Result<Self, Self::Error> {
        raw.and_then(|r| u8::try_from(r).ok())
            .and_then(SourceRating::new)
            .ok_or(SkipReason::InvalidRating)
    }
}
