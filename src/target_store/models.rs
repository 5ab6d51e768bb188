use serde::Serialize;
use std::fmt;

/// Plex's stable, rename-resistant key for a metadata item (its `guid`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new<S: Into<String>>(guid: S) -> Self {
        Self(guid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Plex rating, on the 0.0..=10.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct TargetRating(f64);

impl TargetRating {
    pub const MAX: f64 = 10.0;

    pub fn new(value: f64) -> Option<Self> {
        (0.0..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Pins `value` into the Plex range.
    pub fn clamped(value: f64) -> Self {
        Self(value.clamp(0.0, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for TargetRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// An existing `metadata_item_settings` row. Plex creates these for other
/// reasons too (view counts, offsets), so the rating may be unset.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSetting {
    pub id: i64,
    pub rating: Option<f64>,
}

/// A single write against `metadata_item_settings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RatingWrite {
    Update {
        id: i64,
        account_id: AccountId,
        rating: TargetRating,
    },
    Insert {
        account_id: AccountId,
        guid: IdentityKey,
        rating: TargetRating,
    },
}

impl RatingWrite {
    pub fn sql(&self) -> &'static str {
        match self {
            RatingWrite::Update { .. } => {
                "UPDATE metadata_item_settings SET rating = :rating \
                 WHERE id = :id AND account_id = :account_id \
                 AND (rating IS NULL OR rating != :rating);"
            }
            RatingWrite::Insert { .. } => {
                "INSERT INTO metadata_item_settings (account_id, guid, rating) \
                 VALUES (:account_id, :guid, :rating);"
            }
        }
    }

    /// The named parameters bound to [`RatingWrite::sql`], for logging.
    pub fn params_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
