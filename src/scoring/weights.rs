//! Rank-based selection weights.

use serde::{Deserialize, Serialize};

/// Percentage weight for each rank, first pick to fourth pick
pub const RANK_WEIGHTS: [u32; 4] = [50, 30, 15, 5];

/// Maximum number of ranked picks within one category
pub const MAX_RANK: u8 = RANK_WEIGHTS.len() as u8;

/// The 1-based order in which an option was picked within a category.
///
/// Only orders `1..=4` can be represented, so [`Rank::weight`] is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const FIRST: Rank = Rank(1);

    /// Rank from a 1-based order
    pub fn new(order: u8) -> Option<Self> {
        (1..=MAX_RANK).contains(&order).then_some(Self(order))
    }

    /// Rank from a 0-based position
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(|i| Self::new(i.checked_add(1)?))
    }

    /// 1-based order
    pub fn order(self) -> u8 {
        self.0
    }

    /// 0-based position
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Percentage weight for this rank
    pub fn weight(self) -> u32 {
        RANK_WEIGHTS[self.index()]
    }

    /// Next rank, if any
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(order: u8) -> Result<Self, Self::Error> {
        Rank::new(order).ok_or_else(|| format!("rank must be between 1 and {MAX_RANK}, got {order}"))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

/// Weight for a 0-based position, `None` outside `0..4`
pub fn weight_for_index(index: usize) -> Option<u32> {
    Rank::from_index(index).map(Rank::weight)
}
