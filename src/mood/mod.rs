//! Mood taste-space types.
//!
//! A mood profile is a point in a fixed six-dimensional space. Every scored
//! option in the catalog carries one, and the aggregator produces one per
//! finished quiz.

use serde::{Deserialize, Serialize};

/// One axis of the mood taste-space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodDimension {
    Energy,
    Intimacy,
    Creativity,
    Nostalgia,
    Depth,
    Openness,
}

impl MoodDimension {
    /// All dimensions in their fixed order
    pub const ALL: [MoodDimension; 6] = [
        MoodDimension::Energy,
        MoodDimension::Intimacy,
        MoodDimension::Creativity,
        MoodDimension::Nostalgia,
        MoodDimension::Depth,
        MoodDimension::Openness,
    ];

    /// Raw key used in serialized vectors
    pub fn key(&self) -> &'static str {
        match self {
            MoodDimension::Energy => "energy",
            MoodDimension::Intimacy => "intimacy",
            MoodDimension::Creativity => "creativity",
            MoodDimension::Nostalgia => "nostalgia",
            MoodDimension::Depth => "depth",
            MoodDimension::Openness => "openness",
        }
    }

    /// Display label shown on charts and in descriptions
    pub fn label(&self) -> &'static str {
        match self {
            MoodDimension::Energy => "에너지",
            MoodDimension::Intimacy => "친밀감",
            MoodDimension::Creativity => "창의성",
            MoodDimension::Nostalgia => "향수",
            MoodDimension::Depth => "깊이",
            MoodDimension::Openness => "개방성",
        }
    }
}

impl std::fmt::Display for MoodDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A point in the six-dimensional mood space.
///
/// Values are conceptually in `[0, 100]` but nothing clamps them; aggregation
/// results are passed through as computed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoodVector {
    pub energy: f64,
    pub intimacy: f64,
    pub creativity: f64,
    pub nostalgia: f64,
    pub depth: f64,
    pub openness: f64,
}

impl MoodVector {
    /// The all-zero vector
    pub const ZERO: MoodVector = MoodVector {
        energy: 0.0,
        intimacy: 0.0,
        creativity: 0.0,
        nostalgia: 0.0,
        depth: 0.0,
        openness: 0.0,
    };

    /// Build a vector by evaluating `f` once per dimension
    pub fn from_fn(mut f: impl FnMut(MoodDimension) -> f64) -> Self {
        Self {
            energy: f(MoodDimension::Energy),
            intimacy: f(MoodDimension::Intimacy),
            creativity: f(MoodDimension::Creativity),
            nostalgia: f(MoodDimension::Nostalgia),
            depth: f(MoodDimension::Depth),
            openness: f(MoodDimension::Openness),
        }
    }

    /// Value of a single dimension
    pub fn get(&self, dimension: MoodDimension) -> f64 {
        match dimension {
            MoodDimension::Energy => self.energy,
            MoodDimension::Intimacy => self.intimacy,
            MoodDimension::Creativity => self.creativity,
            MoodDimension::Nostalgia => self.nostalgia,
            MoodDimension::Depth => self.depth,
            MoodDimension::Openness => self.openness,
        }
    }

    /// `(dimension, value)` pairs in the fixed dimension order
    pub fn entries(&self) -> impl Iterator<Item = (MoodDimension, f64)> + '_ {
        MoodDimension::ALL.iter().map(move |&d| (d, self.get(d)))
    }

    /// True if every dimension lies within `[0, 100]`
    pub fn is_in_range(&self) -> bool {
        self.entries()
            .all(|(_, v)| v.is_finite() && (0.0..=100.0).contains(&v))
    }
}

/// Axis of the reduced four-dimensional genre space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenreDimension {
    Energy,
    Intimacy,
    Creativity,
    Nostalgia,
}

impl GenreDimension {
    pub const ALL: [GenreDimension; 4] = [
        GenreDimension::Energy,
        GenreDimension::Intimacy,
        GenreDimension::Creativity,
        GenreDimension::Nostalgia,
    ];
}

/// Mood vector used by the genre-only flow (no depth/openness)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GenreMoodVector {
    pub energy: f64,
    pub intimacy: f64,
    pub creativity: f64,
    pub nostalgia: f64,
}

impl GenreMoodVector {
    pub const ZERO: GenreMoodVector = GenreMoodVector {
        energy: 0.0,
        intimacy: 0.0,
        creativity: 0.0,
        nostalgia: 0.0,
    };

    pub fn get(&self, dimension: GenreDimension) -> f64 {
        match dimension {
            GenreDimension::Energy => self.energy,
            GenreDimension::Intimacy => self.intimacy,
            GenreDimension::Creativity => self.creativity,
            GenreDimension::Nostalgia => self.nostalgia,
        }
    }

    pub fn from_fn(mut f: impl FnMut(GenreDimension) -> f64) -> Self {
        Self {
            energy: f(GenreDimension::Energy),
            intimacy: f(GenreDimension::Intimacy),
            creativity: f(GenreDimension::Creativity),
            nostalgia: f(GenreDimension::Nostalgia),
        }
    }

    pub fn is_in_range(&self) -> bool {
        GenreDimension::ALL.iter().all(|&d| {
            let v = self.get(d);
            v.is_finite() && (0.0..=100.0).contains(&v)
        })
    }
}
