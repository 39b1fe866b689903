//! Render-ready data for the radar chart and the shareable result card.
//!
//! Drawing happens elsewhere; these types carry everything a renderer needs
//! so it never has to reach back into scoring.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::describe::MoodDescription;
use crate::mood::{MoodDimension, MoodVector};

/// Scale maximum for chart ratios
const CHART_MAX: f64 = 100.0;

/// One spoke of the radar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarAxis {
    pub dimension: MoodDimension,
    pub label: String,
    /// Unclamped profile value
    pub value: f64,
    /// `value / 100` clamped to `[0, 1]`
    pub ratio: f64,
    /// Point on the unit circle scaled by `ratio`, y pointing up
    pub x: f64,
    pub y: f64,
}

/// Radar chart geometry for a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    pub axes: Vec<RadarAxis>,
}

impl RadarChart {
    /// Lay out one axis per dimension, starting at 12 o'clock and going clockwise
    pub fn from_profile(profile: &MoodVector) -> Self {
        let count = MoodDimension::ALL.len() as f64;
        let axes = profile
            .entries()
            .enumerate()
            .map(|(i, (dimension, value))| {
                let ratio = if value.is_finite() {
                    (value / CHART_MAX).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let angle = TAU * i as f64 / count;
                RadarAxis {
                    dimension,
                    label: dimension.label().to_string(),
                    value,
                    ratio,
                    x: ratio * angle.sin(),
                    y: ratio * angle.cos(),
                }
            })
            .collect();

        Self { axes }
    }
}

/// Everything shown on the shareable result image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareCard {
    pub headline: String,
    pub summary: String,
    pub traits: Vec<String>,
    pub primary_dimensions: Vec<String>,
    pub hashtags: Vec<String>,
    pub chart: RadarChart,
}

impl ShareCard {
    pub fn new(profile: &MoodVector, description: &MoodDescription) -> Self {
        let headline = match description.primary_dimensions.first() {
            Some(top) => format!("나의 밤 무드는 '{top}' 중심"),
            None => "나의 밤 무드".to_string(),
        };

        let hashtags = description
            .traits
            .iter()
            .map(|t| format!("#{t}"))
            .collect();

        Self {
            headline,
            summary: description.summary.clone(),
            traits: description.traits.clone(),
            primary_dimensions: description.primary_dimensions.clone(),
            hashtags,
            chart: RadarChart::from_profile(profile),
        }
    }

    /// Plain-text body used when the image cannot be copied
    pub fn share_text(&self) -> String {
        let scores = self
            .chart
            .axes
            .iter()
            .map(|a| format!("{} {:.0}", a.label, a.value))
            .collect::<Vec<_>>()
            .join(" · ");

        format!(
            "{}\n{}\n{}\n{}",
            self.headline,
            self.summary,
            scores,
            self.hashtags.join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::describe_profile;

    fn profile() -> MoodVector {
        MoodVector {
            energy: 100.0,
            intimacy: 50.0,
            creativity: 0.0,
            nostalgia: 120.0,
            depth: -5.0,
            openness: 75.0,
        }
    }

    #[test]
    fn test_axes_in_dimension_order() {
        let chart = RadarChart::from_profile(&profile());
        let dims: Vec<_> = chart.axes.iter().map(|a| a.dimension).collect();
        assert_eq!(dims, MoodDimension::ALL.to_vec());
    }

    #[test]
    fn test_ratios_clamped_values_kept() {
        let chart = RadarChart::from_profile(&profile());
        assert_eq!(chart.axes[3].value, 120.0);
        assert_eq!(chart.axes[3].ratio, 1.0);
        assert_eq!(chart.axes[4].ratio, 0.0);
        assert_eq!(chart.axes[1].ratio, 0.5);
    }

    #[test]
    fn test_first_axis_points_up() {
        let chart = RadarChart::from_profile(&profile());
        let energy = &chart.axes[0];
        assert!(energy.x.abs() < 1e-12);
        assert!((energy.y - 1.0).abs() < 1e-12);

        // second axis is 60 degrees clockwise
        let intimacy = &chart.axes[1];
        assert!(intimacy.x > 0.0);
        assert!((intimacy.x - 0.5 * (TAU / 6.0).sin()).abs() < 1e-12);
    }

    #[test]
    fn test_share_card() {
        let profile = profile();
        let description = describe_profile(&profile, None);
        let card = ShareCard::new(&profile, &description);

        assert_eq!(card.headline, "나의 밤 무드는 '향수' 중심");
        assert_eq!(card.hashtags.len(), 6);
        assert_eq!(card.hashtags[0], "#역동적인");

        let text = card.share_text();
        assert!(text.contains(&description.summary));
        assert!(text.contains("에너지 100"));
        assert!(text.ends_with("#탐험적인"));
    }
}
