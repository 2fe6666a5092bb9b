//! Gauge evaluation: composite emotion dials bounded to `[0, 100]`

use crate::types::{round_score, EmotionMap, GaugeDefinition, GaugeReading};

/// Value reported when none of a gauge's emotions have data.
///
/// This is a "no signal" placeholder and is not a measured 50% reading;
/// `GaugeReading::has_signal` tells the two apart.
pub const NEUTRAL_GAUGE: u32 = 50;

/// Evaluates gauge definitions against emotion averages
pub struct GaugeCalculator;

impl GaugeCalculator {
    /// Gauge value, or `None` when no referenced emotion is present
    pub fn try_compute_gauge(def: &GaugeDefinition, averages: &EmotionMap) -> Option<u32> {
        let mut sum = 0u64;
        let mut count = 0u64;

        for value in def.emotions.iter().filter_map(|e| averages.get(e)) {
            sum += u64::from((*value).min(100));
            count += 1;
        }
        for value in def.inverted_emotions.iter().filter_map(|e| averages.get(e)) {
            sum += u64::from(100 - (*value).min(100));
            count += 1;
        }

        (count > 0).then(|| round_score(sum as f64 / count as f64))
    }

    /// Gauge value, falling back to [`NEUTRAL_GAUGE`]
    pub fn compute_gauge(def: &GaugeDefinition, averages: &EmotionMap) -> u32 {
        Self::try_compute_gauge(def, averages).unwrap_or(NEUTRAL_GAUGE)
    }

    /// Evaluate every gauge, preserving definition order
    pub fn compute_all(defs: &[GaugeDefinition], averages: &EmotionMap) -> Vec<GaugeReading> {
        defs.iter()
            .map(|def| {
                let value = Self::try_compute_gauge(def, averages);
                GaugeReading {
                    name: def.name.clone(),
                    low_label: def.low_label.clone(),
                    high_label: def.high_label.clone(),
                    value: value.unwrap_or(NEUTRAL_GAUGE),
                    has_signal: value.is_some(),
                }
            })
            .collect()
    }
}
