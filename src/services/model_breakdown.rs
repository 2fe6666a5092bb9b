//! Per-model averages ("single model" mode for every model at once)

use rayon::prelude::*;
use std::collections::BTreeSet;

use super::{ScoreAggregator, ScoreCombiner};
use crate::types::{ModelSummary, PostAnalysis};

/// Breaks analyses down by the model that produced them
pub struct ModelBreakdown;

impl ModelBreakdown {
    /// Distinct model ids, sorted
    pub fn model_ids(analyses: &[&PostAnalysis]) -> Vec<String> {
        analyses
            .iter()
            .map(|a| a.model_id.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Averages per model, sorted by `model_id`
    pub fn by_model(analyses: &[&PostAnalysis]) -> Vec<ModelSummary> {
        Self::model_ids(analyses)
            .into_par_iter()
            .map(|model_id| {
                let posts = ScoreCombiner::combine(analyses.iter().copied(), Some(model_id.as_str()));
                ModelSummary {
                    post_count: posts.len() as u64,
                    averages: ScoreAggregator::averages(&posts),
                    model_id,
                }
            })
            .collect()
    }
}
