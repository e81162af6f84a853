//! Summary insights for one benchmark-vs-candidate comparison.

use serde::{Deserialize, Serialize};

use crate::matching::comparison::ComparisonVector;
use crate::matching::format_rate;

const TOP_REASON_COUNT: usize = 3;

pub const BALANCED_MESSAGE: &str = "This candidate shows balanced performance across all TGVs.";
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Could not determine detailed comparison insights.";

/// Candidate vs benchmark on one TGV; `diff = candidate_value - benchmark_average`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainDelta {
    pub tgv_name: String,
    pub candidate_value: f64,
    pub benchmark_average: f64,
    pub diff: f64,
}

impl DomainDelta {
    pub fn summary(&self) -> String {
        format!(
            "{}: Candidate {} | Benchmark {}",
            self.tgv_name,
            format_rate(self.candidate_value),
            format_rate(self.benchmark_average)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub tgv_name: String,
    pub candidate_value: f64,
}

impl Reason {
    pub fn line(&self) -> String {
        format!("Strong {} ({})", self.tgv_name, format_rate(self.candidate_value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reasons", rename_all = "snake_case")]
pub enum TopReasons {
    Standout(Vec<Reason>),
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonInsights {
    InsufficientData,
    Available {
        strongest_area: DomainDelta,
        largest_gap: DomainDelta,
        top_reasons: TopReasons,
    },
}

impl ComparisonInsights {
    /// Text lines for the insight panel, one decimal place.
    pub fn lines(&self) -> Vec<String> {
        match self {
            ComparisonInsights::InsufficientData => vec![INSUFFICIENT_DATA_MESSAGE.to_string()],
            ComparisonInsights::Available {
                strongest_area,
                largest_gap,
                top_reasons,
            } => {
                let mut lines = vec![
                    format!("Strongest Area: {}", strongest_area.summary()),
                    format!("Largest Gap: {}", largest_gap.summary()),
                ];
                match top_reasons {
                    TopReasons::Standout(reasons) => lines.extend(reasons.iter().map(Reason::line)),
                    TopReasons::Balanced => lines.push(BALANCED_MESSAGE.to_string()),
                }
                lines
            }
        }
    }
}

/// Derives strongest area, largest gap and top reasons from a comparison vector.
///
/// Ties on diff resolve to the earliest domain. Reasons are the three highest
/// candidate values that meet or beat the benchmark; when none qualify, or the
/// candidate matches the benchmark on every domain, the result is `Balanced`.
pub fn compute_insights(vector: &ComparisonVector) -> ComparisonInsights {
    let deltas: Vec<DomainDelta> = vector
        .domains
        .iter()
        .map(|d| DomainDelta {
            tgv_name: d.tgv_name.clone(),
            candidate_value: d.candidate_value,
            benchmark_average: d.benchmark_average,
            diff: d.candidate_value - d.benchmark_average,
        })
        .filter(|d| !d.diff.is_nan())
        .collect();

    let Some(first) = deltas.first() else {
        return ComparisonInsights::InsufficientData;
    };

    let mut strongest = first;
    let mut weakest = first;
    for delta in &deltas {
        if delta.diff > strongest.diff {
            strongest = delta;
        }
        if delta.diff < weakest.diff {
            weakest = delta;
        }
    }

    let mut by_candidate: Vec<&DomainDelta> = deltas.iter().collect();
    by_candidate.sort_by(|a, b| b.candidate_value.total_cmp(&a.candidate_value));

    let reasons: Vec<Reason> = by_candidate
        .into_iter()
        .take(TOP_REASON_COUNT)
        .filter(|d| d.candidate_value >= d.benchmark_average)
        .map(|d| Reason {
            tgv_name: d.tgv_name.clone(),
            candidate_value: d.candidate_value,
        })
        .collect();

    let all_even = deltas.iter().all(|d| d.diff == 0.0);
    let top_reasons = if reasons.is_empty() || all_even {
        TopReasons::Balanced
    } else {
        TopReasons::Standout(reasons)
    };

    ComparisonInsights::Available {
        strongest_area: strongest.clone(),
        largest_gap: weakest.clone(),
        top_reasons,
    }
}
