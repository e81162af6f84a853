//! Benchmark-average vs single-candidate comparison over the canonical TGVs.

use serde::{Deserialize, Serialize};

use crate::matching::{domain_means, MATCH_RATE_MAX, MATCH_RATE_MIN};
use crate::models::scoring::ScoredRow;

/// TGVs shown on the radar chart, in axis order.
pub const CANONICAL_TGVS: [&str; 5] = [
    "Competency",
    "Psychometric (Cognitive)",
    "Psychometric (Personality)",
    "Behavioral (Strengths)",
    "Contextual (Background)",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainComparison {
    pub tgv_name: String,
    pub benchmark_average: f64,
    pub candidate_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonVector {
    pub candidate_id: String,
    /// Aligned to the requested domain order; one entry per domain.
    pub domains: Vec<DomainComparison>,
}

/// Compares the benchmark average against one candidate for each of `canonical_domains`.
///
/// Domains with no data on either side read as 0.
pub fn build_comparison_vector(
    rows: &[ScoredRow],
    candidate_id: &str,
    canonical_domains: &[&str],
) -> ComparisonVector {
    let benchmark = domain_means(rows.iter().filter(|row| row.is_benchmark));
    let candidate = domain_means(rows.iter().filter(|row| row.employee_id == candidate_id));

    let domains = canonical_domains
        .iter()
        .map(|&tgv_name| DomainComparison {
            tgv_name: tgv_name.to_string(),
            benchmark_average: benchmark.get(tgv_name).copied().unwrap_or(0.0),
            candidate_value: candidate.get(tgv_name).copied().unwrap_or(0.0),
        })
        .collect();

    ComparisonVector {
        candidate_id: candidate_id.to_string(),
        domains,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Polar chart data: one closed trace per series over `theta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    pub title: String,
    pub theta: Vec<String>,
    pub radial_range: [f64; 2],
    pub series: Vec<RadarSeries>,
}

impl From<&ComparisonVector> for RadarChart {
    fn from(vector: &ComparisonVector) -> Self {
        let id = &vector.candidate_id;
        Self {
            title: format!("TGV Comparison: Benchmark vs {id}"),
            theta: vector.domains.iter().map(|d| d.tgv_name.clone()).collect(),
            radial_range: [MATCH_RATE_MIN, MATCH_RATE_MAX],
            series: vec![
                RadarSeries {
                    name: "Benchmark Average".to_string(),
                    values: vector.domains.iter().map(|d| d.benchmark_average).collect(),
                },
                RadarSeries {
                    name: format!("Candidate ({id})"),
                    values: vector.domains.iter().map(|d| d.candidate_value).collect(),
                },
            ],
        }
    }
}
