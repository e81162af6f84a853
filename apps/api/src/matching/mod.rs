//! Ranking & aggregation over the rows returned by `get_talent_matches`.
//!
//! Everything here is a pure function of its inputs: the caller passes the
//! stored `LastQueryResult` rows (and the directory) on every call.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::employee::EmployeeDirectoryEntry;
use crate::models::scoring::ScoredRow;

pub mod comparison;
pub mod distribution;
pub mod handlers;
pub mod insights;
pub mod pipeline;
pub mod ranking;

use comparison::{build_comparison_vector, ComparisonVector, RadarChart, CANONICAL_TGVS};
use distribution::{domain_distribution, match_rate_histogram, DomainAverage, HistogramBin};
use insights::{compute_insights, ComparisonInsights};
use ranking::{build_ranked_candidates, RankedCandidate};

pub const MATCH_RATE_MIN: f64 = 0.0;
pub const MATCH_RATE_MAX: f64 = 100.0;

/// Everything the dashboard shows below the job profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub ranked: Vec<RankedCandidate>,
    pub histogram: Vec<HistogramBin>,
    pub domain_averages: Vec<DomainAverage>,
    /// Comparison for the rank-1 candidate; `None` when nobody is ranked.
    pub default_comparison: Option<CandidateComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateComparison {
    pub comparison: ComparisonVector,
    pub radar: RadarChart,
    pub insights: ComparisonInsights,
    pub insight_lines: Vec<String>,
}

pub fn build_dashboard(rows: &[ScoredRow], directory: &[EmployeeDirectoryEntry]) -> Dashboard {
    let ranked = build_ranked_candidates(rows, directory);
    let histogram = match_rate_histogram(&ranked);
    let domain_averages = domain_distribution(rows);
    let default_comparison = ranked
        .first()
        .map(|top| compare_candidate(rows, &top.employee_id));

    Dashboard {
        ranked,
        histogram,
        domain_averages,
        default_comparison,
    }
}

/// Benchmark-vs-candidate view over the canonical TGVs.
pub fn compare_candidate(rows: &[ScoredRow], candidate_id: &str) -> CandidateComparison {
    let comparison = build_comparison_vector(rows, candidate_id, &CANONICAL_TGVS);
    let radar = RadarChart::from(&comparison);
    let insights = compute_insights(&comparison);
    let insight_lines = insights.lines();

    CandidateComparison {
        comparison,
        radar,
        insights,
        insight_lines,
    }
}

/// Display form of a match rate: one decimal place and a percent sign.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}

/// Keeps the first row of each (employee_id, tgv_name) pair, in input order.
pub(crate) fn dedup_domain_rows<'a>(
    rows: impl IntoIterator<Item = &'a ScoredRow>,
) -> Vec<&'a ScoredRow> {
    let mut seen: HashSet<(&str, Option<&str>)> = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert((row.employee_id.as_str(), row.tgv_name.as_deref())))
        .collect()
}

/// Mean `tgv_match_rate` per TGV over de-duplicated rows, keyed alphabetically.
///
/// Rows without a scored domain are skipped.
pub(crate) fn domain_means<'a>(
    rows: impl IntoIterator<Item = &'a ScoredRow>,
) -> BTreeMap<&'a str, f64> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in dedup_domain_rows(rows) {
        if let Some((tgv_name, rate)) = row.domain_score() {
            let slot = sums.entry(tgv_name).or_insert((0.0, 0));
            slot.0 += rate;
            slot.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(tgv_name, (sum, count))| (tgv_name, sum / count as f64))
        .collect()
}
