//! Chart series for the dashboard: match-rate histogram and per-TGV averages.

use serde::{Deserialize, Serialize};

use crate::matching::ranking::RankedCandidate;
use crate::matching::{domain_means, MATCH_RATE_MAX, MATCH_RATE_MIN};
use crate::models::scoring::ScoredRow;

pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAverage {
    pub tgv_name: String,
    pub average_match_rate: f64,
}

/// Mean `tgv_match_rate` per TGV across every employee, ascending by mean.
///
/// Equal means stay in alphabetical TGV order. Empty input gives an empty series.
pub fn domain_distribution(rows: &[ScoredRow]) -> Vec<DomainAverage> {
    let mut averages: Vec<DomainAverage> = domain_means(rows.iter())
        .into_iter()
        .map(|(tgv_name, average_match_rate)| DomainAverage {
            tgv_name: tgv_name.to_string(),
            average_match_rate,
        })
        .collect();

    averages.sort_by(|a, b| a.average_match_rate.total_cmp(&b.average_match_rate));
    averages
}

/// 20 equal-width bins over [0, 100] of the candidates' `final_match_rate`.
///
/// 100 lands in the last bin; NaN and out-of-range rates are not counted.
/// No candidates gives an empty series.
pub fn match_rate_histogram(candidates: &[RankedCandidate]) -> Vec<HistogramBin> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let width = (MATCH_RATE_MAX - MATCH_RATE_MIN) / HISTOGRAM_BINS as f64;
    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            lower: MATCH_RATE_MIN + width * i as f64,
            upper: MATCH_RATE_MIN + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for rate in candidates.iter().map(|c| c.final_match_rate) {
        if rate.is_nan() || !(MATCH_RATE_MIN..=MATCH_RATE_MAX).contains(&rate) {
            continue;
        }
        let index = (((rate - MATCH_RATE_MIN) / width).floor() as usize).min(HISTOGRAM_BINS - 1);
        if let Some(bin) = bins.get_mut(index) {
            bin.count += 1;
        }
    }

    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::test_support::scored;

    fn candidate(rate: f64) -> RankedCandidate {
        RankedCandidate {
            rank: 1,
            employee_id: "E".to_string(),
            fullname: "Someone".to_string(),
            final_match_rate: rate,
            role: None,
            grade: None,
            directorate: None,
            top_tgv: "N/A".to_string(),
        }
    }

    #[test]
    fn test_empty_rows_give_empty_series() {
        assert!(domain_distribution(&[]).is_empty());
        assert!(match_rate_histogram(&[]).is_empty());
    }

    #[test]
    fn test_domain_averages_sorted_ascending() {
        let rows = vec![
            scored("E1", 80.0, false, Some(("Competency", 90.0))),
            scored("E2", 70.0, false, Some(("Competency", 70.0))),
            scored("E1", 80.0, false, Some(("Psychometric (Cognitive)", 40.0))),
            scored("B1", 99.0, true, Some(("Psychometric (Cognitive)", 60.0))),
        ];

        let averages = domain_distribution(&rows);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].tgv_name, "Psychometric (Cognitive)");
        assert!((averages[0].average_match_rate - 50.0).abs() < 1e-9);
        assert_eq!(averages[1].tgv_name, "Competency");
        assert!((averages[1].average_match_rate - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_domain_averages_ignore_duplicate_pairs() {
        let rows = vec![
            scored("E1", 80.0, false, Some(("Competency", 90.0))),
            scored("E1", 80.0, false, Some(("Competency", 90.0))),
            scored("E2", 70.0, false, Some(("Competency", 60.0))),
        ];
        let averages = domain_distribution(&rows);
        assert!((averages[0].average_match_rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_averages_keep_alphabetical_order() {
        let rows = vec![
            scored("E1", 80.0, false, Some(("Contextual (Background)", 50.0))),
            scored("E1", 80.0, false, Some(("Behavioral (Strengths)", 50.0))),
        ];
        let names: Vec<String> = domain_distribution(&rows)
            .into_iter()
            .map(|d| d.tgv_name)
            .collect();
        assert_eq!(names, vec!["Behavioral (Strengths)", "Contextual (Background)"]);
    }

    #[test]
    fn test_histogram_has_twenty_bins_over_full_range() {
        let bins = match_rate_histogram(&[candidate(42.0)]);
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[HISTOGRAM_BINS - 1].upper, 100.0);
        assert_eq!(bins[8].count, 1);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 1);
    }

    #[test]
    fn test_histogram_edges() {
        let bins = match_rate_histogram(&[
            candidate(0.0),
            candidate(5.0),
            candidate(100.0),
            candidate(f64::NAN),
            candidate(120.0),
        ]);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 1);
        assert_eq!(bins[19].count, 1);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }
}
