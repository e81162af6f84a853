//! Ranked candidate list and per-employee top TGV.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::matching::dedup_domain_rows;
use crate::models::employee::EmployeeDirectoryEntry;
use crate::models::scoring::ScoredRow;

/// `top_tgv` value for an employee with no domain rows.
pub const NO_TOP_TGV: &str = "N/A";

/// One row of the ranked talent table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based, contiguous.
    pub rank: usize,
    pub employee_id: String,
    pub fullname: String,
    pub final_match_rate: f64,
    pub role: Option<String>,
    pub grade: Option<String>,
    pub directorate: Option<String>,
    pub top_tgv: String,
}

/// Maps each employee to the TGV with their highest `tgv_match_rate`.
///
/// Rows are de-duplicated on (employee_id, tgv_name) first. Exact ties keep the
/// domain that appears first. Employees without any scored domain are absent.
pub fn compute_top_domain_per_employee(rows: &[ScoredRow]) -> BTreeMap<String, String> {
    let mut best: BTreeMap<&str, (&str, f64)> = BTreeMap::new();

    for row in dedup_domain_rows(rows) {
        let Some((tgv_name, rate)) = row.domain_score() else {
            continue;
        };
        match best.get_mut(row.employee_id.as_str()) {
            Some(current) if rate > current.1 => *current = (tgv_name, rate),
            Some(_) => {}
            None => {
                best.insert(row.employee_id.as_str(), (tgv_name, rate));
            }
        }
    }

    best.into_iter()
        .map(|(employee_id, (tgv_name, _))| (employee_id.to_string(), tgv_name.to_string()))
        .collect()
}

/// Builds the ranked candidate table.
///
/// 1. one row per employee (first occurrence)
/// 2. attach fullname from the directory; drop employees with no or empty name
/// 3. attach top TGV, defaulting to `"N/A"`
/// 4. drop benchmarks
/// 5. stable sort by `final_match_rate` descending (NaN last), assign ranks
pub fn build_ranked_candidates(
    rows: &[ScoredRow],
    directory: &[EmployeeDirectoryEntry],
) -> Vec<RankedCandidate> {
    let mut names: HashMap<&str, &str> = HashMap::with_capacity(directory.len());
    for entry in directory {
        names
            .entry(entry.employee_id.as_str())
            .or_insert(entry.fullname.as_str());
    }

    let top_domains = compute_top_domain_per_employee(rows);
    let mut seen: HashSet<&str> = HashSet::new();
    let mut candidates = Vec::new();

    for row in rows {
        if !seen.insert(row.employee_id.as_str()) {
            continue;
        }

        let fullname = match names.get(row.employee_id.as_str()) {
            Some(name) if !name.is_empty() => *name,
            _ => continue,
        };

        if row.is_benchmark {
            continue;
        }

        let top_tgv = top_domains
            .get(&row.employee_id)
            .cloned()
            .unwrap_or_else(|| NO_TOP_TGV.to_string());

        candidates.push(RankedCandidate {
            rank: 0,
            employee_id: row.employee_id.clone(),
            fullname: fullname.to_string(),
            final_match_rate: row.final_match_rate,
            role: row.role.clone(),
            grade: row.grade.clone(),
            directorate: row.directorate.clone(),
            top_tgv,
        });
    }

    candidates.sort_by(|a, b| match_rate_descending(a.final_match_rate, b.final_match_rate));

    for (index, candidate) in candidates.iter_mut().enumerate() {
        candidate.rank = index + 1;
    }

    candidates
}

/// Descending order with NaN sorted after every number.
fn match_rate_descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
