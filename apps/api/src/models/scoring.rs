use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of `get_talent_matches`: an (employee, TGV) pair.
///
/// Employee-level columns (`role`, `grade`, `directorate`, `final_match_rate`,
/// `is_benchmark`) repeat on every domain row of the same employee.
/// `tgv_name` / `tgv_match_rate` are NULL for an employee with no domain scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ScoredRow {
    pub employee_id: String,
    pub role: Option<String>,
    pub grade: Option<String>,
    pub directorate: Option<String>,
    pub final_match_rate: f64,
    pub is_benchmark: bool,
    pub tgv_name: Option<String>,
    pub tgv_match_rate: Option<f64>,
}

impl ScoredRow {
    /// The (domain, rate) pair when both are present and the rate is a number.
    pub fn domain_score(&self) -> Option<(&str, f64)> {
        match (self.tgv_name.as_deref(), self.tgv_match_rate) {
            (Some(name), Some(rate)) if !rate.is_nan() => Some((name, rate)),
            _ => None,
        }
    }
}
