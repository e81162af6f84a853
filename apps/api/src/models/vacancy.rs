use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Job level offered by the vacancy form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobLevel {
    #[serde(rename = "Entry-Level")]
    EntryLevel,
    #[default]
    Junior,
    Senior,
    Executive,
}

impl JobLevel {
    pub const ALL: [JobLevel; 4] = [
        JobLevel::EntryLevel,
        JobLevel::Junior,
        JobLevel::Senior,
        JobLevel::Executive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobLevel::EntryLevel => "Entry-Level",
            JobLevel::Junior => "Junior",
            JobLevel::Senior => "Senior",
            JobLevel::Executive => "Executive",
        }
    }
}

impl std::fmt::Display for JobLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vacancy definition written to `job_vacancies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVacancy {
    pub role_name: String,
    pub job_level: JobLevel,
    pub role_purpose: String,
    pub benchmark_ids: Vec<String>,
}

/// One `vacancy_audit` row: a ranked candidate snapshot.
///
/// `gap_report` and `recommendations` are written as placeholders (`{}` / NULL);
/// nothing derives them yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub candidate_id: String,
    pub match_rate: f64,
    pub gap_report: Value,
    pub recommendations: Option<String>,
}

impl AuditRecord {
    pub fn placeholder(candidate_id: &str, match_rate: f64) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            match_rate,
            gap_report: Value::Object(Default::default()),
            recommendations: None,
        }
    }
}
