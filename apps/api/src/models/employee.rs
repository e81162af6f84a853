use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmployeeDirectoryEntry {
    pub employee_id: String,
    pub fullname: String,
}

impl EmployeeDirectoryEntry {
    /// Picker label, e.g. `"Dewi Lestari (EMP100012)"`.
    pub fn display(&self) -> String {
        format!("{} ({})", self.fullname, self.employee_id)
    }
}

/// Directory entry as served to the benchmark picker.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeOption {
    pub employee_id: String,
    pub fullname: String,
    pub display: String,
}

impl From<&EmployeeDirectoryEntry> for EmployeeOption {
    fn from(entry: &EmployeeDirectoryEntry) -> Self {
        Self {
            employee_id: entry.employee_id.clone(),
            fullname: entry.fullname.clone(),
            display: entry.display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label_is_name_then_id() {
        let entry = EmployeeDirectoryEntry {
            employee_id: "EMP100012".to_string(),
            fullname: "Dewi Lestari".to_string(),
        };
        assert_eq!(entry.display(), "Dewi Lestari (EMP100012)");
        assert_eq!(EmployeeOption::from(&entry).display, entry.display());
    }
}
