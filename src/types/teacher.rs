use super::{SubjectCode, TeacherId, Weekday};
use serde::{Deserialize, Serialize};

/// A faculty member with their teach-set and day availability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    /// Subject codes this teacher can deliver (normalized, no whitespace)
    pub can_teach: Vec<SubjectCode>,
    /// Days the teacher accepts assignments on; defaults to the full week
    #[serde(default = "full_week")]
    pub availability_days: Vec<Weekday>,
}

fn full_week() -> Vec<Weekday> {
    Weekday::ALL.to_vec()
}

impl Teacher {
    /// Check if teacher can deliver a given subject
    pub fn teaches(&self, code: &SubjectCode) -> bool {
        self.can_teach.iter().any(|c| c.matches(&code.0))
    }

    /// Check if teacher is available on a day
    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.availability_days.contains(&day)
    }

    /// True when no day of the week is blocked off
    pub fn has_full_week(&self) -> bool {
        Weekday::ALL.iter().all(|d| self.availability_days.contains(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teaches_is_case_insensitive() {
        let teacher = Teacher {
            id: TeacherId("t1".to_string()),
            name: "Ms. Reyes".to_string(),
            can_teach: vec![SubjectCode("CS1".to_string()), SubjectCode("cs14".to_string())],
            availability_days: full_week(),
        };

        assert!(teacher.teaches(&SubjectCode("cs1".to_string())));
        assert!(teacher.teaches(&SubjectCode("CS14".to_string())));
        assert!(!teacher.teaches(&SubjectCode("IT6".to_string())));
    }

    #[test]
    fn test_restricted_week_detected() {
        let mut teacher = Teacher {
            id: TeacherId("t2".to_string()),
            name: "Mr. Cruz".to_string(),
            can_teach: vec![],
            availability_days: full_week(),
        };
        assert!(teacher.has_full_week());

        teacher.availability_days = vec![Weekday::Tue, Weekday::Thu];
        assert!(!teacher.has_full_week());
        assert!(teacher.is_available_on(Weekday::Tue));
        assert!(!teacher.is_available_on(Weekday::Mon));
    }
}
