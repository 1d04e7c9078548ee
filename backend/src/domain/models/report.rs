//! Domain models and arithmetic for attendance reports.
use chrono::NaiveDate;
use shared::Gender;

/// Qualitative banding of a termly attendance percentage.
/// Thresholds are inclusive lower bounds, checked highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl AttendanceBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            AttendanceBand::Excellent
        } else if percentage >= 75.0 {
            AttendanceBand::Good
        } else {
            AttendanceBand::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceBand::Excellent => "Excellent",
            AttendanceBand::Good => "Good",
            AttendanceBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// presents / school_days × 100, or 0 when there were no school days
pub fn attendance_percentage(presents: u32, school_days: u32) -> f64 {
    if school_days == 0 {
        return 0.0;
    }
    f64::from(presents) / f64::from(school_days) * 100.0
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyRow {
    pub student_id: i64,
    pub student_name: String,
    pub presents: u32,
    pub school_days: u32,
    /// Rounded to two decimals
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    pub year: i32,
    pub week: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_school_days: u32,
    pub rows: Vec<WeeklyRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermlyRow {
    pub student_id: i64,
    pub student_name: String,
    pub gender: Gender,
    pub presents: u32,
    /// Can go negative when presents were recorded on days later marked non-school
    pub absences: i64,
    /// Unrounded; formatting happens at the edge
    pub percentage: f64,
    pub band: AttendanceBand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermlyReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub class_name: String,
    pub total_school_days: u32,
    pub total_non_school_days: u32,
    pub total_days_in_period: u32,
    pub rows: Vec<TermlyRow>,
    pub total_students: u32,
    pub total_possible_attendance: u32,
    pub total_actual_attendance: u32,
    /// Only present when there are students and school days
    pub class_average: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(AttendanceBand::from_percentage(100.0), AttendanceBand::Excellent);
        assert_eq!(AttendanceBand::from_percentage(90.0), AttendanceBand::Excellent);
        assert_eq!(AttendanceBand::from_percentage(89.9), AttendanceBand::Good);
        assert_eq!(AttendanceBand::from_percentage(75.0), AttendanceBand::Good);
        assert_eq!(AttendanceBand::from_percentage(74.9), AttendanceBand::NeedsImprovement);
        assert_eq!(AttendanceBand::from_percentage(0.0), AttendanceBand::NeedsImprovement);
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(AttendanceBand::Excellent.label(), "Excellent");
        assert_eq!(AttendanceBand::Good.label(), "Good");
        assert_eq!(AttendanceBand::NeedsImprovement.label(), "Needs Improvement");
    }

    #[test]
    fn test_percentage_with_no_school_days_is_zero() {
        assert_eq!(attendance_percentage(0, 0), 0.0);
        assert_eq!(attendance_percentage(3, 0), 0.0);
    }

    #[test]
    fn test_percentage_and_rounding() {
        assert_eq!(attendance_percentage(5, 5), 100.0);
        assert_eq!(attendance_percentage(3, 5), 60.0);
        assert_eq!(round_to(attendance_percentage(2, 3), 2), 66.67);
        assert_eq!(round_to(attendance_percentage(1, 3), 1), 33.3);
    }
}
