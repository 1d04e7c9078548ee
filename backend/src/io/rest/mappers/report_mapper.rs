use shared::{
    AttendanceSummary, ClassTotals, TermlyReport as SharedTermlyReport, TermlyStudentRow,
    WeeklyReport as SharedWeeklyReport, WeeklyStudentRow,
};

use crate::domain::models::report::{round_to, TermlyReport, WeeklyReport};

pub struct ReportMapper;

/// One decimal place followed by a percent sign, e.g. "83.3%"
fn percent_label(percentage: f64) -> String {
    format!("{:.1}%", round_to(percentage, 1))
}

impl ReportMapper {
    pub fn to_weekly_dto(domain: WeeklyReport) -> SharedWeeklyReport {
        SharedWeeklyReport {
            week: domain.week,
            year: domain.year,
            start_date: domain.start_date.format("%Y-%m-%d").to_string(),
            end_date: domain.end_date.format("%Y-%m-%d").to_string(),
            total_school_days: domain.total_school_days,
            report: domain
                .rows
                .into_iter()
                .map(|row| WeeklyStudentRow {
                    student_id: row.student_id,
                    student_name: row.student_name,
                    presents: row.presents,
                    school_days: row.school_days,
                    percentage: row.percentage,
                })
                .collect(),
        }
    }

    pub fn to_termly_dto(domain: TermlyReport) -> SharedTermlyReport {
        SharedTermlyReport {
            term_period: format!("{} to {}", domain.start_date, domain.end_date),
            class_name: domain.class_name,
            attendance_summary: AttendanceSummary {
                total_school_days: domain.total_school_days,
                total_non_school_days: domain.total_non_school_days,
                total_days_in_period: domain.total_days_in_period,
            },
            students: domain
                .rows
                .into_iter()
                .map(|row| TermlyStudentRow {
                    student_id: row.student_id,
                    student_name: row.student_name,
                    gender: row.gender,
                    presents: row.presents,
                    absences: row.absences,
                    attendance_rate: percent_label(row.percentage),
                    status: row.band.label().to_string(),
                })
                .collect(),
            class_totals: ClassTotals {
                total_students: domain.total_students,
                total_possible_attendance: domain.total_possible_attendance,
                total_actual_attendance: domain.total_actual_attendance,
                class_average: domain.class_average.map(percent_label),
            },
        }
    }
}
