//! # Reporting Engine
//!
//! Weekly and termly attendance summaries for one class.
//!
//! School days are counted from the calendar only: a date nobody has
//! referenced yet has no entry and does not count. Presence counts take
//! every `present` record dated within the range.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use tracing::{info, warn};

use crate::domain::calendar_service::CalendarService;
use crate::domain::commands::reports::{TermlyReportQuery, WeeklyReportQuery};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::calendar::parse_iso_date;
use crate::domain::models::klass::Klass;
use crate::domain::models::report::{
    attendance_percentage, round_to, AttendanceBand, TermlyReport, TermlyRow, WeeklyReport, WeeklyRow,
};
use crate::domain::models::user::Principal;
use crate::storage::{AttendanceRepository, DbConnection, KlassRepository, StudentRepository};

/// Inclusive date window used when a termly query leaves dates out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Clone)]
pub struct ReportService {
    klass_repository: KlassRepository,
    student_repository: StudentRepository,
    attendance_repository: AttendanceRepository,
    calendar_service: CalendarService,
    default_term: TermWindow,
}

impl ReportService {
    pub fn new(db: DbConnection, calendar_service: CalendarService, default_term: TermWindow) -> Self {
        Self {
            klass_repository: KlassRepository::new(db.clone()),
            student_repository: StudentRepository::new(db.clone()),
            attendance_repository: AttendanceRepository::new(db),
            calendar_service,
            default_term,
        }
    }

    async fn owned_klass(&self, principal: &Principal, klass_id: i64) -> DomainResult<Klass> {
        self.klass_repository
            .get_owned(principal.user_id, klass_id)
            .await?
            .ok_or_else(|| {
                warn!("Class {} not found for teacher {}", klass_id, principal.username);
                DomainError::not_found("Class")
            })
    }

    pub async fn weekly_report(&self, principal: &Principal, query: WeeklyReportQuery) -> DomainResult<WeeklyReport> {
        let current = Utc::now().date_naive().iso_week();
        let year = query.year.unwrap_or_else(|| current.year());
        let week = query.week.unwrap_or_else(|| current.week());
        info!("Weekly report for class {} (week {}, {})", query.class_id, week, year);

        let start_date = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .ok_or_else(|| DomainError::validation(format!("Invalid ISO week {} of {}", week, year)))?;
        let end_date = start_date + Duration::days(6);

        let klass = self.owned_klass(principal, query.class_id).await?;
        let school_days = self.calendar_service.count_school_days(start_date, end_date).await?;
        let presents = self
            .attendance_repository
            .count_presents_by_student(klass.id, start_date, end_date)
            .await?;

        let rows = self
            .student_repository
            .list_by_klass(klass.id)
            .await?
            .into_iter()
            .map(|student| {
                let count = presents.get(&student.id).copied().unwrap_or(0);
                WeeklyRow {
                    student_id: student.id,
                    student_name: student.display_name(),
                    presents: count,
                    school_days,
                    percentage: round_to(attendance_percentage(count, school_days), 2),
                }
            })
            .collect::<Vec<_>>();

        info!("Weekly report: {} school days, {} students", school_days, rows.len());
        Ok(WeeklyReport {
            year,
            week,
            start_date,
            end_date,
            total_school_days: school_days,
            rows,
        })
    }

    pub async fn termly_report(&self, principal: &Principal, query: TermlyReportQuery) -> DomainResult<TermlyReport> {
        let start_date = match query.start_date.as_deref() {
            Some(raw) => parse_iso_date(raw)?,
            None => self.default_term.start,
        };
        let end_date = match query.end_date.as_deref() {
            Some(raw) => parse_iso_date(raw)?,
            None => self.default_term.end,
        };
        info!(
            "Termly report for class {} ({} to {})",
            query.class_id, start_date, end_date
        );
        if start_date > end_date {
            return Err(DomainError::validation("start_date must not be after end_date"));
        }

        let klass = self.owned_klass(principal, query.class_id).await?;
        let school_days = self.calendar_service.count_school_days(start_date, end_date).await?;
        let non_school_days = self.calendar_service.count_non_school_days(start_date, end_date).await?;
        let presents = self
            .attendance_repository
            .count_presents_by_student(klass.id, start_date, end_date)
            .await?;
        let students = self.student_repository.list_by_klass(klass.id).await?;

        let rows: Vec<TermlyRow> = students
            .into_iter()
            .map(|student| {
                let count = presents.get(&student.id).copied().unwrap_or(0);
                let percentage = attendance_percentage(count, school_days);
                TermlyRow {
                    student_id: student.id,
                    student_name: student.full_name(),
                    gender: student.gender,
                    presents: count,
                    absences: i64::from(school_days) - i64::from(count),
                    percentage,
                    band: AttendanceBand::from_percentage(percentage),
                }
            })
            .collect();

        let total_students = rows.len() as u32;
        let total_possible_attendance = total_students * school_days;
        let total_actual_attendance: u32 = rows.iter().map(|row| row.presents).sum();
        let class_average = (total_students > 0 && school_days > 0)
            .then(|| attendance_percentage(total_actual_attendance, total_possible_attendance));

        Ok(TermlyReport {
            start_date,
            end_date,
            class_name: klass.display_name(),
            total_school_days: school_days,
            total_non_school_days: non_school_days,
            total_days_in_period: ((end_date - start_date).num_days() + 1) as u32,
            rows,
            total_students,
            total_possible_attendance,
            total_actual_attendance,
            class_average,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attendance_service::AttendanceService;
    use crate::domain::commands::attendance::{AttendanceLine, BulkAttendanceCommand};
    use crate::domain::commands::calendar::SetDayCommand;
    use crate::domain::test_support::{register, seed_klass, seed_student, TestContext};

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn services(ctx: &TestContext) -> (ReportService, AttendanceService) {
        let calendar = CalendarService::new(ctx.db.clone());
        let term = TermWindow {
            start: date("2025-09-01"),
            end: date("2025-12-15"),
        };
        (
            ReportService::new(ctx.db.clone(), calendar.clone(), term),
            AttendanceService::new(ctx.db.clone(), calendar),
        )
    }

    async fn mark(service: &AttendanceService, principal: &Principal, klass: i64, day: &str, lines: &[(i64, &str)]) {
        service
            .bulk_write(
                principal,
                BulkAttendanceCommand {
                    class_id: klass,
                    date: day.to_string(),
                    lines: lines
                        .iter()
                        .map(|(id, status)| AttendanceLine {
                            student_id: Some(*id),
                            status: Some(status.to_string()),
                        })
                        .collect(),
                },
            )
            .await
            .unwrap();
    }

    // Week 36 of 2025 runs Monday 2025-09-01 to Sunday 2025-09-07
    const WEEK: [&str; 5] = ["2025-09-01", "2025-09-02", "2025-09-03", "2025-09-04", "2025-09-05"];

    #[tokio::test]
    async fn test_five_of_five_and_three_of_five() {
        let ctx = TestContext::new().await;
        let (reports, attendance) = services(&ctx);
        let teacher = register(&ctx, "alice").await;
        let klass = seed_klass(&ctx, &teacher, "Grade 5").await;
        let a = seed_student(&ctx, &teacher, klass, "Ama").await;
        let b = seed_student(&ctx, &teacher, klass, "Efua").await;

        for (i, day) in WEEK.iter().enumerate() {
            let b_status = if i < 3 { "present" } else { "absent" };
            mark(&attendance, &teacher, klass, day, &[(a.id, "present"), (b.id, b_status)]).await;
        }

        let termly = reports
            .termly_report(
                &teacher,
                TermlyReportQuery {
                    class_id: klass,
                    start_date: Some("2025-09-01".to_string()),
                    end_date: Some("2025-09-07".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(termly.total_school_days, 5);
        assert_eq!(termly.total_days_in_period, 7);
        assert_eq!(termly.total_possible_attendance, 10);
        assert_eq!(termly.total_actual_attendance, 8);
        assert_eq!(termly.class_average, Some(80.0));
        assert_eq!(termly.class_name, "Grade 5 - A");

        let row_a = termly.rows.iter().find(|r| r.student_id == a.id).unwrap();
        let row_b = termly.rows.iter().find(|r| r.student_id == b.id).unwrap();
        assert_eq!(row_a.band, AttendanceBand::Excellent);
        assert_eq!(row_a.absences, 0);
        assert_eq!(row_a.student_name, "Ama Owusu");
        assert_eq!(row_b.presents, 3);
        assert_eq!(row_b.absences, 2);
        assert_eq!(row_b.percentage, 60.0);
        assert_eq!(row_b.band, AttendanceBand::NeedsImprovement);

        let weekly = reports
            .weekly_report(
                &teacher,
                WeeklyReportQuery {
                    class_id: klass,
                    year: Some(2025),
                    week: Some(36),
                },
            )
            .await
            .unwrap();
        assert_eq!(weekly.start_date, date("2025-09-01"));
        assert_eq!(weekly.end_date, date("2025-09-07"));
        assert_eq!(weekly.total_school_days, 5);
        let weekly_b = weekly.rows.iter().find(|r| r.student_id == b.id).unwrap();
        assert_eq!(weekly_b.percentage, 60.0);
        assert_eq!(weekly_b.student_name, "Owusu, Efua");
    }

    #[tokio::test]
    async fn test_no_school_days_yields_zero_and_no_average() {
        let ctx = TestContext::new().await;
        let (reports, _) = services(&ctx);
        let teacher = register(&ctx, "alice").await;
        let klass = seed_klass(&ctx, &teacher, "Grade 5").await;
        seed_student(&ctx, &teacher, klass, "Ama").await;

        let weekly = reports
            .weekly_report(
                &teacher,
                WeeklyReportQuery {
                    class_id: klass,
                    year: Some(2025),
                    week: Some(36),
                },
            )
            .await
            .unwrap();
        assert_eq!(weekly.total_school_days, 0);
        assert_eq!(weekly.rows[0].percentage, 0.0);

        let termly = reports
            .termly_report(
                &teacher,
                TermlyReportQuery {
                    class_id: klass,
                    start_date: None,
                    end_date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(termly.start_date, date("2025-09-01"));
        assert_eq!(termly.end_date, date("2025-12-15"));
        assert_eq!(termly.class_average, None);
        assert_eq!(termly.rows[0].band, AttendanceBand::NeedsImprovement);
    }

    #[tokio::test]
    async fn test_empty_class_has_no_average() {
        let ctx = TestContext::new().await;
        let (reports, _) = services(&ctx);
        let teacher = register(&ctx, "alice").await;
        let klass = seed_klass(&ctx, &teacher, "Grade 5").await;
        CalendarService::new(ctx.db.clone())
            .set_day(SetDayCommand {
                date: "2025-09-01".to_string(),
                is_school_day: true,
                notes: String::new(),
            })
            .await
            .unwrap();

        let termly = reports
            .termly_report(
                &teacher,
                TermlyReportQuery {
                    class_id: klass,
                    start_date: None,
                    end_date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(termly.total_school_days, 1);
        assert_eq!(termly.total_students, 0);
        assert_eq!(termly.class_average, None);
    }

    #[tokio::test]
    async fn test_non_school_days_are_counted() {
        let ctx = TestContext::new().await;
        let (reports, _) = services(&ctx);
        let teacher = register(&ctx, "alice").await;
        let klass = seed_klass(&ctx, &teacher, "Grade 5").await;
        let calendar = CalendarService::new(ctx.db.clone());
        calendar
            .set_day(SetDayCommand {
                date: "2025-10-06".to_string(),
                is_school_day: false,
                notes: "Mid-term break".to_string(),
            })
            .await
            .unwrap();
        calendar.resolve_day(date("2025-10-11")).await.unwrap();

        let termly = reports
            .termly_report(
                &teacher,
                TermlyReportQuery {
                    class_id: klass,
                    start_date: Some("2025-10-01".to_string()),
                    end_date: Some("2025-10-31".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(termly.total_non_school_days, 2);
        assert_eq!(termly.total_days_in_period, 31);
    }

    #[tokio::test]
    async fn test_weekly_defaults_to_current_utc_week() {
        let ctx = TestContext::new().await;
        let (reports, _) = services(&ctx);
        let alice = register(&ctx, "alice").await;
        let klass = seed_klass(&ctx, &alice, "Grade 5").await;

        let current = Utc::now().date_naive().iso_week();
        let report = reports
            .weekly_report(
                &alice,
                WeeklyReportQuery {
                    class_id: klass,
                    year: None,
                    week: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(report.start_date.iso_week(), current);
        assert_eq!(report.start_date.weekday(), Weekday::Mon);
    }

    #[tokio::test]
    async fn test_rejections() {
        let ctx = TestContext::new().await;
        let (reports, _) = services(&ctx);
        let alice = register(&ctx, "alice").await;
        let bob = register(&ctx, "bob").await;
        let klass = seed_klass(&ctx, &alice, "Grade 5").await;

        assert!(matches!(
            reports
                .weekly_report(
                    &bob,
                    WeeklyReportQuery {
                        class_id: klass,
                        year: Some(2025),
                        week: Some(36),
                    },
                )
                .await,
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            reports
                .termly_report(
                    &bob,
                    TermlyReportQuery {
                        class_id: klass,
                        start_date: None,
                        end_date: None,
                    },
                )
                .await,
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            reports
                .weekly_report(
                    &alice,
                    WeeklyReportQuery {
                        class_id: klass,
                        year: Some(2025),
                        week: Some(60),
                    },
                )
                .await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            reports
                .termly_report(
                    &alice,
                    TermlyReportQuery {
                        class_id: klass,
                        start_date: Some("2025-12-15".to_string()),
                        end_date: Some("2025-09-01".to_string()),
                    },
                )
                .await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            reports
                .termly_report(
                    &alice,
                    TermlyReportQuery {
                        class_id: klass,
                        start_date: Some("Sept 1".to_string()),
                        end_date: None,
                    },
                )
                .await,
            Err(DomainError::Validation(_))
        ));
    }
}
