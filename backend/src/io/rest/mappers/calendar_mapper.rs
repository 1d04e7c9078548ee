use shared::CalendarDay as SharedCalendarDay;

use crate::domain::models::calendar::CalendarDay as DomainCalendarDay;

pub struct CalendarMapper;

impl CalendarMapper {
    pub fn to_dto(domain: DomainCalendarDay) -> SharedCalendarDay {
        SharedCalendarDay {
            id: domain.id,
            date: domain.date.format("%Y-%m-%d").to_string(),
            is_school_day: domain.is_school_day,
            notes: domain.notes,
        }
    }
}
