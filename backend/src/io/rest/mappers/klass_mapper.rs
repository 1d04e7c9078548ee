use shared::{CreateKlassRequest, Klass as SharedKlass, UpdateKlassRequest};

use super::student_mapper::StudentMapper;
use crate::domain::commands::klass::{CreateKlassCommand, UpdateKlassCommand};
use crate::domain::models::klass::KlassDetail;

pub struct KlassMapper;

impl KlassMapper {
    pub fn to_dto(domain: KlassDetail) -> SharedKlass {
        SharedKlass {
            id: domain.klass.id,
            name: domain.klass.name,
            section: domain.klass.section,
            teacher: domain.klass.teacher_id,
            teacher_name: domain.klass.teacher_name,
            students: domain.students.into_iter().map(StudentMapper::to_dto).collect(),
        }
    }

    pub fn to_create_command(dto: CreateKlassRequest) -> CreateKlassCommand {
        CreateKlassCommand {
            name: dto.name,
            section: dto.section,
        }
    }

    pub fn to_update_command(dto: UpdateKlassRequest) -> UpdateKlassCommand {
        UpdateKlassCommand {
            name: dto.name,
            section: dto.section,
        }
    }
}
