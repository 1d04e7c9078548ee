use shared::{CreateStudentRequest, Student as SharedStudent, UpdateStudentRequest};

use crate::domain::commands::student::{CreateStudentCommand, UpdateStudentCommand};
use crate::domain::models::student::Student as DomainStudent;

pub struct StudentMapper;

impl StudentMapper {
    pub fn to_dto(domain: DomainStudent) -> SharedStudent {
        SharedStudent {
            id: domain.id,
            first_name: domain.first_name,
            last_name: domain.last_name,
            gender: domain.gender,
            date_of_birth: domain.date_of_birth.format("%Y-%m-%d").to_string(),
            parent_name: domain.parent_name,
            parent_phone: domain.parent_phone,
            klass: domain.klass_id,
            klass_name: domain.klass_name,
        }
    }

    pub fn to_create_command(dto: CreateStudentRequest) -> CreateStudentCommand {
        CreateStudentCommand {
            klass_id: dto.klass,
            first_name: dto.first_name,
            last_name: dto.last_name,
            gender: dto.gender,
            date_of_birth: dto.date_of_birth,
            parent_name: dto.parent_name,
            parent_phone: dto.parent_phone,
        }
    }

    pub fn to_update_command(dto: UpdateStudentRequest) -> UpdateStudentCommand {
        UpdateStudentCommand {
            klass_id: dto.klass,
            first_name: dto.first_name,
            last_name: dto.last_name,
            gender: dto.gender,
            date_of_birth: dto.date_of_birth,
            parent_name: dto.parent_name,
            parent_phone: dto.parent_phone,
        }
    }
}
