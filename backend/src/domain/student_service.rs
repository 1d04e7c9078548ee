use tracing::{info, warn};

use crate::domain::commands::student::{CreateStudentCommand, UpdateStudentCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::calendar::parse_iso_date;
use crate::domain::models::student::{NewStudent, Student};
use crate::domain::models::user::Principal;
use crate::domain::validation::required_text;
use crate::storage::{DbConnection, KlassRepository, StudentRepository};

const NAME_MAX: usize = 100;
const PHONE_MAX: usize = 15;

/// Service for students. Ownership flows through the student's class.
#[derive(Clone)]
pub struct StudentService {
    klass_repository: KlassRepository,
    student_repository: StudentRepository,
}

impl StudentService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            klass_repository: KlassRepository::new(db.clone()),
            student_repository: StudentRepository::new(db),
        }
    }

    async fn ensure_klass_owned(&self, principal: &Principal, klass_id: i64) -> DomainResult<()> {
        if self.klass_repository.get_owned(principal.user_id, klass_id).await?.is_none() {
            warn!("Class {} not found for teacher {}", klass_id, principal.username);
            return Err(DomainError::not_found("Class"));
        }
        Ok(())
    }

    pub async fn create_student(&self, principal: &Principal, command: CreateStudentCommand) -> DomainResult<Student> {
        info!(
            "Creating student {} {} in class {}",
            command.first_name, command.last_name, command.klass_id
        );

        self.ensure_klass_owned(principal, command.klass_id).await?;

        let new_student = NewStudent {
            klass_id: command.klass_id,
            first_name: required_text("First name", &command.first_name, NAME_MAX)?,
            last_name: required_text("Last name", &command.last_name, NAME_MAX)?,
            gender: command.gender,
            date_of_birth: parse_iso_date(&command.date_of_birth)?,
            parent_name: required_text("Parent name", &command.parent_name, NAME_MAX)?,
            parent_phone: required_text("Parent phone", &command.parent_phone, PHONE_MAX)?,
        };

        let id = self.student_repository.store_student(&new_student).await?;
        let student = self.get_student(principal, id).await?;

        info!("Created student {} with ID: {}", student.display_name(), student.id);
        Ok(student)
    }

    pub async fn get_student(&self, principal: &Principal, student_id: i64) -> DomainResult<Student> {
        match self.student_repository.get_owned(principal.user_id, student_id).await? {
            Some(student) => Ok(student),
            None => {
                warn!("Student {} not found for teacher {}", student_id, principal.username);
                Err(DomainError::not_found("Student"))
            }
        }
    }

    /// Students of the principal's classes, optionally only those of `klass_id`.
    /// A foreign class filter yields an empty list.
    pub async fn list_students(&self, principal: &Principal, klass_id: Option<i64>) -> DomainResult<Vec<Student>> {
        info!("Listing students for {} (class filter: {:?})", principal.username, klass_id);
        Ok(self.student_repository.list_owned(principal.user_id, klass_id).await?)
    }

    pub async fn update_student(
        &self,
        principal: &Principal,
        student_id: i64,
        command: UpdateStudentCommand,
    ) -> DomainResult<Student> {
        info!("Updating student {}", student_id);

        let mut student = self.get_student(principal, student_id).await?;

        if let Some(klass_id) = command.klass_id {
            self.ensure_klass_owned(principal, klass_id).await?;
            student.klass_id = klass_id;
        }
        if let Some(first_name) = command.first_name {
            student.first_name = required_text("First name", &first_name, NAME_MAX)?;
        }
        if let Some(last_name) = command.last_name {
            student.last_name = required_text("Last name", &last_name, NAME_MAX)?;
        }
        if let Some(gender) = command.gender {
            student.gender = gender;
        }
        if let Some(date_of_birth) = command.date_of_birth {
            student.date_of_birth = parse_iso_date(&date_of_birth)?;
        }
        if let Some(parent_name) = command.parent_name {
            student.parent_name = required_text("Parent name", &parent_name, NAME_MAX)?;
        }
        if let Some(parent_phone) = command.parent_phone {
            student.parent_phone = required_text("Parent phone", &parent_phone, PHONE_MAX)?;
        }

        self.student_repository.update_student(&student).await?;
        // Re-read so klass_name reflects a class move
        self.get_student(principal, student_id).await
    }

    pub async fn delete_student(&self, principal: &Principal, student_id: i64) -> DomainResult<()> {
        info!("Deleting student {}", student_id);

        if !self.student_repository.delete_owned(principal.user_id, student_id).await? {
            warn!("Student {} not found for teacher {}", student_id, principal.username);
            return Err(DomainError::not_found("Student"));
        }
        Ok(())
    }
}
