use tracing::{info, warn};

use crate::domain::commands::klass::{CreateKlassCommand, UpdateKlassCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::klass::{Klass, KlassDetail};
use crate::domain::models::user::Principal;
use crate::domain::validation::required_text;
use crate::storage::{DbConnection, KlassRepository, StudentRepository};

const NAME_MAX: usize = 100;
const SECTION_MAX: usize = 10;

/// Service for classes. A teacher only ever sees the classes they own.
#[derive(Clone)]
pub struct KlassService {
    klass_repository: KlassRepository,
    student_repository: StudentRepository,
}

impl KlassService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            klass_repository: KlassRepository::new(db.clone()),
            student_repository: StudentRepository::new(db),
        }
    }

    /// Resolve a class owned by `principal`, or NotFound
    pub async fn owned_klass(&self, principal: &Principal, klass_id: i64) -> DomainResult<Klass> {
        match self.klass_repository.get_owned(principal.user_id, klass_id).await? {
            Some(klass) => Ok(klass),
            None => {
                warn!("Class {} not found for teacher {}", klass_id, principal.username);
                Err(DomainError::not_found("Class"))
            }
        }
    }

    pub async fn create_klass(&self, principal: &Principal, command: CreateKlassCommand) -> DomainResult<KlassDetail> {
        info!("Creating class {} - {} for {}", command.name, command.section, principal.username);

        let name = required_text("Class name", &command.name, NAME_MAX)?;
        let section = required_text("Section", &command.section, SECTION_MAX)?;

        let id = self
            .klass_repository
            .store_klass(principal.user_id, &name, &section)
            .await?;
        let klass = self.owned_klass(principal, id).await?;

        info!("Created class {} with ID: {}", klass.display_name(), klass.id);
        Ok(KlassDetail {
            klass,
            students: Vec::new(),
        })
    }

    pub async fn get_klass(&self, principal: &Principal, klass_id: i64) -> DomainResult<KlassDetail> {
        let klass = self.owned_klass(principal, klass_id).await?;
        let students = self.student_repository.list_by_klass(klass.id).await?;
        Ok(KlassDetail { klass, students })
    }

    pub async fn list_klasses(&self, principal: &Principal) -> DomainResult<Vec<KlassDetail>> {
        info!("Listing classes for {}", principal.username);

        let klasses = self.klass_repository.list_owned(principal.user_id).await?;
        let mut details = Vec::with_capacity(klasses.len());
        for klass in klasses {
            let students = self.student_repository.list_by_klass(klass.id).await?;
            details.push(KlassDetail { klass, students });
        }

        info!("Found {} classes", details.len());
        Ok(details)
    }

    pub async fn update_klass(
        &self,
        principal: &Principal,
        klass_id: i64,
        command: UpdateKlassCommand,
    ) -> DomainResult<KlassDetail> {
        info!("Updating class {}", klass_id);

        let mut klass = self.owned_klass(principal, klass_id).await?;
        if let Some(name) = command.name {
            klass.name = required_text("Class name", &name, NAME_MAX)?;
        }
        if let Some(section) = command.section {
            klass.section = required_text("Section", &section, SECTION_MAX)?;
        }

        self.klass_repository.update_klass(&klass).await?;
        self.get_klass(principal, klass_id).await
    }

    /// Delete a class together with its students and their attendance
    pub async fn delete_klass(&self, principal: &Principal, klass_id: i64) -> DomainResult<()> {
        info!("Deleting class {}", klass_id);

        if !self.klass_repository.delete_owned(principal.user_id, klass_id).await? {
            warn!("Class {} not found for teacher {}", klass_id, principal.username);
            return Err(DomainError::not_found("Class"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{register, TestContext};

    fn create(name: &str, section: &str) -> CreateKlassCommand {
        CreateKlassCommand {
            name: name.to_string(),
            section: section.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let ctx = TestContext::new().await;
        let service = KlassService::new(ctx.db.clone());
        let teacher = register(&ctx, "alice").await;

        let created = service.create_klass(&teacher, create(" Grade 4 ", "B")).await.unwrap();
        assert_eq!(created.klass.name, "Grade 4");
        assert_eq!(created.klass.teacher_name, "alice");
        assert!(created.students.is_empty());

        let listed = service.list_klasses(&teacher).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].klass.id, created.klass.id);
    }

    #[tokio::test]
    async fn test_cross_teacher_access_is_not_found() {
        let ctx = TestContext::new().await;
        let service = KlassService::new(ctx.db.clone());
        let alice = register(&ctx, "alice").await;
        let bob = register(&ctx, "bob").await;

        let klass = service.create_klass(&alice, create("Grade 4", "B")).await.unwrap().klass;

        assert!(service.list_klasses(&bob).await.unwrap().is_empty());
        assert!(matches!(service.get_klass(&bob, klass.id).await, Err(DomainError::NotFound(_))));
        assert!(matches!(
            service.update_klass(&bob, klass.id, UpdateKlassCommand::default()).await,
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(service.delete_klass(&bob, klass.id).await, Err(DomainError::NotFound(_))));

        // Still intact for the owner
        assert!(service.get_klass(&alice, klass.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let ctx = TestContext::new().await;
        let service = KlassService::new(ctx.db.clone());
        let teacher = register(&ctx, "alice").await;
        let klass = service.create_klass(&teacher, create("Grade 4", "B")).await.unwrap().klass;

        let updated = service
            .update_klass(
                &teacher,
                klass.id,
                UpdateKlassCommand {
                    name: None,
                    section: Some("C".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.klass.display_name(), "Grade 4 - C");

        service.delete_klass(&teacher, klass.id).await.unwrap();
        assert!(matches!(service.get_klass(&teacher, klass.id).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_validation() {
        let ctx = TestContext::new().await;
        let service = KlassService::new(ctx.db.clone());
        let teacher = register(&ctx, "alice").await;

        assert!(matches!(
            service.create_klass(&teacher, create("", "A")).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.create_klass(&teacher, create("Grade 1", "Section-Eleven")).await,
            Err(DomainError::Validation(_))
        ));
    }
}
