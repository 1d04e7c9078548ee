//! Fixtures shared by the domain service tests.

use chrono::Duration;
use shared::Gender;

use crate::domain::auth_service::AuthService;
use crate::domain::commands::klass::CreateKlassCommand;
use crate::domain::commands::student::CreateStudentCommand;
use crate::domain::klass_service::KlassService;
use crate::domain::models::student::Student;
use crate::domain::models::user::Principal;
use crate::domain::student_service::StudentService;
use crate::storage::DbConnection;

pub struct TestContext {
    pub db: DbConnection,
    pub auth: AuthService,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let auth = AuthService::new(db.clone(), Duration::hours(1));
        Self { db, auth }
    }
}

/// Register a teacher and return it as the acting principal
pub async fn register(ctx: &TestContext, username: &str) -> Principal {
    let user = ctx
        .auth
        .register_teacher(username, "password")
        .await
        .expect("Failed to register teacher");
    Principal::from(&user)
}

pub async fn seed_klass(ctx: &TestContext, principal: &Principal, name: &str) -> i64 {
    KlassService::new(ctx.db.clone())
        .create_klass(
            principal,
            CreateKlassCommand {
                name: name.to_string(),
                section: "A".to_string(),
            },
        )
        .await
        .expect("Failed to create class")
        .klass
        .id
}

pub fn student_command(klass_id: i64, first_name: &str, last_name: &str) -> CreateStudentCommand {
    CreateStudentCommand {
        klass_id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender: Gender::Female,
        date_of_birth: "2016-05-20".to_string(),
        parent_name: "Parent".to_string(),
        parent_phone: "0555123456".to_string(),
    }
}

pub async fn seed_student(ctx: &TestContext, principal: &Principal, klass_id: i64, first_name: &str) -> Student {
    StudentService::new(ctx.db.clone())
        .create_student(principal, student_command(klass_id, first_name, "Owusu"))
        .await
        .expect("Failed to create student")
}
