use anyhow::{anyhow, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::student::{gender_code, gender_from_code, NewStudent, Student};
use crate::storage::connection::DbConnection;

const SELECT_STUDENT: &str = r#"
    SELECT s.id, s.klass_id, c.name || ' - ' || c.section AS klass_name,
           s.first_name, s.last_name, s.gender, s.date_of_birth,
           s.parent_name, s.parent_phone
    FROM students s
    JOIN classes c ON c.id = s.klass_id
"#;

/// Repository for students
#[derive(Clone)]
pub struct StudentRepository {
    db: DbConnection,
}

impl StudentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a student and return its generated ID
    pub async fn store_student(&self, student: &NewStudent) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO students
                (klass_id, first_name, last_name, gender, date_of_birth, parent_name, parent_phone)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(student.klass_id)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(gender_code(student.gender))
        .bind(student.date_of_birth)
        .bind(&student.parent_name)
        .bind(&student.parent_phone)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Fetch a student only if its class belongs to `teacher_id`
    pub async fn get_owned(&self, teacher_id: i64, student_id: i64) -> Result<Option<Student>> {
        let sql = format!("{} WHERE s.id = ? AND c.teacher_id = ?", SELECT_STUDENT);
        let row = sqlx::query(&sql)
            .bind(student_id)
            .bind(teacher_id)
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(row_to_student).transpose()
    }

    /// Fetch a student only if it belongs to `klass_id`
    pub async fn find_in_klass(&self, student_id: i64, klass_id: i64) -> Result<Option<Student>> {
        let sql = format!("{} WHERE s.id = ? AND s.klass_id = ?", SELECT_STUDENT);
        let row = sqlx::query(&sql)
            .bind(student_id)
            .bind(klass_id)
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(row_to_student).transpose()
    }

    /// Students in classes owned by `teacher_id`, optionally narrowed to one class
    pub async fn list_owned(&self, teacher_id: i64, klass_id: Option<i64>) -> Result<Vec<Student>> {
        let sql = format!(
            "{} WHERE c.teacher_id = ? AND (? IS NULL OR s.klass_id = ?) ORDER BY s.id ASC",
            SELECT_STUDENT
        );
        let rows = sqlx::query(&sql)
            .bind(teacher_id)
            .bind(klass_id)
            .bind(klass_id)
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(row_to_student).collect()
    }

    /// Students of one class, unscoped. Callers check ownership of the class first.
    pub async fn list_by_klass(&self, klass_id: i64) -> Result<Vec<Student>> {
        let sql = format!("{} WHERE s.klass_id = ? ORDER BY s.id ASC", SELECT_STUDENT);
        let rows = sqlx::query(&sql)
            .bind(klass_id)
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(row_to_student).collect()
    }

    pub async fn update_student(&self, student: &Student) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE students
            SET klass_id = ?, first_name = ?, last_name = ?, gender = ?,
                date_of_birth = ?, parent_name = ?, parent_phone = ?
            WHERE id = ?
            "#,
        )
        .bind(student.klass_id)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(gender_code(student.gender))
        .bind(student.date_of_birth)
        .bind(&student.parent_name)
        .bind(&student.parent_phone)
        .bind(student.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Returns true if an owned student was deleted. Attendance records cascade.
    pub async fn delete_owned(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM students
            WHERE id = ?
              AND klass_id IN (SELECT id FROM classes WHERE teacher_id = ?)
            "#,
        )
        .bind(student_id)
        .bind(teacher_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_student(row: &SqliteRow) -> Result<Student> {
    let code: String = row.get("gender");
    let gender = gender_from_code(&code).ok_or_else(|| anyhow!("Unknown gender code in database: {}", code))?;

    Ok(Student {
        id: row.get("id"),
        klass_id: row.get("klass_id"),
        klass_name: row.get("klass_name"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        gender,
        date_of_birth: row.get("date_of_birth"),
        parent_name: row.get("parent_name"),
        parent_phone: row.get("parent_phone"),
    })
}
