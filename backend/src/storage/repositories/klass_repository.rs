use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::klass::Klass;
use crate::storage::connection::DbConnection;

const SELECT_KLASS: &str = r#"
    SELECT c.id, c.teacher_id, u.username AS teacher_name, c.name, c.section
    FROM classes c
    JOIN users u ON u.id = c.teacher_id
"#;

/// Repository for classes. Every read is scoped to the owning teacher.
#[derive(Clone)]
pub struct KlassRepository {
    db: DbConnection,
}

impl KlassRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a class and return its generated ID
    pub async fn store_klass(&self, teacher_id: i64, name: &str, section: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO classes (teacher_id, name, section) VALUES (?, ?, ?)")
            .bind(teacher_id)
            .bind(name)
            .bind(section)
            .execute(self.db.pool())
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Fetch a class only if `teacher_id` owns it
    pub async fn get_owned(&self, teacher_id: i64, klass_id: i64) -> Result<Option<Klass>> {
        let sql = format!("{} WHERE c.id = ? AND c.teacher_id = ?", SELECT_KLASS);
        let row = sqlx::query(&sql)
            .bind(klass_id)
            .bind(teacher_id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.as_ref().map(row_to_klass))
    }

    pub async fn list_owned(&self, teacher_id: i64) -> Result<Vec<Klass>> {
        let sql = format!("{} WHERE c.teacher_id = ? ORDER BY c.id ASC", SELECT_KLASS);
        let rows = sqlx::query(&sql)
            .bind(teacher_id)
            .fetch_all(self.db.pool())
            .await?;
        Ok(rows.iter().map(row_to_klass).collect())
    }

    pub async fn update_klass(&self, klass: &Klass) -> Result<()> {
        sqlx::query("UPDATE classes SET name = ?, section = ? WHERE id = ? AND teacher_id = ?")
            .bind(&klass.name)
            .bind(&klass.section)
            .bind(klass.id)
            .bind(klass.teacher_id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    /// Returns true if an owned class was deleted. Students and their records cascade.
    pub async fn delete_owned(&self, teacher_id: i64, klass_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM classes WHERE id = ? AND teacher_id = ?")
            .bind(klass_id)
            .bind(teacher_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_klass(row: &SqliteRow) -> Klass {
    Klass {
        id: row.get("id"),
        teacher_id: row.get("teacher_id"),
        teacher_name: row.get("teacher_name"),
        name: row.get("name"),
        section: row.get("section"),
    }
}
