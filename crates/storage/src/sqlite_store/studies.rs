use rusqlite::{Row, params};
use surveyplus_core::Study;

use super::{Storage, log_row_error, parse_enum, parse_json, parse_time};
use crate::error::StorageError;

const STUDY_COLUMNS: &str = "id, name, status, research_goal, research_questions, question_framework, created_at, updated_at";

impl Storage {
    /// Insert or replace a study.
    ///
    /// # Errors
    /// Returns error if the insert fails.
    pub fn save_study(&self, study: &Study) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO studies
               (id, name, status, research_goal, research_questions, question_framework, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                study.id,
                study.name,
                study.status.as_str(),
                study.research_goal,
                serde_json::to_string(&study.research_questions)?,
                serde_json::to_string(&study.question_framework)?,
                study.created_at.to_rfc3339(),
                study.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// # Errors
    /// Returns error if the query fails or the row is corrupt.
    pub fn get_study(&self, id: &str) -> Result<Option<Study>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {STUDY_COLUMNS} FROM studies WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_study(row)?)),
            None => Ok(None),
        }
    }

    /// All studies, newest first. Unreadable rows are logged and skipped.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn list_studies(&self) -> Result<Vec<Study>, StorageError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {STUDY_COLUMNS} FROM studies ORDER BY created_at DESC"))?;
        let rows = stmt.query_map([], Self::row_to_study)?;
        Ok(rows.filter_map(log_row_error).collect())
    }

    /// Delete a study with its interviews and report in one transaction.
    ///
    /// # Errors
    /// Returns error if any delete fails; nothing is removed in that case.
    pub fn delete_study(&self, id: &str) -> Result<bool, StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let interviews = tx.execute("DELETE FROM interviews WHERE study_id = ?1", params![id])?;
        tx.execute("DELETE FROM reports WHERE study_id = ?1", params![id])?;
        let deleted = tx.execute("DELETE FROM studies WHERE id = ?1", params![id])?;
        tx.commit()?;
        if deleted > 0 {
            tracing::info!(study_id = id, interviews, "deleted study");
        }
        Ok(deleted > 0)
    }

    fn row_to_study(row: &Row<'_>) -> rusqlite::Result<Study> {
        Ok(Study {
            id: row.get(0)?,
            name: row.get(1)?,
            status: parse_enum(&row.get::<_, String>(2)?)?,
            research_goal: row.get(3)?,
            research_questions: parse_json(&row.get::<_, String>(4)?)?,
            question_framework: parse_json(&row.get::<_, String>(5)?)?,
            created_at: parse_time(&row.get::<_, String>(6)?)?,
            updated_at: parse_time(&row.get::<_, String>(7)?)?,
        })
    }
}
