use rusqlite::{Row, params};
use surveyplus_core::Interview;

use super::{Storage, log_row_error, parse_enum, parse_json, parse_time};
use crate::error::StorageError;

const INTERVIEW_COLUMNS: &str = "id, study_id, status, participant_metadata, messages, duration_secs, ai_summary, started_at, completed_at, question_framework, progress";

impl Storage {
    /// Insert or replace an interview. The transcript is written as one
    /// JSON column so a save is all-or-nothing.
    ///
    /// # Errors
    /// Returns error if the insert fails.
    pub fn save_interview(&self, interview: &Interview) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO interviews
               (id, study_id, status, participant_metadata, messages, duration_secs, ai_summary,
                started_at, completed_at, question_framework, progress)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                interview.id,
                interview.study_id,
                interview.status.as_str(),
                serde_json::to_string(&interview.participant_metadata)?,
                serde_json::to_string(&interview.messages)?,
                interview.duration_secs as i64,
                interview.ai_summary,
                interview.started_at.to_rfc3339(),
                interview.completed_at.map(|d| d.to_rfc3339()),
                serde_json::to_string(&interview.question_framework)?,
                interview.progress.as_ref().map(serde_json::to_string).transpose()?,
            ],
        )?;
        Ok(())
    }

    /// # Errors
    /// Returns error if the query fails or the row is corrupt.
    pub fn get_interview(&self, id: &str) -> Result<Option<Interview>, StorageError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {INTERVIEW_COLUMNS} FROM interviews WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_interview(row)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    /// Returns error if the query fails.
    pub fn list_interviews(&self, study_id: &str) -> Result<Vec<Interview>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {INTERVIEW_COLUMNS} FROM interviews WHERE study_id = ?1 ORDER BY started_at ASC"
        ))?;
        let rows = stmt.query_map(params![study_id], Self::row_to_interview)?;
        Ok(rows.filter_map(log_row_error).collect())
    }

    /// # Errors
    /// Returns error if the delete fails.
    pub fn delete_interview(&self, id: &str) -> Result<bool, StorageError> {
        let conn = self.conn()?;
        Ok(conn.execute("DELETE FROM interviews WHERE id = ?1", params![id])? > 0)
    }

    fn row_to_interview(row: &Row<'_>) -> rusqlite::Result<Interview> {
        let completed_at: Option<String> = row.get(8)?;
        let progress: Option<String> = row.get(10)?;
        Ok(Interview {
            id: row.get(0)?,
            study_id: row.get(1)?,
            status: parse_enum(&row.get::<_, String>(2)?)?,
            participant_metadata: parse_json(&row.get::<_, String>(3)?)?,
            messages: parse_json(&row.get::<_, String>(4)?)?,
            duration_secs: row.get::<_, i64>(5)?.max(0) as u64,
            ai_summary: row.get(6)?,
            started_at: parse_time(&row.get::<_, String>(7)?)?,
            completed_at: completed_at.as_deref().map(parse_time).transpose()?,
            question_framework: parse_json(&row.get::<_, String>(9)?)?,
            progress: progress.as_deref().map(parse_json).transpose()?,
        })
    }
}
