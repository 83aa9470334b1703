use rusqlite::{Row, params};
use surveyplus_core::Report;

use super::{Storage, parse_json, parse_time};
use crate::error::StorageError;

impl Storage {
    /// Save a report; a study keeps only its latest one.
    ///
    /// # Errors
    /// Returns error if the insert fails.
    pub fn save_report(&self, report: &Report) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO reports
               (study_id, id, participant_count, avg_duration, body, generated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                report.study_id,
                report.id,
                report.participant_count as i64,
                report.avg_duration,
                serde_json::to_string(&report.body)?,
                report.generated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// # Errors
    /// Returns error if the query fails or the row is corrupt.
    pub fn get_report(&self, study_id: &str) -> Result<Option<Report>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, study_id, participant_count, avg_duration, body, generated_at
               FROM reports WHERE study_id = ?1",
        )?;
        let mut rows = stmt.query(params![study_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_report(row)?)),
            None => Ok(None),
        }
    }

    fn row_to_report(row: &Row<'_>) -> rusqlite::Result<Report> {
        Ok(Report {
            id: row.get(0)?,
            study_id: row.get(1)?,
            participant_count: row.get::<_, i64>(2)?.max(0) as usize,
            avg_duration: row.get(3)?,
            body: parse_json(&row.get::<_, String>(4)?)?,
            generated_at: parse_time(&row.get::<_, String>(5)?)?,
        })
    }
}
