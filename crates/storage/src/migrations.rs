//! Database migrations

use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 3;

pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!(current_version, target = SCHEMA_VERSION, "database schema version");

    if current_version < 1 {
        tracing::info!("running migration v1: initial schema");
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS studies (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'draft',
                research_goal TEXT NOT NULL,
                research_questions TEXT NOT NULL DEFAULT '[]',
                question_framework TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS interviews (
                id TEXT PRIMARY KEY,
                study_id TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'in_progress',
                participant_metadata TEXT NOT NULL DEFAULT '{}',
                messages TEXT NOT NULL DEFAULT '[]',
                duration_secs INTEGER NOT NULL DEFAULT 0,
                ai_summary TEXT,
                started_at TEXT NOT NULL,
                completed_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_interviews_study ON interviews(study_id);
            ",
        )?;
        conn.pragma_update(None, "user_version", 1)?;
    }

    if current_version < 2 {
        tracing::info!("running migration v2: reports");
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS reports (
                study_id TEXT PRIMARY KEY,
                id TEXT NOT NULL,
                participant_count INTEGER NOT NULL,
                avg_duration TEXT NOT NULL,
                body TEXT NOT NULL,
                generated_at TEXT NOT NULL
            );
            ",
        )?;
        conn.pragma_update(None, "user_version", 2)?;
    }

    if current_version < 3 {
        tracing::info!("running migration v3: pinned interview framework and progress");
        conn.execute_batch(
            r"
            ALTER TABLE interviews ADD COLUMN question_framework TEXT NOT NULL DEFAULT '[]';
            ALTER TABLE interviews ADD COLUMN progress TEXT;

            UPDATE interviews SET question_framework = COALESCE(
                (SELECT s.question_framework FROM studies s WHERE s.id = interviews.study_id),
                '[]'
            );
            ",
        )?;
        conn.pragma_update(None, "user_version", 3)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::unwrap_used, reason = "test code")]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0)).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "test code")]
    fn test_v3_backfills_interview_framework_from_study() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE studies (
                id TEXT PRIMARY KEY, name TEXT NOT NULL, status TEXT NOT NULL DEFAULT 'draft',
                research_goal TEXT NOT NULL, research_questions TEXT NOT NULL DEFAULT '[]',
                question_framework TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL, updated_at TEXT NOT NULL
            );
            CREATE TABLE interviews (
                id TEXT PRIMARY KEY, study_id TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'in_progress',
                participant_metadata TEXT NOT NULL DEFAULT '{}',
                messages TEXT NOT NULL DEFAULT '[]', duration_secs INTEGER NOT NULL DEFAULT 0,
                ai_summary TEXT, started_at TEXT NOT NULL, completed_at TEXT
            );
            INSERT INTO studies (id, name, research_goal, question_framework, created_at, updated_at)
                VALUES ('s1', 'Trips', 'goal', '["A?","B?"]', 't', 't');
            INSERT INTO interviews (id, study_id, started_at) VALUES ('i1', 's1', 't');
            INSERT INTO interviews (id, study_id, started_at) VALUES ('orphan', 'gone', 't');
            PRAGMA user_version = 2;
            "#,
        )
        .unwrap();

        run_migrations(&conn).unwrap();

        let pinned = |id: &str| -> (String, Option<String>) {
            conn.query_row(
                "SELECT question_framework, progress FROM interviews WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap()
        };
        assert_eq!(pinned("i1"), (r#"["A?","B?"]"#.to_owned(), None));
        assert_eq!(pinned("orphan"), ("[]".to_owned(), None));
    }
}
