pub mod queries;

use crate::workout::{ExerciseEntry, SetEntry, WorkoutRecord};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetaRow {
    pub id: i64,
    pub period: String,
    pub window: String,
    pub generated_at: i64,
    pub md_path: String,
    pub json_path: String,
}

pub struct Database {
    conn: Connection,
}

struct WorkoutRow {
    id: i64,
    performed_at: i64,
    day: String,
    total_weight: f64,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create DB directory: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open SQLite DB: {}", path.display()))?;

        let database = Self { conn };
        database.init_schema()?;

        Ok(database)
    }

    pub fn init_schema(&self) -> Result<()> {
        queries::schema_statements()
            .iter()
            .try_for_each(|statement| {
                self.conn
                    .execute(statement, [])
                    .context("Failed to initialize schema")
                    .map(|_| ())
            })
    }

    /// Inserts every workout with its exercises and sets in one transaction.
    pub fn insert_workouts(&mut self, workouts: &[WorkoutRecord]) -> Result<usize> {
        let transaction = self
            .conn
            .transaction()
            .context("Failed to start transaction")?;

        for workout in workouts {
            transaction
                .execute(
                    "INSERT INTO workouts (performed_at, day, total_weight) VALUES (?1, ?2, ?3)",
                    params![
                        workout.performed_at.timestamp_millis(),
                        &workout.day,
                        workout.total_weight
                    ],
                )
                .context("Failed to insert workout")?;
            let workout_id = transaction.last_insert_rowid();

            for (position, exercise) in workout.exercises.iter().enumerate() {
                transaction
                    .execute(
                        "INSERT INTO exercises (workout_id, position, name, total_weight, estimated_one_rep_max)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            workout_id,
                            position as i64,
                            &exercise.name,
                            exercise.total_weight,
                            exercise.estimated_one_rep_max
                        ],
                    )
                    .context("Failed to insert exercise")?;
                let exercise_id = transaction.last_insert_rowid();

                exercise
                    .sets
                    .iter()
                    .enumerate()
                    .try_for_each(|(set_position, set)| {
                        transaction
                            .execute(
                                "INSERT INTO sets (exercise_id, position, weight, reps) VALUES (?1, ?2, ?3, ?4)",
                                params![exercise_id, set_position as i64, set.weight, set.reps],
                            )
                            .context("Failed to insert set")
                            .map(|_| ())
                    })?;
            }
        }

        transaction
            .commit()
            .context("Failed to commit workouts")?;
        Ok(workouts.len())
    }

    /// Full history, oldest first, with exercises and sets in their logged order.
    pub fn all_workouts(&self) -> Result<Vec<WorkoutRecord>> {
        let mut sets_by_exercise = self.sets_by_exercise()?;
        let mut exercises_by_workout: HashMap<i64, Vec<ExerciseEntry>> = HashMap::new();

        let mut statement = self.conn.prepare(
            "SELECT id, workout_id, name, total_weight, estimated_one_rep_max
             FROM exercises
             ORDER BY workout_id ASC, position ASC",
        )?;
        let exercise_rows = statement
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to query exercises")?;

        for (id, workout_id, name, total_weight, estimated_one_rep_max) in exercise_rows {
            exercises_by_workout
                .entry(workout_id)
                .or_default()
                .push(ExerciseEntry {
                    name,
                    total_weight,
                    estimated_one_rep_max,
                    sets: sets_by_exercise.remove(&id).unwrap_or_default(),
                });
        }

        let mut statement = self.conn.prepare(
            "SELECT id, performed_at, day, total_weight
             FROM workouts
             ORDER BY performed_at ASC, id ASC",
        )?;
        let workout_rows = statement
            .query_map([], |row| {
                Ok(WorkoutRow {
                    id: row.get(0)?,
                    performed_at: row.get(1)?,
                    day: row.get(2)?,
                    total_weight: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to query workouts")?;

        workout_rows
            .into_iter()
            .map(|row| {
                let performed_at = DateTime::<Utc>::from_timestamp_millis(row.performed_at)
                    .with_context(|| format!("Invalid workout timestamp: {}", row.performed_at))?;

                Ok(WorkoutRecord {
                    performed_at,
                    day: row.day,
                    total_weight: row.total_weight,
                    exercises: exercises_by_workout.remove(&row.id).unwrap_or_default(),
                })
            })
            .collect()
    }

    fn sets_by_exercise(&self) -> Result<HashMap<i64, Vec<SetEntry>>> {
        let mut statement = self.conn.prepare(
            "SELECT exercise_id, weight, reps
             FROM sets
             ORDER BY exercise_id ASC, position ASC",
        )?;

        let rows = statement
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    SetEntry {
                        weight: row.get(1)?,
                        reps: row.get(2)?,
                    },
                ))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to query sets")?;

        let mut grouped: HashMap<i64, Vec<SetEntry>> = HashMap::new();
        for (exercise_id, set) in rows {
            grouped.entry(exercise_id).or_default().push(set);
        }

        Ok(grouped)
    }

    pub fn workout_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))
            .context("Failed to count workouts")
    }

    pub fn latest_workout_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        let timestamp: Option<i64> = self
            .conn
            .query_row(
                "SELECT performed_at FROM workouts ORDER BY performed_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .ok();

        Ok(timestamp.and_then(DateTime::<Utc>::from_timestamp_millis))
    }

    pub fn report_meta(&self, period: &str) -> Result<Option<ReportMetaRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, period, window, generated_at, md_path, json_path FROM reports WHERE period = ?1",
                params![period],
                map_report_row,
            )
            .ok();

        Ok(row)
    }

    pub fn latest_report_meta(&self) -> Result<Option<ReportMetaRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, period, window, generated_at, md_path, json_path
                 FROM reports ORDER BY generated_at DESC, id DESC LIMIT 1",
                [],
                map_report_row,
            )
            .ok();

        Ok(row)
    }

    pub fn list_reports(&self, limit: usize) -> Result<Vec<ReportMetaRow>> {
        let mut statement = self.conn.prepare(
            "SELECT id, period, window, generated_at, md_path, json_path
             FROM reports
             ORDER BY generated_at DESC, id DESC
             LIMIT ?1",
        )?;

        let rows = statement
            .query_map(params![limit as i64], map_report_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list reports")?;

        Ok(rows)
    }

    pub fn upsert_report_meta(
        &self,
        period: &str,
        window: &str,
        generated_at: i64,
        md_path: &str,
        json_path: &str,
    ) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO reports (period, window, generated_at, md_path, json_path)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(period)
                 DO UPDATE SET window=excluded.window, generated_at=excluded.generated_at, md_path=excluded.md_path, json_path=excluded.json_path",
                params![period, window, generated_at, md_path, json_path],
            )
            .context("Failed to upsert report metadata")?;

        Ok(())
    }
}

fn map_report_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReportMetaRow> {
    Ok(ReportMetaRow {
        id: row.get(0)?,
        period: row.get(1)?,
        window: row.get(2)?,
        generated_at: row.get(3)?,
        md_path: row.get(4)?,
        json_path: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::Database;
    use crate::workout::{ExerciseEntry, SetEntry, WorkoutRecord};
    use chrono::{TimeZone, Utc};

    fn workout(day: &str, hour: u32) -> WorkoutRecord {
        WorkoutRecord {
            performed_at: Utc.with_ymd_and_hms(2026, 10, 14, hour, 0, 0).unwrap(),
            day: day.to_string(),
            total_weight: 1400.0,
            exercises: vec![
                ExerciseEntry {
                    name: "Squat".to_string(),
                    total_weight: 1000.0,
                    estimated_one_rep_max: 250.0,
                    sets: vec![
                        SetEntry {
                            weight: 200.0,
                            reps: 3,
                        },
                        SetEntry {
                            weight: 200.0,
                            reps: 2,
                        },
                    ],
                },
                ExerciseEntry {
                    name: "Lunge".to_string(),
                    total_weight: 400.0,
                    estimated_one_rep_max: 60.0,
                    sets: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn workouts_round_trip_in_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut db = Database::open(&dir.path().join("db").join("workouts.db")).expect("db");

        let later = workout("Legs", 19);
        let earlier = workout("Push", 7);
        assert_eq!(db.insert_workouts(&[later.clone(), earlier.clone()]).expect("insert"), 2);

        let stored = db.all_workouts().expect("history");
        assert_eq!(stored, vec![earlier, later.clone()]);
        assert_eq!(db.workout_count().expect("count"), 2);
        assert_eq!(
            db.latest_workout_timestamp().expect("latest"),
            Some(later.performed_at)
        );
    }

    #[test]
    fn empty_store_has_no_latest_workout() {
        let dir = tempfile::tempdir().expect("temp dir");
        let db = Database::open(&dir.path().join("workouts.db")).expect("db");

        assert!(db.all_workouts().expect("history").is_empty());
        assert_eq!(db.latest_workout_timestamp().expect("latest"), None);
        assert!(db.latest_report_meta().expect("latest report").is_none());
    }

    #[test]
    fn report_meta_is_upserted_by_period() {
        let dir = tempfile::tempdir().expect("temp dir");
        let db = Database::open(&dir.path().join("workouts.db")).expect("db");

        db.upsert_report_meta("2026", "year", 10, "a.md", "a.json")
            .expect("first upsert");
        db.upsert_report_meta("2026-10", "month", 20, "b.md", "b.json")
            .expect("second upsert");
        db.upsert_report_meta("2026", "year", 30, "c.md", "c.json")
            .expect("third upsert");

        let reports = db.list_reports(10).expect("reports");
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].period, "2026");
        assert_eq!(reports[0].md_path, "c.md");

        let month = db.report_meta("2026-10").expect("query").expect("row");
        assert_eq!(month.window, "month");
        assert_eq!(db.list_reports(1).expect("limited").len(), 1);
        assert_eq!(
            db.latest_report_meta().expect("latest").map(|row| row.generated_at),
            Some(30)
        );
    }
}
