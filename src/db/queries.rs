pub const CREATE_WORKOUTS: &str = r#"
CREATE TABLE IF NOT EXISTS workouts (
  id           INTEGER PRIMARY KEY AUTOINCREMENT,
  performed_at INTEGER NOT NULL,
  day          TEXT NOT NULL,
  total_weight REAL NOT NULL DEFAULT 0
);
"#;

pub const CREATE_EXERCISES: &str = r#"
CREATE TABLE IF NOT EXISTS exercises (
  id                    INTEGER PRIMARY KEY AUTOINCREMENT,
  workout_id            INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
  position              INTEGER NOT NULL,
  name                  TEXT NOT NULL,
  total_weight          REAL NOT NULL DEFAULT 0,
  estimated_one_rep_max REAL NOT NULL DEFAULT 0
);
"#;

pub const CREATE_SETS: &str = r#"
CREATE TABLE IF NOT EXISTS sets (
  id          INTEGER PRIMARY KEY AUTOINCREMENT,
  exercise_id INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
  position    INTEGER NOT NULL,
  weight      REAL NOT NULL DEFAULT 0,
  reps        INTEGER NOT NULL DEFAULT 0
);
"#;

pub const CREATE_REPORTS: &str = r#"
CREATE TABLE IF NOT EXISTS reports (
  id           INTEGER PRIMARY KEY AUTOINCREMENT,
  period       TEXT NOT NULL UNIQUE,
  window       TEXT NOT NULL,
  generated_at INTEGER NOT NULL,
  md_path      TEXT NOT NULL,
  json_path    TEXT NOT NULL
);
"#;

pub const INDEX_WORKOUTS_PERFORMED_AT: &str =
    "CREATE INDEX IF NOT EXISTS idx_workouts_performed_at ON workouts(performed_at);";

pub const INDEX_EXERCISES_WORKOUT: &str =
    "CREATE INDEX IF NOT EXISTS idx_exercises_workout ON exercises(workout_id, position);";

pub const INDEX_SETS_EXERCISE: &str =
    "CREATE INDEX IF NOT EXISTS idx_sets_exercise ON sets(exercise_id, position);";

pub fn schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_WORKOUTS,
        CREATE_EXERCISES,
        CREATE_SETS,
        CREATE_REPORTS,
        INDEX_WORKOUTS_PERFORMED_AT,
        INDEX_EXERCISES_WORKOUT,
        INDEX_SETS_EXERCISE,
    ]
}
