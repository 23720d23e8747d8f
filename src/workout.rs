use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    pub weight: f64,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub name: String,
    pub total_weight: f64,
    pub estimated_one_rep_max: f64,
    pub sets: Vec<SetEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub performed_at: DateTime<Utc>,
    /// Training-day label such as "Push Day".
    pub day: String,
    pub total_weight: f64,
    pub exercises: Vec<ExerciseEntry>,
}

impl ExerciseEntry {
    pub fn total_reps(&self) -> u64 {
        self.sets.iter().map(|set| u64::from(set.reps)).sum()
    }
}

#[derive(Debug, Deserialize)]
struct ExerciseInput {
    name: String,
    total_weight: Option<f64>,
    estimated_one_rep_max: Option<f64>,
    #[serde(default)]
    sets: Vec<SetEntry>,
}

#[derive(Debug, Deserialize)]
struct WorkoutInput {
    performed_at: DateTime<Utc>,
    day: String,
    total_weight: Option<f64>,
    #[serde(default)]
    exercises: Vec<ExerciseInput>,
}

impl From<ExerciseInput> for ExerciseEntry {
    fn from(input: ExerciseInput) -> Self {
        let total_weight = input.total_weight.unwrap_or_else(|| {
            input
                .sets
                .iter()
                .map(|set| set.weight.max(0.0) * f64::from(set.reps))
                .sum()
        });
        let estimated_one_rep_max = input.estimated_one_rep_max.unwrap_or_else(|| {
            input
                .sets
                .iter()
                .map(|set| estimate_one_rep_max(set.weight, set.reps))
                .fold(0.0, f64::max)
        });

        Self {
            name: input.name.trim().to_string(),
            total_weight,
            estimated_one_rep_max,
            sets: input.sets,
        }
    }
}

impl From<WorkoutInput> for WorkoutRecord {
    fn from(input: WorkoutInput) -> Self {
        let exercises = input
            .exercises
            .into_iter()
            .map(ExerciseEntry::from)
            .collect::<Vec<_>>();
        let total_weight = input
            .total_weight
            .unwrap_or_else(|| exercises.iter().map(|exercise| exercise.total_weight).sum());

        Self {
            performed_at: input.performed_at,
            day: input.day.trim().to_string(),
            total_weight,
            exercises,
        }
    }
}

/// Epley estimate: `w * (1 + r / 30)`, with a single rep being the lift itself.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> f64 {
    if reps == 0 || !weight.is_finite() || weight <= 0.0 {
        return 0.0;
    }

    if reps == 1 {
        weight
    } else {
        weight * (1.0 + f64::from(reps) / 30.0)
    }
}

pub fn parse_workouts(content: &str) -> Result<Vec<WorkoutRecord>> {
    let inputs: Vec<WorkoutInput> =
        serde_json::from_str(content).context("Failed to parse workout history JSON")?;

    Ok(inputs.into_iter().map(WorkoutRecord::from).collect())
}

pub fn load_workouts_file(path: &Path) -> Result<Vec<WorkoutRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read workout history file: {}", path.display()))?;

    parse_workouts(&content)
        .with_context(|| format!("Invalid workout history file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{estimate_one_rep_max, parse_workouts};

    #[test]
    fn epley_estimate() {
        assert_eq!(estimate_one_rep_max(200.0, 1), 200.0);
        assert!((estimate_one_rep_max(150.0, 10) - 200.0).abs() < 1e-9);
        assert_eq!(estimate_one_rep_max(150.0, 0), 0.0);
        assert_eq!(estimate_one_rep_max(-10.0, 5), 0.0);
    }

    #[test]
    fn derives_missing_totals_and_estimates() {
        let workouts = parse_workouts(
            r#"[{
                "performed_at": "2026-03-02T18:30:00Z",
                "day": " Push Day ",
                "exercises": [
                    {"name": "Bench Press", "sets": [
                        {"weight": 150.0, "reps": 10},
                        {"weight": 185.0, "reps": 1}
                    ]},
                    {"name": "Dips", "total_weight": 500.0, "estimated_one_rep_max": 90.0}
                ]
            }]"#,
        )
        .expect("valid history");

        assert_eq!(workouts.len(), 1);
        let workout = &workouts[0];
        assert_eq!(workout.day, "Push Day");
        assert_eq!(workout.exercises[0].total_weight, 1685.0);
        assert!((workout.exercises[0].estimated_one_rep_max - 200.0).abs() < 1e-9);
        assert_eq!(workout.exercises[0].total_reps(), 11);
        assert_eq!(workout.exercises[1].estimated_one_rep_max, 90.0);
        assert!(workout.exercises[1].sets.is_empty());
        assert_eq!(workout.total_weight, 2185.0);
    }

    #[test]
    fn explicit_workout_total_is_kept() {
        let workouts = parse_workouts(
            r#"[{"performed_at": "2026-03-02T18:30:00Z", "day": "Legs", "total_weight": 12500.0}]"#,
        )
        .expect("valid history");

        assert_eq!(workouts[0].total_weight, 12500.0);
        assert!(workouts[0].exercises.is_empty());
    }

    #[test]
    fn malformed_history_is_an_error() {
        assert!(parse_workouts("{not json").is_err());
        assert!(parse_workouts(r#"[{"day": "Legs"}]"#).is_err());
    }
}
