use crate::analyzer::wrapped::{PeriodBucket, Window, WrappedStats};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const EMPTY_STATE: &str =
    "No workouts logged yet. Start logging workouts to see your wrapped summary.";

#[derive(Debug)]
pub struct SavedReport {
    pub markdown_path: PathBuf,
    pub json_path: PathBuf,
}

pub fn render_markdown(stats: &WrappedStats) -> String {
    let title = format!("# {} Wrapped - {}", window_title(stats), stats.period);

    if stats.is_empty() {
        return format!("{title}\n\n{EMPTY_STATE}\n");
    }

    let top_exercise = stats
        .exercise_with_most_reps
        .as_ref()
        .map(|exercise| format!("{} ({} reps)", exercise.name, exercise.reps))
        .unwrap_or_else(|| "None".to_string());
    let most_common_day = stats
        .most_common_day
        .as_ref()
        .map(|day| format!("{} ({}x)", day.name, day.count))
        .unwrap_or_else(|| "None".to_string());
    let least_common_day = stats
        .least_common_day
        .as_ref()
        .map(|day| format!("{} ({}x)", day.name, day.count))
        .unwrap_or_else(|| "None".to_string());
    let highest_pr = stats
        .highest_pr
        .as_ref()
        .map(|record| {
            format!(
                "{} - {} est. 1RM ({})",
                record.exercise,
                format_pounds(record.weight),
                record.day
            )
        })
        .unwrap_or_else(|| "None".to_string());

    let comparison_rows = if stats.weight_comparisons.is_empty() {
        "- No comparison available".to_string()
    } else {
        stats
            .weight_comparisons
            .iter()
            .enumerate()
            .map(|(index, comparison)| {
                format!(
                    "{}. {} (~{}, {:.0}% match)",
                    index + 1,
                    comparison.label,
                    format_pounds(comparison.approximated_weight),
                    comparison.fit_ratio.max(0.0) * 100.0
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "{}\n\n## Summary\n- Total weight lifted: {}\n- Workouts: {}\n\n## Highlights\n- Most reps: {}\n- Favorite day: {}\n- Least trained day: {}\n- Highest PR: {}\n\n## You lifted the equivalent of\n{}\n\n## Breakdown\n| {} | Weight | Workouts |\n|------|--------|----------|\n{}\n\n## Streak\n- Longest: {}\n- Current: {}\n",
        title,
        format_pounds(stats.total_weight_lifted),
        stats.total_workouts,
        top_exercise,
        most_common_day,
        least_common_day,
        highest_pr,
        comparison_rows,
        bucket_heading(stats),
        breakdown_rows(&stats.breakdown),
        stats.streak.longest,
        stats.streak.current
    )
}

pub fn save_report_files(stats: &WrappedStats, report_dir: &Path) -> Result<SavedReport> {
    fs::create_dir_all(report_dir).with_context(|| {
        format!(
            "Failed to create report directory: {}",
            report_dir.display()
        )
    })?;

    let stem = format!("wrapped-{}", stats.period);
    let markdown_path = report_dir.join(format!("{stem}.md"));
    let json_path = report_dir.join(format!("{stem}.json"));

    fs::write(&markdown_path, render_markdown(stats)).with_context(|| {
        format!(
            "Failed to write Markdown report: {}",
            markdown_path.display()
        )
    })?;

    let json_content =
        serde_json::to_string_pretty(stats).context("Failed to serialize report JSON")?;
    fs::write(&json_path, json_content)
        .with_context(|| format!("Failed to write JSON report: {}", json_path.display()))?;

    Ok(SavedReport {
        markdown_path,
        json_path,
    })
}

fn window_title(stats: &WrappedStats) -> &'static str {
    match stats.window {
        Window::Year => "Year",
        Window::Month => "Month",
    }
}

fn bucket_heading(stats: &WrappedStats) -> &'static str {
    match stats.window {
        Window::Year => "Month",
        Window::Month => "Day",
    }
}

fn breakdown_rows(buckets: &[PeriodBucket]) -> String {
    buckets
        .iter()
        .map(|bucket| {
            format!(
                "| {} | {} | {} |",
                bucket.label,
                format_pounds(bucket.weight),
                bucket.workouts
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_pounds(weight: f64) -> String {
    if !weight.is_finite() {
        return "0 lbs".to_string();
    }

    if weight.abs() >= 1.0e12 {
        return format!("{weight:.2e} lbs");
    }

    let rounded = weight.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(",");

    if rounded < 0 {
        format!("-{grouped} lbs")
    } else {
        format!("{grouped} lbs")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_pounds, render_markdown, save_report_files};
    use crate::analyzer::wrapped::{FixedClock, Window, compute_wrapped_stats};
    use crate::workout::{ExerciseEntry, SetEntry, WorkoutRecord};
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock<Utc> {
        FixedClock(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap())
    }

    fn history() -> Vec<WorkoutRecord> {
        vec![WorkoutRecord {
            performed_at: Utc.with_ymd_and_hms(2026, 10, 14, 18, 0, 0).unwrap(),
            day: "Push Day".to_string(),
            total_weight: 1000.0,
            exercises: vec![ExerciseEntry {
                name: "Bench Press".to_string(),
                total_weight: 1000.0,
                estimated_one_rep_max: 225.0,
                sets: vec![SetEntry {
                    weight: 200.0,
                    reps: 5,
                }],
            }],
        }]
    }

    #[test]
    fn pounds_are_grouped() {
        assert_eq!(format_pounds(0.0), "0 lbs");
        assert_eq!(format_pounds(1234567.4), "1,234,567 lbs");
        assert_eq!(format_pounds(999.6), "1,000 lbs");
        assert_eq!(format_pounds(f64::NAN), "0 lbs");
    }

    #[test]
    fn empty_snapshot_renders_empty_state() {
        let stats = compute_wrapped_stats(&[], Window::Year, &[], &clock());
        let markdown = render_markdown(&stats);

        assert!(markdown.starts_with("# Year Wrapped - 2026"));
        assert!(markdown.contains("Start logging workouts"));
        assert!(!markdown.contains("## Highlights"));
    }

    #[test]
    fn markdown_lists_highlights() {
        let stats = compute_wrapped_stats(&history(), Window::Month, &[], &clock());
        let markdown = render_markdown(&stats);

        assert!(markdown.contains("# Month Wrapped - 2026-10"));
        assert!(markdown.contains("- Total weight lifted: 1,000 lbs"));
        assert!(markdown.contains("- Most reps: Bench Press (5 reps)"));
        assert!(markdown.contains("- Favorite day: Push Day (1x)"));
        assert!(markdown.contains("- Least trained day: None"));
        assert!(markdown.contains("- Highest PR: Bench Press - 225 lbs est. 1RM (Push Day)"));
        assert!(markdown.contains("| Oct 14 | 1,000 lbs | 1 |"));
    }

    #[test]
    fn report_files_are_named_by_period() {
        let dir = tempfile::tempdir().expect("temp dir");
        let stats = compute_wrapped_stats(&history(), Window::Year, &[], &clock());

        let saved = save_report_files(&stats, dir.path()).expect("saved report");

        assert_eq!(saved.markdown_path, dir.path().join("wrapped-2026.md"));
        assert!(saved.markdown_path.exists());
        let json = std::fs::read_to_string(&saved.json_path).expect("json file");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["total_workouts"], 1);
        assert_eq!(value["window"], "year");
    }
}
