pub mod achievements;
pub mod catalog;
pub mod categorizer;
pub mod comparisons;
pub mod report;
pub mod wrapped;

use crate::analyzer::report::SavedReport;
use crate::analyzer::wrapped::{Clock, Window, WrappedStats};
use crate::config::Config;
use crate::db::Database;
use anyhow::Result;
use tracing::info;

pub fn generate_and_store_report<C: Clock>(
    config: &Config,
    window: Window,
    clock: &C,
) -> Result<(WrappedStats, SavedReport)> {
    let database = Database::open(&config.db_path)?;
    let history = database.all_workouts()?;

    let stats = wrapped::compute_wrapped_stats(&history, window, &config.category_filter(), clock);
    let saved = report::save_report_files(&stats, &config.report_dir)?;

    database.upsert_report_meta(
        &stats.period,
        window.as_str(),
        clock.now().timestamp(),
        &saved.markdown_path.display().to_string(),
        &saved.json_path.display().to_string(),
    )?;

    info!(
        period = %stats.period,
        workouts = stats.total_workouts,
        path = %saved.markdown_path.display(),
        "wrapped report saved"
    );

    Ok((stats, saved))
}

#[cfg(test)]
mod tests {
    use super::generate_and_store_report;
    use crate::analyzer::wrapped::{FixedClock, Window};
    use crate::config::Config;
    use crate::db::Database;
    use crate::workout::parse_workouts;
    use chrono::{TimeZone, Utc};

    #[test]
    fn report_is_saved_and_recorded() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Config {
            db_path: dir.path().join("workouts.db"),
            report_dir: dir.path().join("reports"),
            allowed_categories: vec!["people".to_string()],
            ..Config::default()
        };

        let history = parse_workouts(
            r#"[
                {"performed_at": "2026-10-01T18:00:00Z", "day": "Legs", "total_weight": 600.0},
                {"performed_at": "2026-10-03T18:00:00Z", "day": "Push", "total_weight": 400.0},
                {"performed_at": "2025-12-30T18:00:00Z", "day": "Legs", "total_weight": 9000.0}
            ]"#,
        )
        .expect("history");
        Database::open(&config.db_path)
            .expect("db")
            .insert_workouts(&history)
            .expect("insert");

        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap());
        let (stats, saved) =
            generate_and_store_report(&config, Window::Month, &clock).expect("report");

        assert_eq!(stats.period, "2026-10");
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.total_weight_lifted, 1000.0);
        assert!(!stats.weight_comparisons.is_empty());
        assert!(saved.markdown_path.ends_with("wrapped-2026-10.md"));
        assert!(saved.json_path.exists());

        let database = Database::open(&config.db_path).expect("db");
        let meta = database
            .report_meta("2026-10")
            .expect("query")
            .expect("report row");
        assert_eq!(meta.window, "month");
        assert_eq!(meta.generated_at, clock.0.timestamp());
    }
}
