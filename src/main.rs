mod analyzer;
mod api;
mod cli;
mod config;
mod db;
mod workout;

use crate::analyzer::achievements;
use crate::analyzer::categorizer;
use crate::analyzer::comparisons;
use crate::analyzer::report::{self, format_pounds};
use crate::analyzer::wrapped::{self, Clock, FixedClock, SystemClock, Window};
use crate::cli::{Cli, Commands, ConfigCommands};
use crate::config::{Config, clamp_comparison_count};
use crate::db::Database;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, TimeZone};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import { file } => handle_import(&file),
        Commands::Wrapped {
            window,
            json,
            save,
            as_of,
        } => handle_wrapped(&window, json, save, as_of),
        Commands::Compare {
            weight,
            count,
            categories,
        } => handle_compare(weight, count, &categories),
        Commands::Categorize { name } => {
            let category = categorizer::categorize(&name);
            println!("{category} ({})", category.display_name());
            Ok(())
        }
        Commands::Achievements { weight } => handle_achievements(weight),
        Commands::Config { command } => handle_config_command(command),
        Commands::Status => handle_status(),
        Commands::Serve => {
            let config = load_or_default_config()?;
            run_service(config).await
        }
    }
}

fn handle_import(file: &Path) -> Result<()> {
    let config = load_or_default_config()?;
    let workouts = workout::load_workouts_file(file)?;

    let mut database = Database::open(&config.db_path)?;
    let imported = database.insert_workouts(&workouts)?;

    info!(count = imported, file = %file.display(), "workouts imported");
    println!("Imported {imported} workout(s) from {}", file.display());

    Ok(())
}

fn handle_wrapped(window: &str, json: bool, save: bool, as_of: Option<String>) -> Result<()> {
    let config = load_or_default_config()?;
    let window = window.parse::<Window>()?;

    match as_of {
        Some(date) => {
            let clock = fixed_clock_for(&date)?;
            run_wrapped(&config, window, json, save, &clock)
        }
        None => run_wrapped(&config, window, json, save, &SystemClock),
    }
}

fn run_wrapped<C: Clock>(
    config: &Config,
    window: Window,
    json: bool,
    save: bool,
    clock: &C,
) -> Result<()> {
    let stats = if save {
        let (stats, saved) = analyzer::generate_and_store_report(config, window, clock)?;
        eprintln!("Report saved: {}", saved.markdown_path.display());
        eprintln!("- JSON: {}", saved.json_path.display());
        stats
    } else {
        let database = Database::open(&config.db_path)?;
        let history = database.all_workouts()?;
        wrapped::compute_wrapped_stats(&history, window, &config.category_filter(), clock)
    };

    if json {
        let content =
            serde_json::to_string_pretty(&stats).context("Failed to serialize wrapped stats")?;
        println!("{content}");
    } else {
        print!("{}", report::render_markdown(&stats));
    }

    Ok(())
}

fn handle_compare(weight: f64, count: Option<usize>, categories: &[String]) -> Result<()> {
    let config = load_or_default_config()?;
    let count = count
        .map(clamp_comparison_count)
        .unwrap_or(config.comparison_count);
    let allowed = if categories.is_empty() {
        config.category_filter()
    } else {
        categorizer::parse_category_list(categories)
    };

    let results = comparisons::select(weight, count, &allowed);
    if results.is_empty() {
        println!("No comparison available for {}", format_pounds(weight));
        return Ok(());
    }

    println!("{} is about:", format_pounds(weight));
    for (index, comparison) in results.iter().enumerate() {
        println!(
            "{}. {} (~{}, {:.0}% match) [{}]",
            index + 1,
            comparison.label,
            format_pounds(comparison.approximated_weight),
            comparison.fit_ratio.max(0.0) * 100.0,
            comparison.category
        );
    }

    Ok(())
}

fn handle_achievements(weight: Option<f64>) -> Result<()> {
    let config = load_or_default_config()?;
    let total = match weight {
        Some(weight) => weight,
        None => {
            let database = Database::open(&config.db_path)?;
            achievements::lifetime_total(&database.all_workouts()?)
        }
    };

    let list = achievements::achievements(total, &config.category_filter());
    let earned = list.iter().filter(|achievement| achievement.earned).count();

    println!(
        "Lifetime total: {} ({earned}/{} unlocked)",
        format_pounds(total),
        list.len()
    );
    for achievement in &list {
        let mark = if achievement.earned { "x" } else { " " };
        println!(
            "[{mark}] {} - {} ({:.0}%)",
            achievement.name,
            format_pounds(achievement.weight),
            achievement.progress * 100.0
        );
    }

    Ok(())
}

fn handle_config_command(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Set { key, value } => {
            let mut config = load_or_default_config()?;
            config.set_value(&key, &value)?;
            config.save()?;

            println!("Config saved: {key} = {value}");
            Ok(())
        }
        ConfigCommands::Get { key } => {
            let config = load_config()?;
            let value = config
                .get_value(&key)
                .with_context(|| format!("Unsupported config key: {key}"))?;

            println!("{value}");
            Ok(())
        }
    }
}

fn handle_status() -> Result<()> {
    let config = load_or_default_config()?;
    let database = Database::open(&config.db_path)?;
    let allowed = config.category_filter();

    println!("LiftWrapped status");
    println!("- config: {}", Config::config_path()?.display());
    println!("- db_path: {}", config.db_path.display());
    println!("- workouts: {}", database.workout_count()?);
    println!(
        "- last_workout_at: {}",
        database
            .latest_workout_timestamp()?
            .map(|timestamp| timestamp.with_timezone(&Local).to_rfc3339())
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "- latest_report: {}",
        database
            .latest_report_meta()?
            .map(|meta| meta.period)
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "- categories: {}",
        if allowed.is_empty() {
            "all".to_string()
        } else {
            allowed
                .iter()
                .map(|tag| tag.as_str())
                .collect::<Vec<_>>()
                .join(",")
        }
    );
    println!("- api_port: {}", config.api_port);

    Ok(())
}

async fn run_service(config: Config) -> Result<()> {
    let _ = Database::open(&config.db_path)?;
    let shared_config = Arc::new(config);

    info!("LiftWrapped service started");

    tokio::select! {
        api_result = api::run_server(shared_config) => {
            api_result?;
        }
        _ = signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}

fn fixed_clock_for(date: &str) -> Result<FixedClock<Local>> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {date}. Example: 2026-10-16"))?;
    let noon = day
        .and_hms_opt(12, 0, 0)
        .context("Failed to build timestamp for --as-of")?;
    let now = Local
        .from_local_datetime(&noon)
        .single()
        .context("Failed to convert --as-of date to local time")?;

    Ok(FixedClock(now))
}

fn load_or_default_config() -> Result<Config> {
    if Config::config_path()?.exists() {
        return Config::load();
    }

    let config = Config::default();
    config.save()?;
    Ok(config)
}

fn load_config() -> Result<Config> {
    Config::load().with_context(|| {
        "Config file not found. Run `LiftWrapped config set <key> <value>` first.".to_string()
    })
}
