use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "LiftWrapped",
    about = "Workout history wrapped summaries and weight comparisons"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import workouts from a JSON history file.
    Import { file: PathBuf },
    /// Show the wrapped summary for the current year or month.
    Wrapped {
        #[arg(long, default_value = "year")]
        window: String,
        #[arg(long, default_value_t = false)]
        json: bool,
        #[arg(long, default_value_t = false)]
        save: bool,
        /// Evaluate as if today were this date (YYYY-MM-DD).
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Compare a weight in pounds against the reference catalog.
    Compare {
        weight: f64,
        #[arg(long)]
        count: Option<usize>,
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Show the category derived for an item name.
    Categorize { name: String },
    /// List catalog milestones reached by a total (defaults to the lifetime total).
    Achievements {
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Read or change a config value.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show store and config status.
    Status,
    /// Run the read-only localhost API.
    Serve,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    Set { key: String, value: String },
    Get { key: String },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn parses_compare_with_categories() {
        let cli = Cli::try_parse_from([
            "LiftWrapped",
            "compare",
            "1000",
            "--count",
            "3",
            "--category",
            "people",
            "--category",
            "animals",
        ])
        .expect("valid arguments");

        match cli.command {
            Commands::Compare {
                weight,
                count,
                categories,
            } => {
                assert_eq!(weight, 1000.0);
                assert_eq!(count, Some(3));
                assert_eq!(categories, vec!["people", "animals"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn wrapped_defaults_to_year() {
        let cli = Cli::try_parse_from(["LiftWrapped", "wrapped", "--json"]).expect("valid");

        match cli.command {
            Commands::Wrapped {
                window,
                json,
                save,
                as_of,
            } => {
                assert_eq!(window, "year");
                assert!(json);
                assert!(!save);
                assert!(as_of.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn every_command_has_help_text() {
        let command = Cli::command();
        let undocumented = command
            .get_subcommands()
            .filter(|subcommand| subcommand.get_about().is_none())
            .map(|subcommand| subcommand.get_name().to_string())
            .collect::<Vec<_>>();

        assert!(undocumented.is_empty(), "missing help: {undocumented:?}");
    }
}
