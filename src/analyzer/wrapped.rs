use crate::analyzer::categorizer::CategoryTag;
use crate::analyzer::comparisons::{self, DEFAULT_COMPARISON_COUNT, ScoredComparison};
use crate::workout::WorkoutRecord;
use anyhow::{Result, bail};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Maximum gap in calendar days between two workouts that still continues a streak.
pub const STREAK_GAP_DAYS: i64 = 7;

/// Source of "now" for wrapped computations.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone>(pub DateTime<Tz>);

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.0.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Month,
    Year,
}

impl Window {
    fn contains(self, today: NaiveDate, date: NaiveDate) -> bool {
        match self {
            Window::Year => date.year() == today.year(),
            Window::Month => date.year() == today.year() && date.month() == today.month(),
        }
    }

    fn period_key(self, today: NaiveDate) -> String {
        match self {
            Window::Year => today.format("%Y").to_string(),
            Window::Month => today.format("%Y-%m").to_string(),
        }
    }

    fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Window::Year => date.with_day(1).unwrap_or(date),
            Window::Month => date,
        }
    }

    fn bucket_label(self, start: NaiveDate) -> String {
        match self {
            Window::Year => start.format("%b").to_string(),
            Window::Month => start.format("%b %-d").to_string(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Window::Month => "month",
            Window::Year => "year",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Window {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "month" | "monthly" => Ok(Window::Month),
            "year" | "yearly" => Ok(Window::Year),
            _ => bail!("Unsupported window: {raw}. Expected 'month' or 'year'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseReps {
    pub name: String,
    pub reps: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalRecord {
    pub exercise: String,
    pub weight: f64,
    pub day: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodBucket {
    pub label: String,
    pub weight: f64,
    pub workouts: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub longest: u64,
    pub current: u64,
}

/// Snapshot of one window of training history.
///
/// Optional highlights are `None` when the window holds no workouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrappedStats {
    pub window: Window,
    pub period: String,
    pub generated_at: String,
    pub total_weight_lifted: f64,
    pub total_workouts: u64,
    pub exercise_with_most_reps: Option<ExerciseReps>,
    pub most_common_day: Option<DayCount>,
    pub least_common_day: Option<DayCount>,
    pub highest_pr: Option<PersonalRecord>,
    pub weight_comparisons: Vec<ScoredComparison>,
    pub breakdown: Vec<PeriodBucket>,
    pub streak: StreakSummary,
}

impl WrappedStats {
    pub fn is_empty(&self) -> bool {
        self.total_workouts == 0
    }
}

pub fn compute_wrapped_stats<C: Clock>(
    history: &[WorkoutRecord],
    window: Window,
    allowed: &[CategoryTag],
    clock: &C,
) -> WrappedStats {
    let now = clock.now();
    let tz = now.timezone();
    let today = now.date_naive();

    let filtered = history
        .iter()
        .map(|record| (record, record.performed_at.with_timezone(&tz).date_naive()))
        .filter(|(_, date)| window.contains(today, *date))
        .collect::<Vec<_>>();

    let total_weight_lifted = filtered
        .iter()
        .map(|(record, _)| sanitize_weight(record.total_weight))
        .sum::<f64>();

    WrappedStats {
        window,
        period: window.period_key(today),
        generated_at: now.with_timezone(&Utc).to_rfc3339(),
        total_weight_lifted,
        total_workouts: filtered.len() as u64,
        exercise_with_most_reps: top_exercise_by_reps(&filtered),
        most_common_day: most_common_day(&filtered),
        least_common_day: least_common_day(&filtered),
        highest_pr: highest_pr(&filtered),
        weight_comparisons: comparisons::select(
            total_weight_lifted,
            DEFAULT_COMPARISON_COUNT,
            allowed,
        ),
        breakdown: breakdown(&filtered, window),
        streak: streak(&filtered, today),
    }
}

type Dated<'a> = (&'a WorkoutRecord, NaiveDate);

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

/// Sums amounts per key, keeping keys in first-seen order.
fn tally<'a>(entries: impl IntoIterator<Item = (&'a str, u64)>) -> Vec<(&'a str, u64)> {
    let mut totals: Vec<(&str, u64)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (key, amount) in entries {
        match positions.get(key) {
            Some(&position) => totals[position].1 += amount,
            None => {
                positions.insert(key, totals.len());
                totals.push((key, amount));
            }
        }
    }

    totals
}

fn top_exercise_by_reps(filtered: &[Dated<'_>]) -> Option<ExerciseReps> {
    let totals = tally(filtered.iter().flat_map(|&(record, _)| {
        record
            .exercises
            .iter()
            .map(|exercise| (exercise.name.as_str(), exercise.total_reps()))
    }));

    totals
        .into_iter()
        .reduce(|best, entry| if entry.1 > best.1 { entry } else { best })
        .map(|(name, reps)| ExerciseReps {
            name: name.to_string(),
            reps,
        })
}

fn day_counts<'a>(filtered: &[Dated<'a>]) -> Vec<(&'a str, u64)> {
    tally(filtered.iter().map(|&(record, _)| (record.day.as_str(), 1)))
}

fn most_common_day(filtered: &[Dated<'_>]) -> Option<DayCount> {
    day_counts(filtered)
        .into_iter()
        .reduce(|best, entry| if entry.1 > best.1 { entry } else { best })
        .map(|(name, count)| DayCount {
            name: name.to_string(),
            count,
        })
}

fn least_common_day(filtered: &[Dated<'_>]) -> Option<DayCount> {
    let counts = day_counts(filtered);
    if counts.len() < 2 {
        return None;
    }

    counts
        .into_iter()
        .reduce(|best, entry| if entry.1 < best.1 { entry } else { best })
        .map(|(name, count)| DayCount {
            name: name.to_string(),
            count,
        })
}

fn highest_pr(filtered: &[Dated<'_>]) -> Option<PersonalRecord> {
    let mut best: Option<PersonalRecord> = None;

    for (record, _) in filtered {
        for exercise in &record.exercises {
            let estimate = exercise.estimated_one_rep_max;
            if !estimate.is_finite() {
                continue;
            }
            // Bodyweight lifts carry a 0 estimate and still count as a record.
            let estimate = estimate.max(0.0);

            if best.as_ref().is_none_or(|current| estimate > current.weight) {
                best = Some(PersonalRecord {
                    exercise: exercise.name.clone(),
                    weight: estimate,
                    day: record.day.clone(),
                });
            }
        }
    }

    best
}

fn breakdown(filtered: &[Dated<'_>], window: Window) -> Vec<PeriodBucket> {
    let buckets = filtered.iter().fold(
        BTreeMap::<NaiveDate, (f64, u64)>::new(),
        |mut acc, (record, date)| {
            let entry = acc.entry(window.bucket_start(*date)).or_insert((0.0, 0));
            entry.0 += sanitize_weight(record.total_weight);
            entry.1 += 1;
            acc
        },
    );

    buckets
        .into_iter()
        .map(|(start, (weight, workouts))| PeriodBucket {
            label: window.bucket_label(start),
            weight,
            workouts,
        })
        .collect()
}

fn streak(filtered: &[Dated<'_>], today: NaiveDate) -> StreakSummary {
    let mut ordered = filtered.to_vec();
    ordered.sort_by_key(|(record, _)| record.performed_at);

    let mut longest = 0_u64;
    let mut running = 0_u64;
    let mut previous: Option<NaiveDate> = None;

    for (_, date) in &ordered {
        running = match previous {
            Some(last) if (*date - last).num_days() <= STREAK_GAP_DAYS => running + 1,
            Some(_) => {
                longest = longest.max(running);
                1
            }
            None => 1,
        };
        previous = Some(*date);
    }
    longest = longest.max(running);

    let current = match previous {
        Some(last) if (today - last).num_days() <= STREAK_GAP_DAYS => running,
        _ => 0,
    };

    StreakSummary { longest, current }
}
