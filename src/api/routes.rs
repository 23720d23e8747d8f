use crate::analyzer::achievements::{self, Achievement};
use crate::analyzer::catalog::catalog;
use crate::analyzer::categorizer::{self, CategoryTag};
use crate::analyzer::comparisons::{self, ScoredComparison};
use crate::analyzer::wrapped::{self, Clock, SystemClock, Window, WrappedStats};
use crate::config::{Config, clamp_comparison_count};
use crate::db::Database;
use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs;
use std::path::Path as FsPath;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<Config>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/status", get(status))
        .route("/api/v1/wrapped", get(wrapped_stats))
        .route("/api/v1/comparisons", get(comparison_list))
        .route("/api/v1/categorize", get(categorize_name))
        .route("/api/v1/achievements", get(achievement_list))
        .route("/api/v1/catalog", get(catalog_list))
        .route("/api/v1/categories", get(category_list))
        .route("/api/v1/reports", get(report_list))
        .route("/api/v1/report/:period", get(report_by_period))
        .route("/api/v1/report/:period/markdown", get(report_markdown))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct WrappedQuery {
    window: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ComparisonsQuery {
    weight: Option<String>,
    count: Option<String>,
    categories: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategorizeQuery {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AchievementsQuery {
    weight: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReportsQuery {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct StatusPayload {
    workouts: i64,
    latest_workout_at: Option<String>,
    latest_report_period: Option<String>,
    allowed_categories: Vec<CategoryTag>,
    api_port: u16,
}

#[derive(Debug, Serialize)]
struct ComparisonsPayload {
    weight: f64,
    comparisons: Vec<ScoredComparison>,
}

#[derive(Debug, Serialize)]
struct CategorizePayload {
    name: String,
    category: CategoryTag,
    display_name: &'static str,
}

#[derive(Debug, Serialize)]
struct AchievementsPayload {
    total_weight: f64,
    earned: usize,
    achievements: Vec<Achievement>,
}

#[derive(Debug, Serialize)]
struct CatalogEntry {
    name: &'static str,
    plural_name: &'static str,
    weight: f64,
    category: CategoryTag,
}

#[derive(Debug, Serialize)]
struct CategoryView {
    tag: CategoryTag,
    display_name: &'static str,
}

#[derive(Debug, Serialize)]
struct ReportsPayload {
    reports: Vec<ReportView>,
}

#[derive(Debug, Serialize)]
struct ReportView {
    period: String,
    window: String,
    generated_at: i64,
    json_url: String,
    markdown_url: String,
}

async fn status(State(state): State<ApiState>) -> ApiResult<Json<StatusPayload>> {
    let database = Database::open(&state.config.db_path)?;

    let payload = StatusPayload {
        workouts: database.workout_count()?,
        latest_workout_at: database
            .latest_workout_timestamp()?
            .map(|timestamp| timestamp.to_rfc3339()),
        latest_report_period: database.latest_report_meta()?.map(|meta| meta.period),
        allowed_categories: state.config.category_filter(),
        api_port: state.config.api_port,
    };

    Ok(Json(payload))
}

async fn wrapped_stats(
    State(state): State<ApiState>,
    Query(query): Query<WrappedQuery>,
) -> ApiResult<Json<WrappedStats>> {
    let window = query
        .window
        .as_deref()
        .map(Window::from_str)
        .transpose()
        .map_err(|error| ApiError::BadRequest(error.to_string()))?
        .unwrap_or(Window::Year);

    Ok(Json(wrapped_snapshot(&state.config, window, &SystemClock)?))
}

fn wrapped_snapshot<C: Clock>(config: &Config, window: Window, clock: &C) -> Result<WrappedStats> {
    let database = Database::open(&config.db_path)?;
    let history = database.all_workouts()?;

    Ok(wrapped::compute_wrapped_stats(
        &history,
        window,
        &config.category_filter(),
        clock,
    ))
}

async fn comparison_list(
    State(state): State<ApiState>,
    Query(query): Query<ComparisonsQuery>,
) -> ApiResult<Json<ComparisonsPayload>> {
    let weight = parse_param::<f64>("weight", query.weight.as_deref())?
        .ok_or_else(|| ApiError::BadRequest("weight is required".to_string()))?;
    let count = parse_param::<usize>("count", query.count.as_deref())?
        .map(clamp_comparison_count)
        .unwrap_or(state.config.comparison_count);
    let allowed = match query.categories.as_deref() {
        Some(raw) => parse_categories(raw),
        None => state.config.category_filter(),
    };

    Ok(Json(ComparisonsPayload {
        weight,
        comparisons: comparisons::select(weight, count, &allowed),
    }))
}

async fn categorize_name(Query(query): Query<CategorizeQuery>) -> ApiResult<Json<CategorizePayload>> {
    let name = query
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("name is required".to_string()))?;
    let category = categorizer::categorize(&name);

    Ok(Json(CategorizePayload {
        name,
        category,
        display_name: category.display_name(),
    }))
}

async fn achievement_list(
    State(state): State<ApiState>,
    Query(query): Query<AchievementsQuery>,
) -> ApiResult<Json<AchievementsPayload>> {
    let total_weight = match parse_param::<f64>("weight", query.weight.as_deref())? {
        Some(weight) => weight,
        None => {
            let database = Database::open(&state.config.db_path)?;
            achievements::lifetime_total(&database.all_workouts()?)
        }
    };

    let list = achievements::achievements(total_weight, &state.config.category_filter());

    Ok(Json(AchievementsPayload {
        total_weight,
        earned: list.iter().filter(|achievement| achievement.earned).count(),
        achievements: list,
    }))
}

async fn catalog_list() -> Json<Vec<CatalogEntry>> {
    Json(
        catalog()
            .iter()
            .map(|item| CatalogEntry {
                name: item.name,
                plural_name: item.plural_name,
                weight: item.weight,
                category: item.resolved_category(),
            })
            .collect(),
    )
}

async fn category_list() -> Json<Vec<CategoryView>> {
    Json(
        CategoryTag::ALL
            .iter()
            .map(|tag| CategoryView {
                tag: *tag,
                display_name: tag.display_name(),
            })
            .collect(),
    )
}

async fn report_list(
    State(state): State<ApiState>,
    Query(query): Query<ReportsQuery>,
) -> ApiResult<Json<ReportsPayload>> {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let database = Database::open(&state.config.db_path)?;
    let reports = database
        .list_reports(limit)?
        .into_iter()
        .map(|meta| ReportView {
            json_url: format!("/api/v1/report/{}", meta.period),
            markdown_url: format!("/api/v1/report/{}/markdown", meta.period),
            period: meta.period,
            window: meta.window,
            generated_at: meta.generated_at,
        })
        .collect::<Vec<_>>();

    Ok(Json(ReportsPayload { reports }))
}

async fn report_by_period(
    State(state): State<ApiState>,
    Path(period): Path<String>,
) -> ApiResult<Json<Value>> {
    let database = Database::open(&state.config.db_path)?;
    let meta = database
        .report_meta(&period)?
        .ok_or_else(|| ApiError::NotFound(format!("No report found for period: {period}")))?;

    let report = load_json(FsPath::new(&meta.json_path))?;
    Ok(Json(report))
}

async fn report_markdown(
    State(state): State<ApiState>,
    Path(period): Path<String>,
) -> ApiResult<Response> {
    let database = Database::open(&state.config.db_path)?;
    let meta = database
        .report_meta(&period)?
        .ok_or_else(|| ApiError::NotFound(format!("No report found for period: {period}")))?;

    let markdown = fs::read_to_string(&meta.md_path)
        .with_context(|| format!("Failed to read Markdown report: {}", meta.md_path))?;

    let mut response = Response::new(markdown.into_response().into_body());
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/markdown; charset=utf-8"),
    );

    Ok(response)
}

fn parse_param<T: FromStr>(name: &str, raw: Option<&str>) -> ApiResult<Option<T>> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid {name}: {value}")))
        })
        .transpose()
}

fn parse_categories(raw: &str) -> Vec<CategoryTag> {
    let parts = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();

    categorizer::parse_category_list(&parts)
}

fn load_json(path: &FsPath) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report JSON file: {}", path.display()))?;

    let payload = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse report JSON file: {}", path.display()))?;

    Ok(payload)
}

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("{error:#}") })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::wrapped::FixedClock;
    use crate::workout::parse_workouts;
    use chrono::{TimeZone, Utc};

    fn state_in(dir: &std::path::Path) -> ApiState {
        ApiState {
            config: Arc::new(Config {
                db_path: dir.join("workouts.db"),
                report_dir: dir.join("reports"),
                ..Config::default()
            }),
        }
    }

    fn seed(state: &ApiState) {
        let history = parse_workouts(
            r#"[
                {"performed_at": "2026-09-30T18:00:00Z", "day": "Legs", "total_weight": 400.0},
                {"performed_at": "2026-10-02T18:00:00Z", "day": "Push", "total_weight": 600.0}
            ]"#,
        )
        .expect("history");
        Database::open(&state.config.db_path)
            .expect("db")
            .insert_workouts(&history)
            .expect("insert");
    }

    fn comparisons_query(weight: &str, count: Option<&str>, categories: Option<&str>) -> ComparisonsQuery {
        ComparisonsQuery {
            weight: Some(weight.to_string()),
            count: count.map(ToOwned::to_owned),
            categories: categories.map(ToOwned::to_owned),
        }
    }

    #[tokio::test]
    async fn status_reports_store_contents() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = state_in(dir.path());
        seed(&state);

        let Json(payload) = status(State(state)).await.expect("status");
        assert_eq!(payload.workouts, 2);
        assert_eq!(
            payload.latest_workout_at.as_deref(),
            Some("2026-10-02T18:00:00+00:00")
        );
        assert!(payload.latest_report_period.is_none());
    }

    #[tokio::test]
    async fn comparisons_use_query_parameters() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = state_in(dir.path());

        let Json(payload) = comparison_list(
            State(state),
            Query(comparisons_query("1000", Some("3"), Some("people"))),
        )
        .await
        .expect("comparisons");

        assert_eq!(payload.comparisons.len(), 3);
        assert!(
            payload
                .comparisons
                .iter()
                .all(|comparison| comparison.category == CategoryTag::People)
        );
        let person = payload
            .comparisons
            .iter()
            .find(|comparison| comparison.name == "average person")
            .expect("average person selected");
        assert_eq!(person.multiple, 7);
        assert_eq!(person.label, "7 average persons");
    }

    #[tokio::test]
    async fn comparisons_reject_bad_weight() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = state_in(dir.path());

        let bad_weight = comparison_list(State(state), Query(comparisons_query("heavy", None, None)))
            .await
            .expect_err("bad weight");
        assert_eq!(bad_weight.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn comparisons_drop_unknown_categories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = state_in(dir.path());

        let Json(payload) = comparison_list(
            State(state),
            Query(comparisons_query("1000", None, Some("people,unicorns"))),
        )
        .await
        .expect("unknown tag is dropped");

        assert!(!payload.comparisons.is_empty());
        assert!(
            payload
                .comparisons
                .iter()
                .all(|comparison| comparison.category == CategoryTag::People)
        );
    }

    #[tokio::test]
    async fn categorize_requires_a_name() {
        let Json(payload) = categorize_name(Query(CategorizeQuery {
            name: Some(" Chewbacca ".to_string()),
        }))
        .await
        .expect("categorized");
        assert_eq!(payload.name, "Chewbacca");
        assert_eq!(payload.category, CategoryTag::StarWars);

        let missing = categorize_name(Query(CategorizeQuery { name: None }))
            .await
            .expect_err("missing name");
        assert_eq!(missing.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn achievements_default_to_lifetime_total() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = state_in(dir.path());
        seed(&state);

        let Json(payload) = achievement_list(State(state), Query(AchievementsQuery { weight: None }))
            .await
            .expect("achievements");

        assert_eq!(payload.total_weight, 1000.0);
        assert_eq!(payload.achievements.len(), catalog().len());
        assert!(payload.earned > 0);
    }

    #[tokio::test]
    async fn catalog_lists_resolved_categories() {
        let Json(entries) = catalog_list().await;
        assert_eq!(entries.len(), catalog().len());
        assert!(
            entries
                .iter()
                .any(|entry| entry.name == "average person" && entry.category == CategoryTag::People)
        );
    }

    #[tokio::test]
    async fn categories_are_listed_in_order() {
        let Json(categories) = category_list().await;
        assert_eq!(categories.len(), CategoryTag::ALL.len());
        assert_eq!(categories[0].tag, CategoryTag::ALL[0]);
    }

    #[tokio::test]
    async fn missing_report_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = state_in(dir.path());

        let error = report_by_period(State(state), Path("2026".to_string()))
            .await
            .expect_err("no report");
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_window_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = state_in(dir.path());

        let error = wrapped_stats(
            State(state),
            Query(WrappedQuery {
                window: Some("decade".to_string()),
            }),
        )
        .await
        .expect_err("bad window");
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn snapshot_reads_history_from_store() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = state_in(dir.path());
        seed(&state);

        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap());
        let month = wrapped_snapshot(&state.config, Window::Month, &clock).expect("month");
        let year = wrapped_snapshot(&state.config, Window::Year, &clock).expect("year");

        assert_eq!(month.total_workouts, 1);
        assert_eq!(year.total_workouts, 2);
        assert_eq!(year.total_weight_lifted, 1000.0);
    }
}
