use rand::rng;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;

use crate::progress::ProgressService;
use rack_core::{LexicalSearch, ScoringEngine, SearchOptions, filter_results, generate_settings, local_today};
use rack_types::{
    ChallengeSubmission, Difficulty, GameMode, Language, Rack, ScoreMode, SearchStatus, SortStrategy,
    WordResult,
};

pub mod config;
pub mod progress;
pub mod sources;

#[derive(Debug, Deserialize)]
struct SearchQuery {
    letters: String,
    language: Option<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    sort: Option<String>,
    filter: Option<String>,
    scoring: Option<ScoreMode>,
}

#[derive(Debug, Deserialize)]
struct ModeQuery {
    difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub letters: String,
    pub status: SearchStatus,
    pub degraded: bool,
    pub failed_sources: Vec<String>,
    pub total: usize,
    pub average_score: Option<f64>,
    pub words: Vec<WordResult>,
}

type JsonReply = warp::reply::WithStatus<warp::reply::Json>;

fn json_reply<T: Serialize>(value: &T, status: StatusCode) -> JsonReply {
    warp::reply::with_status(warp::reply::json(value), status)
}

fn error_reply(message: impl Into<String>, status: StatusCode) -> JsonReply {
    json_reply(&serde_json::json!({ "error": message.into() }), status)
}

fn with_shared<T: Send + Sync + 'static>(
    value: Arc<T>,
) -> impl Filter<Extract = (Arc<T>,), Error = Infallible> + Clone {
    warp::any().map(move || value.clone())
}

/// All HTTP routes. `defaults` supplies the length bounds a search uses when the
/// query leaves them out.
pub fn create_routes(
    search: Arc<LexicalSearch>,
    progress: Arc<ProgressService>,
    defaults: SearchOptions,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let defaults_filter = warp::any().map(move || defaults);

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let search_route = warp::path("search")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<SearchQuery>())
        .and(with_shared(search))
        .and(defaults_filter)
        .and_then(handle_search_request);

    let daily = warp::path("daily")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_shared(progress.clone()))
        .and_then(handle_daily_request);

    let daily_submit = warp::path!("daily" / "submit")
        .and(warp::post())
        .and(warp::body::json::<ChallengeSubmission>())
        .and(with_shared(progress.clone()))
        .and_then(handle_daily_submit);

    let achievements = warp::path("achievements")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_shared(progress.clone()))
        .and_then(handle_achievements_request);

    let achievements_reset = warp::path!("achievements" / "reset")
        .and(warp::post())
        .and(with_shared(progress.clone()))
        .and_then(handle_achievements_reset);

    let stats = warp::path("stats")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_shared(progress))
        .and_then(handle_stats_request);

    let modes = warp::path!("modes" / String)
        .and(warp::get())
        .and(warp::query::<ModeQuery>())
        .and_then(handle_mode_request);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(search_route)
        .or(daily)
        .or(daily_submit)
        .or(achievements)
        .or(achievements_reset)
        .or(stats)
        .or(modes)
        .with(cors)
        .with(warp::log("word_master"))
}

async fn handle_search_request(
    query: SearchQuery,
    search: Arc<LexicalSearch>,
    defaults: SearchOptions,
) -> Result<impl warp::Reply, warp::Rejection> {
    let rack = match Rack::parse(&query.letters) {
        Ok(rack) => rack,
        Err(e) => return Ok(error_reply(e.to_string(), StatusCode::BAD_REQUEST)),
    };

    let language = match query.language.as_deref().map(str::parse::<Language>) {
        None => defaults.language,
        Some(Ok(language)) => language,
        Some(Err(e)) => return Ok(error_reply(e, StatusCode::BAD_REQUEST)),
    };

    let sort = match query.sort.as_deref().map(str::parse::<SortStrategy>) {
        None => None,
        Some(Ok(strategy)) => Some(strategy),
        Some(Err(e)) => return Ok(error_reply(e, StatusCode::BAD_REQUEST)),
    };

    let options = SearchOptions {
        language,
        min_length: query.min_length.unwrap_or(defaults.min_length),
        max_length: query.max_length.unwrap_or(defaults.max_length),
        score_mode: query.scoring.unwrap_or(defaults.score_mode),
    };
    if options.min_length > options.max_length {
        return Ok(error_reply(
            "min_length must not exceed max_length",
            StatusCode::BAD_REQUEST,
        ));
    }

    let outcome = search.search(&rack, &options).await;

    let mut words = match query.filter.as_deref() {
        Some(filter) => filter_results(&outcome.words, filter),
        None => outcome.words.clone(),
    };
    if let Some(strategy) = sort {
        ScoringEngine::sort_results(&mut words, strategy);
    }

    let response = SearchResponse {
        letters: rack.to_string(),
        status: outcome.status,
        degraded: outcome.is_degraded(),
        failed_sources: outcome.failed_sources,
        total: words.len(),
        average_score: ScoringEngine::average_score(&words),
        words,
    };
    Ok(json_reply(&response, StatusCode::OK))
}

async fn handle_daily_request(
    progress: Arc<ProgressService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match progress.daily_summary(local_today()).await {
        Ok(summary) => Ok(json_reply(&summary, StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to load daily challenge: {}", err);
            Ok(error_reply(
                "Failed to load daily challenge",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_daily_submit(
    submission: ChallengeSubmission,
    progress: Arc<ProgressService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match progress
        .submit_daily(local_today(), submission, chrono::Utc::now())
        .await
    {
        Ok(outcome) => Ok(json_reply(&outcome, StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to record daily submission: {}", err);
            Ok(error_reply(
                "Failed to record submission",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_achievements_request(
    progress: Arc<ProgressService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match progress.achievements(local_today()).await {
        Ok(overview) => Ok(json_reply(&overview, StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to load achievements: {}", err);
            Ok(error_reply(
                "Failed to load achievements",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_achievements_reset(
    progress: Arc<ProgressService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match progress.reset_achievements().await {
        Ok(achievements) => Ok(json_reply(&achievements, StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to reset achievements: {}", err);
            Ok(error_reply(
                "Failed to reset achievements",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_stats_request(
    progress: Arc<ProgressService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match progress.stats().await {
        Ok(stats) => Ok(json_reply(&stats, StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to load stats: {}", err);
            Ok(error_reply(
                "Failed to load stats",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_mode_request(
    mode: String,
    query: ModeQuery,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mode = match mode.parse::<GameMode>() {
        Ok(mode) => mode,
        Err(e) => return Ok(error_reply(e, StatusCode::NOT_FOUND)),
    };
    let difficulty = match query.difficulty.as_deref().map(str::parse::<Difficulty>) {
        None => Difficulty::default(),
        Some(Ok(difficulty)) => difficulty,
        Some(Err(e)) => return Ok(error_reply(e, StatusCode::BAD_REQUEST)),
    };

    let settings = generate_settings(mode, difficulty, &mut rng());
    Ok(json_reply(&settings, StatusCode::OK))
}
