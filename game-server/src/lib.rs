use std::path::PathBuf;

use warp::Filter;
use warp::http::StatusCode;

use crate::artifact::read_artifact;
use crate::config::Config;
use game_core::ArtifactError;

pub mod artifact;
pub mod config;
pub mod dictionary;
pub mod generator;

pub fn create_routes(
    config: &Config,
) -> impl Filter<Extract = impl warp::Reply + use<>, Error = warp::Rejection> + Clone + use<> {
    let artifact_path_filter = warp::any().map({
        let artifact_path = config.daily_artifact_path.clone();
        move || artifact_path.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // Re-read on every request so a freshly generated artifact is served without a restart
    let daily_word = warp::path("daily-word.json")
        .and(warp::path::end())
        .and(warp::get())
        .and(artifact_path_filter)
        .and_then(handle_daily_word_request);

    let words = warp::path("words.txt")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::fs::file(config.word_list_path.clone()));

    let static_files = warp::get().and(warp::fs::dir(config.public_dir.clone()));

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET"]);

    health
        .or(daily_word)
        .or(words)
        .or(static_files)
        .with(cors)
        .with(warp::log("dictionarydle"))
}

async fn handle_daily_word_request(
    artifact_path: PathBuf,
) -> Result<impl warp::Reply, warp::Rejection> {
    let (body, status) = match read_artifact(&artifact_path).await {
        Ok(artifact) => (warp::reply::json(&artifact), StatusCode::OK),
        Err(ArtifactError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => (
            warp::reply::json(&serde_json::json!({
                "error": "Daily word has not been generated yet"
            })),
            StatusCode::NOT_FOUND,
        ),
        Err(err) => {
            tracing::error!(
                "Failed to read daily artifact {}: {}",
                artifact_path.display(),
                err
            );
            (
                warp::reply::json(&serde_json::json!({
                    "error": "Daily word is unavailable"
                })),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    };

    Ok(warp::reply::with_header(
        warp::reply::with_status(body, status),
        "cache-control",
        "no-cache",
    ))
}
