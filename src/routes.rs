use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    AppState,
    error::AppResult,
    views::{CinemaCard, CinemaDetail, IndexEntry, MovieCard, MovieDetail},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/now-showing", get(now_showing))
        .route("/api/movies", get(movies))
        .route("/api/movies/index", get(movie_index))
        .route("/api/movies/{id}", get(movie))
        .route("/api/cinemas", get(cinemas))
        .route("/api/cinemas/index", get(cinema_index))
        .route("/api/cinemas/{id}", get(cinema))
        .with_state(state)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn now_showing(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<MovieCard>>> {
    let movies = state.catalog.now_showing_movies().await?;
    Ok(Json(movies.into_iter().map(MovieCard::from).collect()))
}

pub async fn movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<MovieCard>>> {
    let movies = state.catalog.all_movies().await?;
    Ok(Json(movies.into_iter().map(MovieCard::from).collect()))
}

pub async fn movie_index(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<IndexEntry>>> {
    let movies = state.catalog.movie_ids().await?;
    Ok(Json(movies.into_iter().map(IndexEntry::from).collect()))
}

pub async fn movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<MovieDetail>> {
    let movie = state.catalog.movie_by_id(id).await?;
    let showtimes = state.catalog.showtimes_for_movie(id).await?;
    debug!(movie_id = id, showtimes = showtimes.len(), "building movie detail");

    Ok(Json(MovieDetail::new(movie, showtimes, &state.config.display_tz)?))
}

pub async fn cinemas(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<CinemaCard>>> {
    let cinemas = state.catalog.all_cinemas().await?;
    Ok(Json(cinemas.into_iter().map(CinemaCard::from).collect()))
}

pub async fn cinema_index(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<IndexEntry>>> {
    let cinemas = state.catalog.cinema_ids().await?;
    Ok(Json(cinemas.into_iter().map(IndexEntry::from).collect()))
}

pub async fn cinema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<CinemaDetail>> {
    let cinema = state.catalog.cinema_by_id(id).await?;
    let showtimes = state.catalog.showtimes_for_cinema(id).await?;
    debug!(cinema_id = id, showtimes = showtimes.len(), "building cinema detail");

    Ok(Json(CinemaDetail::new(cinema, showtimes, &state.config.display_tz)?))
}
