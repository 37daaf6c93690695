use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use jiff::Timestamp;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    models::{
        Cinema, CinemaSummary, Movie, MovieSummary, MovieWithShowtimes, ShowtimeWithCinema,
        ShowtimeWithMovie,
    },
    ranking,
};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("database request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("expected exactly one {table} row with id {id}, found {found}")]
    NotFound { table: &'static str, id: i64, found: usize },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read-only client for the listings tables, spoken over the database's
/// PostgREST interface.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl CatalogClient {
    pub fn new(client: reqwest::Client, base_url: String, anon_key: String, rps: u32) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN));
        let limiter = Arc::new(RateLimiter::direct(quota));
        Self { client, base_url, anon_key, limiter }
    }

    /// Movies with at least one showtime from now on, soonest first.
    pub async fn now_showing_movies(&self) -> CatalogResult<Vec<Movie>> {
        self.now_showing_movies_at(Timestamp::now()).await
    }

    pub async fn now_showing_movies_at(&self, now: Timestamp) -> CatalogResult<Vec<Movie>> {
        let rows: Vec<MovieWithShowtimes> = self
            .select(
                "movies",
                &[
                    ("select", "*,showtimes!inner(start_time)".to_string()),
                    ("showtimes.start_time", format!("gte.{now}")),
                ],
            )
            .await?;

        Ok(ranking::rank_now_showing(rows))
    }

    pub async fn movie_by_id(&self, id: i64) -> CatalogResult<Movie> {
        let rows = self
            .select("movies", &[("select", "*".to_string()), ("id", format!("eq.{id}"))])
            .await?;
        exactly_one("movies", id, rows)
    }

    pub async fn all_movies(&self) -> CatalogResult<Vec<Movie>> {
        self.select("movies", &[("select", "*".to_string()), ("order", "title.asc".to_string())])
            .await
    }

    pub async fn showtimes_for_movie(&self, movie_id: i64) -> CatalogResult<Vec<ShowtimeWithCinema>> {
        self.showtimes_for_movie_at(movie_id, Timestamp::now()).await
    }

    pub async fn showtimes_for_movie_at(
        &self,
        movie_id: i64,
        now: Timestamp,
    ) -> CatalogResult<Vec<ShowtimeWithCinema>> {
        self.select(
            "showtimes",
            &[
                ("select", "*,cinema:cinemas(*)".to_string()),
                ("movie_id", format!("eq.{movie_id}")),
                ("start_time", format!("gte.{now}")),
                ("order", "start_time.asc".to_string()),
            ],
        )
        .await
    }

    pub async fn all_cinemas(&self) -> CatalogResult<Vec<Cinema>> {
        self.select("cinemas", &[("select", "*".to_string()), ("order", "name.asc".to_string())])
            .await
    }

    pub async fn cinema_by_id(&self, id: i64) -> CatalogResult<Cinema> {
        let rows = self
            .select("cinemas", &[("select", "*".to_string()), ("id", format!("eq.{id}"))])
            .await?;
        exactly_one("cinemas", id, rows)
    }

    pub async fn showtimes_for_cinema(
        &self,
        cinema_id: i64,
    ) -> CatalogResult<Vec<ShowtimeWithMovie>> {
        self.showtimes_for_cinema_at(cinema_id, Timestamp::now()).await
    }

    pub async fn showtimes_for_cinema_at(
        &self,
        cinema_id: i64,
        now: Timestamp,
    ) -> CatalogResult<Vec<ShowtimeWithMovie>> {
        self.select(
            "showtimes",
            &[
                ("select", "*,movie:movies(*)".to_string()),
                ("cinema_id", format!("eq.{cinema_id}")),
                ("start_time", format!("gte.{now}")),
                ("order", "start_time.asc".to_string()),
            ],
        )
        .await
    }

    pub async fn movie_ids(&self) -> CatalogResult<Vec<MovieSummary>> {
        self.select("movies", &[("select", "id,title".to_string())]).await
    }

    pub async fn cinema_ids(&self) -> CatalogResult<Vec<CinemaSummary>> {
        self.select("cinemas", &[("select", "id,name".to_string())]).await
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, String)],
    ) -> CatalogResult<Vec<T>> {
        self.limiter.until_ready().await;

        let url = format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table);
        debug!(table, query = ?query, "querying");

        let rows: Vec<T> = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(table, rows = rows.len(), "query returned");
        Ok(rows)
    }
}

fn exactly_one<T>(table: &'static str, id: i64, mut rows: Vec<T>) -> CatalogResult<T> {
    match rows.len() {
        1 => Ok(rows.remove(0)),
        found => Err(CatalogError::NotFound { table, id, found }),
    }
}
