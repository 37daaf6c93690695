use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    #[serde(default)]
    pub metacritic_rating: Option<f64>,
    #[serde(default)]
    pub rotten_tomatoes_rating: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Cinema {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub location: Option<String>,
    #[serde(default)]
    pub verbose_location: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Cinema {
    /// The verbose location when set, otherwise the short one.
    pub fn display_location(&self) -> Option<&str> {
        self.verbose_location
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.location.as_deref().filter(|s| !s.is_empty()))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Showtime {
    pub id: i64,
    pub movie_id: i64,
    pub cinema_id: i64,
    /// ISO-8601 instant exactly as the database returned it.
    pub start_time: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub screen_type: String,
    pub movie_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Showtime {
    pub fn starts_at(&self) -> Result<Timestamp, jiff::Error> {
        self.start_time.parse()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ShowtimeWithCinema {
    #[serde(flatten)]
    pub showtime: Showtime,
    pub cinema: Cinema,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ShowtimeWithMovie {
    #[serde(flatten)]
    pub showtime: Showtime,
    pub movie: Movie,
}

/// A movie row joined with the start times of its upcoming showtimes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MovieWithShowtimes {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub showtimes: Vec<ShowtimeStart>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ShowtimeStart {
    pub start_time: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MovieSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CinemaSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Anything that carries a showtime, bare or with a joined record.
pub trait Scheduled {
    fn showtime(&self) -> &Showtime;
}

impl Scheduled for Showtime {
    fn showtime(&self) -> &Showtime {
        self
    }
}

impl Scheduled for ShowtimeWithCinema {
    fn showtime(&self) -> &Showtime {
        &self.showtime
    }
}

impl Scheduled for ShowtimeWithMovie {
    fn showtime(&self) -> &Showtime {
        &self.showtime
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
