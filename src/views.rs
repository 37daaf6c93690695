use jiff::{civil::Date, tz::TimeZone};
use serde::Serialize;

use crate::{
    format,
    grouping::{self, DayGroup},
    models::{
        Cinema, CinemaSummary, Movie, MovieSummary, Showtime, ShowtimeWithCinema, ShowtimeWithMovie,
    },
};

#[derive(Clone, Debug, Serialize)]
pub struct MovieCard {
    #[serde(flatten)]
    pub movie: Movie,
    pub slug: String,
    pub duration: String,
    pub rating_label: String,
}

impl From<Movie> for MovieCard {
    fn from(movie: Movie) -> Self {
        Self {
            slug: format::slugify(&movie.title),
            duration: format::format_duration(movie.duration_minutes),
            rating_label: format::format_rating(movie.rating),
            movie,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CinemaCard {
    #[serde(flatten)]
    pub cinema: Cinema,
    pub slug: String,
    pub display_location: Option<String>,
}

impl From<Cinema> for CinemaCard {
    fn from(cinema: Cinema) -> Self {
        Self {
            slug: format::slugify(&cinema.name),
            display_location: cinema.display_location().map(str::to_string),
            cinema,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct IndexEntry {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<MovieSummary> for IndexEntry {
    fn from(m: MovieSummary) -> Self {
        Self { id: m.id, slug: format::slugify(&m.title), name: m.title }
    }
}

impl From<CinemaSummary> for IndexEntry {
    fn from(c: CinemaSummary) -> Self {
        Self { id: c.id, slug: format::slugify(&c.name), name: c.name }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ShowtimeSlot {
    pub id: i64,
    pub start_time: String,
    pub time: String,
    pub screen_type: String,
    pub movie_url: Option<String>,
}

impl ShowtimeSlot {
    fn new(showtime: Showtime, tz: &TimeZone) -> Result<Self, jiff::Error> {
        let at = showtime.starts_at()?.to_zoned(tz.clone());
        Ok(Self {
            id: showtime.id,
            time: format::format_showtime(&at),
            start_time: showtime.start_time,
            screen_type: showtime.screen_type,
            movie_url: showtime.movie_url,
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DayLabels {
    pub date: Date,
    pub short: String,
    pub full: String,
    pub weekday: String,
    pub day: String,
    pub month: String,
}

impl From<Date> for DayLabels {
    fn from(date: Date) -> Self {
        Self {
            date,
            short: format::format_date(date),
            full: format::format_full_date(date),
            weekday: format::format_day_short(date),
            day: format::format_day_num(date),
            month: format::format_month_short(date),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieDay {
    #[serde(flatten)]
    pub labels: DayLabels,
    pub cinemas: Vec<CinemaSlots>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CinemaSlots {
    pub cinema: CinemaCard,
    pub showtimes: Vec<ShowtimeSlot>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieDetail {
    pub movie: MovieCard,
    pub days: Vec<MovieDay>,
}

impl MovieDetail {
    pub fn new(
        movie: Movie,
        showtimes: Vec<ShowtimeWithCinema>,
        tz: &TimeZone,
    ) -> Result<Self, jiff::Error> {
        let days = grouping::group_by_date(showtimes, tz)?
            .into_iter()
            .map(|DayGroup { date, showtimes }| {
                let cinemas = grouping::group_by_cinema(showtimes)
                    .into_iter()
                    .map(|group| {
                        Ok(CinemaSlots {
                            cinema: group.cinema.into(),
                            showtimes: slots(group.showtimes, tz)?,
                        })
                    })
                    .collect::<Result<_, jiff::Error>>()?;
                Ok(MovieDay { labels: date.into(), cinemas })
            })
            .collect::<Result<_, jiff::Error>>()?;

        Ok(Self { movie: movie.into(), days })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CinemaDay {
    #[serde(flatten)]
    pub labels: DayLabels,
    pub movies: Vec<MovieSlots>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieSlots {
    pub movie: MovieCard,
    pub showtimes: Vec<ShowtimeSlot>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CinemaDetail {
    pub cinema: CinemaCard,
    pub days: Vec<CinemaDay>,
}

impl CinemaDetail {
    pub fn new(
        cinema: Cinema,
        showtimes: Vec<ShowtimeWithMovie>,
        tz: &TimeZone,
    ) -> Result<Self, jiff::Error> {
        let days = grouping::group_by_date(showtimes, tz)?
            .into_iter()
            .map(|DayGroup { date, showtimes }| {
                let movies = grouping::group_by_movie(showtimes)
                    .into_iter()
                    .map(|group| {
                        Ok(MovieSlots {
                            movie: group.movie.into(),
                            showtimes: slots(group.showtimes, tz)?,
                        })
                    })
                    .collect::<Result<_, jiff::Error>>()?;
                Ok(CinemaDay { labels: date.into(), movies })
            })
            .collect::<Result<_, jiff::Error>>()?;

        Ok(Self { cinema: cinema.into(), days })
    }
}

fn slots(showtimes: Vec<Showtime>, tz: &TimeZone) -> Result<Vec<ShowtimeSlot>, jiff::Error> {
    showtimes.into_iter().map(|s| ShowtimeSlot::new(s, tz)).collect()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            description: None,
            release_year: Some(2024),
            duration_minutes: Some(148),
            rating: Some(8.0),
            poster_url: None,
            metacritic_rating: None,
            rotten_tomatoes_rating: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn cinema(id: i64, name: &str) -> Cinema {
        Cinema {
            id,
            name: name.to_string(),
            location: Some("VI".to_string()),
            verbose_location: None,
            address: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn showtime(id: i64, movie_id: i64, cinema_id: i64, start: &str) -> Showtime {
        Showtime {
            id,
            movie_id,
            cinema_id,
            start_time: start.to_string(),
            screen_type: "IMAX".to_string(),
            movie_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn movie_card_carries_labels() {
        let card = MovieCard::from(movie(1, "Dune: Part Two"));
        assert_eq!(card.slug, "dune-part-two");
        assert_eq!(card.duration, "2h 28m");
        assert_eq!(card.rating_label, "8.0");

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["title"], "Dune: Part Two");
        assert_eq!(value["slug"], "dune-part-two");
        assert_eq!(value["rating"], 8.0);
    }

    #[test]
    fn cinema_card_uses_display_location() {
        let card = CinemaCard::from(cinema(1, "Ebonylife Cinemas"));
        assert_eq!(card.slug, "ebonylife-cinemas");
        assert_eq!(card.display_location.as_deref(), Some("VI"));
    }

    #[test]
    fn day_labels() {
        let labels = DayLabels::from(date(2025, 1, 3));
        let value = serde_json::to_value(&labels).unwrap();
        assert_eq!(value["date"], "2025-01-03");
        assert_eq!(value["short"], "Fri, Jan 3");
        assert_eq!(value["full"], "Friday, January 3, 2025");
        assert_eq!(value["weekday"], "Fri");
        assert_eq!(value["day"], "3");
        assert_eq!(value["month"], "Jan");
    }

    #[test]
    fn movie_detail_groups_by_day_then_cinema() {
        let a = cinema(1, "Filmhouse Lekki");
        let b = cinema(2, "Genesis Maryland");
        let rows = vec![
            ShowtimeWithCinema { showtime: showtime(1, 1, 2, "2025-01-02T12:00:00+00:00"), cinema: b.clone() },
            ShowtimeWithCinema { showtime: showtime(2, 1, 1, "2025-01-02T15:00:00+00:00"), cinema: a.clone() },
            ShowtimeWithCinema { showtime: showtime(3, 1, 2, "2025-01-02T18:00:00+00:00"), cinema: b },
            ShowtimeWithCinema { showtime: showtime(4, 1, 1, "2025-01-03T12:00:00+00:00"), cinema: a },
        ];

        let detail = MovieDetail::new(movie(1, "Dune"), rows, &TimeZone::UTC).unwrap();

        assert_eq!(detail.days.len(), 2);
        let first = &detail.days[0];
        assert_eq!(first.labels.short, "Thu, Jan 2");
        let names: Vec<&str> = first.cinemas.iter().map(|c| c.cinema.cinema.name.as_str()).collect();
        assert_eq!(names, vec!["Genesis Maryland", "Filmhouse Lekki"]);
        let times: Vec<&str> = first.cinemas[0].showtimes.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["12:00 PM", "6:00 PM"]);
        assert_eq!(detail.days[1].cinemas.len(), 1);
    }

    #[test]
    fn cinema_detail_groups_by_day_then_movie() {
        let lagos = TimeZone::get("Africa/Lagos").unwrap();
        let rows = vec![
            ShowtimeWithMovie { showtime: showtime(1, 7, 1, "2025-01-02T16:00:00+00:00"), movie: movie(7, "Moana 2") },
            ShowtimeWithMovie { showtime: showtime(2, 8, 1, "2025-01-02T17:00:00+00:00"), movie: movie(8, "Wicked") },
            ShowtimeWithMovie { showtime: showtime(3, 7, 1, "2025-01-02T19:00:00+00:00"), movie: movie(7, "Moana 2") },
        ];

        let detail = CinemaDetail::new(cinema(1, "Filmhouse Lekki"), rows, &lagos).unwrap();

        assert_eq!(detail.days.len(), 1);
        let movies = &detail.days[0].movies;
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].movie.slug, "moana-2");
        let times: Vec<&str> = movies[0].showtimes.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["5:00 PM", "8:00 PM"]);
    }

    #[test]
    fn empty_showtimes_give_no_days() {
        let detail = MovieDetail::new(movie(1, "Dune"), Vec::new(), &TimeZone::UTC).unwrap();
        assert!(detail.days.is_empty());
        assert_eq!(detail.movie.slug, "dune");
    }
}
