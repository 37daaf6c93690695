use std::{collections::HashMap, hash::Hash};

use jiff::{civil::Date, tz::TimeZone};

use crate::models::{Cinema, Movie, Scheduled, Showtime, ShowtimeWithCinema, ShowtimeWithMovie};

#[derive(Clone, Debug, PartialEq)]
pub struct DayGroup<T> {
    pub date: Date,
    pub showtimes: Vec<T>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CinemaGroup {
    pub cinema: Cinema,
    pub showtimes: Vec<Showtime>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieGroup {
    pub movie: Movie,
    pub showtimes: Vec<Showtime>,
}

/// Groups come out in the order their key is first seen, and each group keeps
/// the relative order of its items.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let k = key(&item);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            },
        }
    }

    groups
}

/// Groups by calendar date of the start time as seen in `tz`.
pub fn group_by_date<T: Scheduled>(
    showtimes: Vec<T>,
    tz: &TimeZone,
) -> Result<Vec<DayGroup<T>>, jiff::Error> {
    let dated = showtimes
        .into_iter()
        .map(|s| {
            let date = s.showtime().starts_at()?.to_zoned(tz.clone()).date();
            Ok((date, s))
        })
        .collect::<Result<Vec<_>, jiff::Error>>()?;

    Ok(group_by(dated, |(date, _)| *date)
        .into_iter()
        .map(|(date, items)| DayGroup {
            date,
            showtimes: items.into_iter().map(|(_, s)| s).collect(),
        })
        .collect())
}

pub fn group_by_cinema(rows: Vec<ShowtimeWithCinema>) -> Vec<CinemaGroup> {
    group_by(rows, |r| r.cinema.id)
        .into_iter()
        .filter_map(|(_, rows)| {
            let cinema = rows.first()?.cinema.clone();
            Some(CinemaGroup { cinema, showtimes: rows.into_iter().map(|r| r.showtime).collect() })
        })
        .collect()
}

pub fn group_by_movie(rows: Vec<ShowtimeWithMovie>) -> Vec<MovieGroup> {
    group_by(rows, |r| r.movie.id)
        .into_iter()
        .filter_map(|(_, rows)| {
            let movie = rows.first()?.movie.clone();
            Some(MovieGroup { movie, showtimes: rows.into_iter().map(|r| r.showtime).collect() })
        })
        .collect()
}
