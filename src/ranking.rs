use tracing::debug;

use crate::models::{Movie, MovieWithShowtimes};

/// Orders movies by their earliest upcoming showtime, then by title.
///
/// Input rows are expected to carry only showtimes at or after the query's
/// "now". A movie with no such showtime is dropped rather than sorted last.
/// Both keys compare as plain strings: start times stay in the form the
/// database returned them, and titles are compared case-sensitively. The
/// sort is stable, so rows tied on both keys keep their input order.
pub fn rank_now_showing(rows: Vec<MovieWithShowtimes>) -> Vec<Movie> {
    let total = rows.len();

    let mut ranked: Vec<(String, Movie)> = rows
        .into_iter()
        .filter_map(|row| {
            let earliest = row.showtimes.into_iter().map(|s| s.start_time).min()?;
            Some((earliest, row.movie))
        })
        .collect();

    ranked.sort_by(|(a_start, a), (b_start, b)| {
        a_start.cmp(b_start).then_with(|| a.title.cmp(&b.title))
    });

    debug!(total, showing = ranked.len(), "ranked now showing movies");

    ranked.into_iter().map(|(_, movie)| movie).collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::models::ShowtimeStart;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            description: None,
            release_year: None,
            duration_minutes: None,
            rating: None,
            poster_url: None,
            metacritic_rating: None,
            rotten_tomatoes_rating: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn row(id: i64, title: &str, starts: &[&str]) -> MovieWithShowtimes {
        MovieWithShowtimes {
            movie: movie(id, title),
            showtimes: starts
                .iter()
                .map(|s| ShowtimeStart { start_time: s.to_string() })
                .collect(),
        }
    }

    fn ids(movies: &[Movie]) -> Vec<i64> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn earliest_showtime_wins_and_empty_sets_are_dropped() {
        let ranked = rank_now_showing(vec![
            row(1, "M1", &["2025-01-03T18:00:00+00:00", "2025-01-02T10:00:00+00:00"]),
            row(2, "M2", &["2025-01-01T09:00:00+00:00"]),
            row(3, "M3", &[]),
        ]);

        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn title_breaks_ties() {
        let ranked = rank_now_showing(vec![
            row(4, "Zed", &["2025-01-01T09:00:00+00:00"]),
            row(5, "Alpha", &["2025-01-01T09:00:00+00:00"]),
        ]);

        let titles: Vec<&str> = ranked.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Zed"]);
    }

    #[test]
    fn title_comparison_is_case_sensitive() {
        let ranked = rank_now_showing(vec![
            row(1, "alpha", &["2025-01-01T09:00:00+00:00"]),
            row(2, "Zed", &["2025-01-01T09:00:00+00:00"]),
        ]);

        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let ranked = rank_now_showing(vec![
            row(7, "Same", &["2025-01-01T09:00:00+00:00"]),
            row(3, "Same", &["2025-01-01T09:00:00+00:00"]),
            row(5, "Same", &["2025-01-01T09:00:00+00:00"]),
        ]);

        assert_eq!(ids(&ranked), vec![7, 3, 5]);
    }

    fn arb_rows() -> impl Strategy<Value = Vec<MovieWithShowtimes>> {
        let start = (1u32..=28, 0u32..24).prop_map(|(d, h)| format!("2025-01-{d:02}T{h:02}:00:00+00:00"));
        let entry = ("[A-Za-z ]{0,6}", prop::collection::vec(start, 0..4));
        prop::collection::vec(entry, 0..12).prop_map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (title, starts))| {
                    let starts: Vec<&str> = starts.iter().map(String::as_str).collect();
                    row(i as i64, &title, &starts)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn output_is_exactly_the_movies_with_showtimes(rows in arb_rows()) {
            let mut expected: Vec<i64> =
                rows.iter().filter(|r| !r.showtimes.is_empty()).map(|r| r.movie.id).collect();
            let mut got = ids(&rank_now_showing(rows));
            expected.sort_unstable();
            got.sort_unstable();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn adjacent_pairs_are_ordered(rows in arb_rows()) {
            let earliest = |id: i64| {
                rows.iter()
                    .find(|r| r.movie.id == id)
                    .and_then(|r| r.showtimes.iter().map(|s| s.start_time.clone()).min())
                    .unwrap()
            };
            let ranked = rank_now_showing(rows.clone());
            for pair in ranked.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let (ea, eb) = (earliest(a.id), earliest(b.id));
                prop_assert!(ea < eb || (ea == eb && a.title <= b.title));
            }
        }

        #[test]
        fn ranking_is_deterministic(rows in arb_rows()) {
            prop_assert_eq!(rank_now_showing(rows.clone()), rank_now_showing(rows));
        }
    }
}
