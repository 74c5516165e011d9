//! Fixed genre tables, so cards can label genres without a round trip.

use crate::media_kind::MediaKind;

pub const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

pub const TV_GENRES: &[(u32, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

fn table(kind: MediaKind) -> &'static [(u32, &'static str)] {
    match kind {
        MediaKind::Movie => MOVIE_GENRES,
        // shows and anything else use the TV table
        _ => TV_GENRES,
    }
}

pub fn genre_name(id: u32, kind: MediaKind) -> Option<&'static str> {
    table(kind)
        .iter()
        .find_map(|(gid, name)| (*gid == id).then_some(*name))
}

/// Names for the known ids, in input order; unknown ids are dropped.
pub fn genre_names(ids: &[u32], kind: MediaKind) -> Vec<&'static str> {
    ids.iter().filter_map(|id| genre_name(*id, kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_are_dropped() {
        assert_eq!(
            genre_names(&[28, 1, 878], MediaKind::Movie),
            vec!["Action", "Science Fiction"]
        );
    }

    #[test]
    fn tv_table_differs_from_movie_table() {
        assert_eq!(genre_name(10765, MediaKind::Tv), Some("Sci-Fi & Fantasy"));
        assert_eq!(genre_name(10765, MediaKind::Movie), None);
        assert_eq!(genre_name(10759, MediaKind::Person), Some("Action & Adventure"));
    }
}
