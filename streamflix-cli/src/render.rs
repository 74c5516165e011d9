//! Plain-text rendering of the core view models.

use std::fmt::Write;

use streamflix_core::HeroSlide;
use streamflix_core::model::genres::genre_names;
use streamflix_core::model::{CatalogItem, FaqEntry, WatchlistEntry};
use streamflix_core::pages::{MovieView, PersonView, SearchSession, TvView};

const OVERVIEW_WIDTH: usize = 160;

fn clip(text: &str, width: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn year_suffix(year: Option<i32>) -> String {
    year.map(|y| format!(" ({y})")).unwrap_or_default()
}

fn item_line(index: usize, item: &CatalogItem) -> String {
    let rating = item
        .rating_label()
        .map(|r| format!("  ★ {r}"))
        .unwrap_or_default();
    let genres = genre_names(&item.genre_ids, item.kind());
    let genres = if genres.is_empty() {
        String::new()
    } else {
        format!("  {}", genres.iter().take(2).copied().collect::<Vec<_>>().join("/"))
    };
    format!(
        "{:>3}. {}{}{rating}{genres}  [{}] {}",
        index + 1,
        item.display_title(),
        year_suffix(item.year()),
        item.kind(),
        item.link_path(),
    )
}

/// Titled, numbered list of catalog items.
pub fn row(title: &str, items: &[CatalogItem]) -> String {
    let mut out = format!("== {title} ==\n");
    if items.is_empty() {
        out.push_str("  (nothing to show)\n");
    }
    for (i, item) in items.iter().enumerate() {
        out.push_str(&item_line(i, item));
        out.push('\n');
    }
    out
}

pub fn slide(slide: &HeroSlide) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}/{}] {}{}  {}",
        slide.index + 1,
        slide.total,
        slide.title,
        year_suffix(slide.year),
        slide.kind_label(),
    );
    if let Some(rating) = &slide.rating {
        let _ = writeln!(out, "  rating: {rating}");
    }
    let _ = writeln!(out, "  backdrop: {}", slide.backdrop_url);
    match &slide.preview {
        Some(preview) => {
            let sound = if preview.muted { "muted" } else { "sound on" };
            let _ = writeln!(out, "  trailer ({sound}): {}", preview.embed_url);
        }
        None => out.push_str("  trailer: -\n"),
    }
    let dots: String = slide
        .indicators
        .iter()
        .map(|i| if i.active { '●' } else { '○' })
        .collect();
    let _ = writeln!(out, "  {dots}  {}", slide.link);
    if !slide.overview.is_empty() {
        let _ = writeln!(out, "  {}", clip(&slide.overview, OVERVIEW_WIDTH));
    }
    out
}

fn cast_lines(out: &mut String, cast: &[streamflix_core::model::CastMember]) {
    if cast.is_empty() {
        return;
    }
    out.push_str("Cast:\n");
    for member in cast {
        match &member.character {
            Some(character) if !character.is_empty() => {
                let _ = writeln!(out, "  {} as {character}", member.name);
            }
            _ => {
                let _ = writeln!(out, "  {}", member.name);
            }
        }
    }
}

pub fn movie(view: &MovieView) -> String {
    let d = &view.details;
    let mut out = format!("{}{}\n", view.title(), year_suffix(view.year));
    if let Some(tagline) = d.tagline.as_deref().filter(|t| !t.is_empty()) {
        let _ = writeln!(out, "\"{tagline}\"");
    }
    if let Some(rating) = &view.rating {
        let _ = writeln!(out, "Rating: {rating}");
    }
    let directors: Vec<&str> = d
        .credits
        .iter()
        .flat_map(|credits| credits.directors())
        .map(|c| c.name.as_str())
        .collect();
    if !directors.is_empty() {
        let _ = writeln!(out, "Directed by: {}", directors.join(", "));
    }
    let _ = writeln!(out, "Released: {}", view.release_date);
    let _ = writeln!(out, "Runtime: {}", view.runtime);
    if !view.genres.is_empty() {
        let _ = writeln!(out, "Genres: {}", view.genres.join(", "));
    }
    if let Some(budget) = &view.budget {
        let _ = writeln!(out, "Budget: {budget}");
    }
    if let Some(revenue) = &view.revenue {
        let _ = writeln!(out, "Revenue: {revenue}");
    }
    if let Some(trailer) = &view.trailer_url {
        let _ = writeln!(out, "Trailer: {trailer}");
    }
    if let Some(overview) = d.overview.as_deref().filter(|o| !o.is_empty()) {
        let _ = writeln!(out, "\n{overview}\n");
    }
    cast_lines(&mut out, &view.cast);
    if !view.similar.is_empty() {
        out.push_str(&row("Similar", &view.similar));
    }
    out
}

pub fn tv(view: &TvView) -> String {
    let d = &view.details;
    let mut out = format!("{}{}\n", view.title(), year_suffix(view.year));
    if let Some(rating) = &view.rating {
        let _ = writeln!(out, "Rating: {rating}");
    }
    let _ = writeln!(out, "First aired: {}", view.first_air_date);
    let counts: Vec<&str> = [view.seasons.as_deref(), view.episodes.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !counts.is_empty() {
        let _ = writeln!(out, "{}", counts.join(" · "));
    }
    if let Some(network) = &view.network {
        let _ = writeln!(out, "Network: {network}");
    }
    if !view.creators.is_empty() {
        let _ = writeln!(out, "Created by: {}", view.creators.join(", "));
    }
    if !view.genres.is_empty() {
        let _ = writeln!(out, "Genres: {}", view.genres.join(", "));
    }
    if let Some(trailer) = &view.trailer_url {
        let _ = writeln!(out, "Trailer: {trailer}");
    }
    if let Some(overview) = d.overview.as_deref().filter(|o| !o.is_empty()) {
        let _ = writeln!(out, "\n{overview}\n");
    }
    cast_lines(&mut out, &view.cast);
    if !view.similar.is_empty() {
        out.push_str(&row("Similar", &view.similar));
    }
    out
}

pub fn person(view: &PersonView) -> String {
    let d = &view.details;
    let mut out = format!("{}\n", d.name);
    if let Some(department) = &d.known_for_department {
        let _ = writeln!(out, "Known for: {department}");
    }
    let _ = writeln!(out, "Born: {}", view.birthday);
    if let Some(place) = &d.place_of_birth {
        let _ = writeln!(out, "Place of birth: {place}");
    }
    let _ = writeln!(out, "Credits: {}", view.credit_count);
    if let Some(bio) = d.biography.as_deref().filter(|b| !b.is_empty()) {
        let _ = writeln!(out, "\n{}\n", clip(bio, OVERVIEW_WIDTH * 3));
    }
    if !view.known_for.is_empty() {
        out.push_str("== Known For ==\n");
        for (i, card) in view.known_for.iter().enumerate() {
            out.push_str(&item_line(i, &card.item));
            if let Some(character) = card.character.as_deref().filter(|c| !c.is_empty()) {
                let _ = write!(out, "  as {character}");
            }
            out.push('\n');
        }
    }
    out
}

pub fn search(session: &SearchSession) -> String {
    let title = format!(
        "Results for \"{}\" ({} of {})",
        session.query(),
        session.results().len(),
        session.total_results()
    );
    let mut out = row(&title, session.results());
    if session.has_more() {
        out.push_str("  … more available, pass --pages to load further\n");
    }
    out
}

pub fn watchlist(entries: &[WatchlistEntry]) -> String {
    let mut out = String::from("== My List ==\n");
    if entries.is_empty() {
        out.push_str("  Your list is empty.\n");
    }
    for (i, entry) in entries.iter().enumerate() {
        let rating = entry
            .vote_average
            .map(|v| format!("  ★ {v:.1}"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>3}. {}{rating}  {}",
            i + 1,
            entry.title,
            entry.link_path()
        );
    }
    out
}

pub fn faq(entries: &[FaqEntry]) -> String {
    if entries.is_empty() {
        return "No FAQs available.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "Q: {}\nA: {}\n", entry.question, entry.answer);
    }
    out
}

#[cfg(test)]
mod tests {
    use streamflix_core::ImageUrlBuilder;
    use streamflix_core::carousel::{Indicator, PreviewEmbed};
    use streamflix_core::model::{Credits, CrewMember, MediaKind, MovieDetails};

    use super::*;

    fn item(id: u64, title: &str) -> CatalogItem {
        CatalogItem {
            id,
            title: Some(title.into()),
            release_date: Some("1999-03-31".into()),
            vote_average: Some(8.2),
            ..Default::default()
        }
    }

    #[test]
    fn row_numbers_items_and_links() {
        let out = row("Trending", &[item(603, "The Matrix")]);
        assert_eq!(
            out,
            "== Trending ==\n  1. The Matrix (1999)  ★ 8.2  [movie] /movie/603\n"
        );
        assert!(row("Empty", &[]).contains("(nothing to show)"));

        let mut scifi = item(603, "The Matrix");
        scifi.genre_ids = vec![28, 878];
        assert!(item_line(0, &scifi).contains("★ 8.2  Action/Science Fiction  [movie]"));
    }

    #[test]
    fn slide_shows_trailer_and_indicators() {
        let slide = HeroSlide {
            index: 1,
            total: 3,
            title: "Dune".into(),
            rating: Some("7.8".into()),
            year: Some(2021),
            kind: MediaKind::Movie,
            overview: "Spice.".into(),
            backdrop_url: "https://image.tmdb.org/t/p/original/d.jpg".into(),
            has_backdrop: true,
            link: "/movie/1".into(),
            indicators: (0..3)
                .map(|index| Indicator {
                    index,
                    active: index == 1,
                })
                .collect(),
            preview: Some(PreviewEmbed {
                key: "y".into(),
                muted: true,
                embed_url: "https://www.youtube.com/embed/y".into(),
            }),
            show_mute_toggle: true,
            autoplay_active: true,
        };
        let out = super::slide(&slide);
        assert!(out.starts_with("[2/3] Dune (2021)  movie\n"));
        assert!(out.contains("trailer (muted): https://www.youtube.com/embed/y"));
        assert!(out.contains("○●○  /movie/1"));
    }

    #[test]
    fn movie_lists_directors_from_crew() {
        let crew = |name: &str, job: &str| CrewMember {
            name: name.into(),
            job: Some(job.into()),
            ..Default::default()
        };
        let details = MovieDetails {
            id: 603,
            title: "The Matrix".into(),
            release_date: Some("1999-03-31".into()),
            credits: Some(Credits {
                cast: Vec::new(),
                crew: vec![
                    crew("Lana Wachowski", "Director"),
                    crew("Bill Pope", "Director of Photography"),
                    crew("Lilly Wachowski", "Director"),
                ],
            }),
            ..Default::default()
        };
        let view = MovieView::from_details(details, &ImageUrlBuilder::default());
        let out = movie(&view);
        assert!(out.starts_with("The Matrix (1999)\n"));
        assert!(out.contains("Directed by: Lana Wachowski, Lilly Wachowski\n"));

        let bare = MovieView::from_details(
            MovieDetails {
                id: 1,
                title: "Untitled".into(),
                ..Default::default()
            },
            &ImageUrlBuilder::default(),
        );
        assert!(!movie(&bare).contains("Directed by"));
    }

    #[test]
    fn clip_marks_truncation() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn empty_lists_have_messages() {
        assert!(watchlist(&[]).contains("Your list is empty."));
        assert_eq!(faq(&[]), "No FAQs available.\n");
    }
}
