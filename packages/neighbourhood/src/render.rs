//! Plain-text layout of the results screen.
//!
//! The screen is a horizontal pager: an intro page followed by one page
//! per neighbourhood record.

use std::fmt::Write as _;

use city_safety_neighbourhood_models::{NeighbourhoodSafetyRecord, StarKind};

/// Intro page heading.
pub const INTRO_TITLE: &str = "Here\u{2019}s a Safety Review of Your City";

/// Intro page body.
pub const INTRO_SUBTITLE: &str = "Discover your city\u{2019}s safety score and uncover hidden risks \
    and safe havens! With real-time updates from news and crowd-sourced data, this feature gives \
    you the power to stay one step ahead and explore with confidence!";

/// Intro page footer.
pub const INTRO_HINT: &str = "Scroll to explore all the neighborhoods!";

/// Section label above the score.
pub const SCORE_LABEL: &str = "Safety Score";

/// Section label above the overview.
pub const OVERVIEW_LABEL: &str = "Safety Overview";

/// Section label above the places list.
pub const PLACES_LABEL: &str = "Top 3 Safe Places";

/// Section label above the social character.
pub const SOCIAL_LABEL: &str = "What are the people like here?";

/// Separator printed between pages by [`render_all`].
pub const PAGE_SEPARATOR: &str = "\n────────────────────────────────────────\n\n";

/// One page of the results pager.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsPage {
    /// Leading page explaining the feature.
    Intro,
    /// A single neighbourhood.
    Neighbourhood(NeighbourhoodPage),
}

/// Display-ready content of a neighbourhood page.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighbourhoodPage {
    /// Page title.
    pub title: String,
    /// Score with one decimal.
    pub score: String,
    /// Five-star rating.
    pub stars: [StarKind; 5],
    /// Safety overview text.
    pub overview: String,
    /// Bulleted places (never empty).
    pub places: Vec<String>,
    /// Social character text.
    pub social_character: String,
}

impl From<&NeighbourhoodSafetyRecord> for NeighbourhoodPage {
    fn from(record: &NeighbourhoodSafetyRecord) -> Self {
        Self {
            title: record.neighbourhood.clone(),
            score: record.formatted_score(),
            stars: record.stars(),
            overview: record.safety_overview.clone(),
            places: record
                .display_places()
                .into_iter()
                .map(String::from)
                .collect(),
            social_character: record.social_character.clone(),
        }
    }
}

/// Builds the pager: the intro page, then one page per record in order.
#[must_use]
pub fn build_pages(records: &[NeighbourhoodSafetyRecord]) -> Vec<ResultsPage> {
    std::iter::once(ResultsPage::Intro)
        .chain(
            records
                .iter()
                .map(|r| ResultsPage::Neighbourhood(NeighbourhoodPage::from(r))),
        )
        .collect()
}

/// Glyph for a single star.
#[must_use]
pub const fn star_glyph(kind: StarKind) -> char {
    match kind {
        StarKind::Full => '★',
        StarKind::Half => '⯪',
        StarKind::Empty => '☆',
    }
}

/// Renders a star rating as a string of glyphs.
#[must_use]
pub fn render_stars(stars: &[StarKind]) -> String {
    stars.iter().copied().map(star_glyph).collect()
}

/// Renders a single page as text.
///
/// # Panics
///
/// Never: writing to a `String` is infallible.
#[must_use]
pub fn render_page(page: &ResultsPage) -> String {
    let mut out = String::new();

    match page {
        ResultsPage::Intro => {
            writeln!(out, "{INTRO_TITLE}").unwrap();
            writeln!(out).unwrap();
            writeln!(out, "{INTRO_SUBTITLE}").unwrap();
            writeln!(out).unwrap();
            writeln!(out, "{INTRO_HINT}").unwrap();
        }
        ResultsPage::Neighbourhood(page) => {
            writeln!(out, "{}", page.title).unwrap();
            writeln!(out).unwrap();
            writeln!(out, "{SCORE_LABEL}").unwrap();
            writeln!(out, "{}", page.score).unwrap();
            writeln!(out, "{}", render_stars(&page.stars)).unwrap();
            writeln!(out).unwrap();
            writeln!(out, "{OVERVIEW_LABEL}").unwrap();
            writeln!(out, "{}", page.overview).unwrap();
            writeln!(out).unwrap();
            writeln!(out, "{PLACES_LABEL}").unwrap();
            for place in &page.places {
                writeln!(out, "- {place}").unwrap();
            }
            writeln!(out).unwrap();
            writeln!(out, "{SOCIAL_LABEL}").unwrap();
            writeln!(out, "{}", page.social_character).unwrap();
        }
    }

    out
}

/// Renders every page, separated by [`PAGE_SEPARATOR`].
#[must_use]
pub fn render_all(pages: &[ResultsPage]) -> String {
    pages
        .iter()
        .map(render_page)
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use city_safety_neighbourhood_models::NO_PLACES_PLACEHOLDER;

    use super::*;

    fn record(score: f64, places: &[&str]) -> NeighbourhoodSafetyRecord {
        NeighbourhoodSafetyRecord {
            neighbourhood: "Dapperbuurt".to_string(),
            safety_score: score,
            top_places: places.iter().map(ToString::to_string).collect(),
            safety_overview: "Mixed signals.".to_string(),
            social_character: "Hip.".to_string(),
        }
    }

    #[test]
    fn intro_page_comes_first() {
        let pages = build_pages(&[record(4.0, &[]), record(2.0, &[])]);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], ResultsPage::Intro);
    }

    #[test]
    fn intro_page_text() {
        assert_eq!(
            render_page(&ResultsPage::Intro),
            format!("{INTRO_TITLE}\n\n{INTRO_SUBTITLE}\n\n{INTRO_HINT}\n")
        );
    }

    #[test]
    fn neighbourhood_page_layout() {
        let text = render_page(&ResultsPage::Neighbourhood(NeighbourhoodPage::from(
            &record(4.0, &["Oosterpark"]),
        )));
        assert_eq!(
            text,
            "Dapperbuurt\n\nSafety Score\n4.0\n★★★★☆\n\nSafety Overview\nMixed signals.\n\n\
             Top 3 Safe Places\n- Oosterpark\n\nWhat are the people like here?\nHip.\n"
        );
    }

    #[test]
    fn empty_record_list_still_has_intro() {
        assert_eq!(build_pages(&[]), vec![ResultsPage::Intro]);
    }

    #[test]
    fn empty_places_render_one_placeholder() {
        let page = NeighbourhoodPage::from(&record(4.0, &[]));
        assert_eq!(page.places, vec![NO_PLACES_PLACEHOLDER.to_string()]);

        let text = render_page(&ResultsPage::Neighbourhood(page));
        assert_eq!(text.matches("- ").count(), 1);
        assert!(text.contains("- No data available"));
    }

    #[test]
    fn places_render_in_order() {
        let page = ResultsPage::Neighbourhood(NeighbourhoodPage::from(&record(
            4.0,
            &["Oosterpark", "Dappermarkt"],
        )));
        let text = render_page(&page);
        let first = text.find("- Oosterpark").unwrap();
        let second = text.find("- Dappermarkt").unwrap();
        assert!(first < second);
    }

    #[test]
    fn score_and_stars_render() {
        let text = render_page(&ResultsPage::Neighbourhood(NeighbourhoodPage::from(
            &record(2.5, &[]),
        )));
        assert!(text.contains("\n2.5\n"));
        assert!(text.contains("★★⯪☆☆"));
    }

    #[test]
    fn render_all_separates_pages() {
        let pages = build_pages(&[record(4.0, &[])]);
        let text = render_all(&pages);
        assert_eq!(text.matches(PAGE_SEPARATOR).count(), 1);
        assert!(text.starts_with(INTRO_TITLE));
    }
}
