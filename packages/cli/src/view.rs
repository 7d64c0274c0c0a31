//! Terminal rendition of the safety check screens.

use city_safety_client::{Route, SafetyCheckView};
use city_safety_neighbourhood::{DataSource, render, results};

/// Prints navigations as rendered results pages and alerts to stderr.
#[derive(Debug, Clone, Copy)]
pub struct TerminalView {
    data_source: DataSource,
}

impl TerminalView {
    /// Creates a view that renders records from `data_source`.
    #[must_use]
    pub const fn new(data_source: DataSource) -> Self {
        Self { data_source }
    }

    /// Renders the results screen for a `data` navigation parameter.
    #[must_use]
    pub fn render_results(&self, data: Option<&str>) -> String {
        let records = results::load_records(data, self.data_source);
        log::debug!(
            "Rendering {} record(s) from {} data",
            records.len(),
            self.data_source
        );
        render::render_all(&render::build_pages(&records))
    }
}

impl SafetyCheckView for TerminalView {
    fn navigate(&self, route: &Route) {
        log::debug!("Navigating to {}", route.pathname);
        println!("{}", self.render_results(route.data()));
    }

    fn alert(&self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }
}
