//! Translation coverage statistics for one catalog.
//!
//! Counts messages per status so an audit surface can show how complete a
//! language is and where the gaps are. Vanished entries are reported but
//! never counted against coverage: they no longer correspond to strings in
//! the application.

use crate::catalog::Catalog;
use crate::message::TranslationStatus;

/// Per-status message counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Finished entries carrying a non-empty translation.
    pub translated: usize,
    /// Entries awaiting translation, plus finished entries whose
    /// translation text is empty (indistinguishable at runtime).
    pub unfinished: usize,
    /// Historical entries excluded from lookup.
    pub vanished: usize,
}

impl StatusCounts {
    fn record(&mut self, status: TranslationStatus, resolvable: bool) {
        match status {
            TranslationStatus::Vanished => self.vanished += 1,
            _ if resolvable => self.translated += 1,
            _ => self.unfinished += 1,
        }
    }

    /// Messages that still correspond to live application strings.
    #[must_use]
    pub fn live(&self) -> usize {
        self.translated + self.unfinished
    }

    /// Fraction of live messages that are translated, as a percentage.
    /// An empty set counts as fully covered.
    #[must_use]
    pub fn coverage_percent(&self) -> f32 {
        if self.live() == 0 {
            100.0
        } else {
            (self.translated as f32 / self.live() as f32) * 100.0
        }
    }
}

/// Counts for one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextCoverage {
    /// Context name as in the file.
    pub name: String,
    /// Message counts for this context.
    pub counts: StatusCounts,
}

/// Coverage of a whole catalog, context by context.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    /// Language tag of the audited catalog.
    pub language: String,
    /// Aggregate counts across all contexts.
    pub totals: StatusCounts,
    /// Per-context breakdown, sorted by name for deterministic output.
    pub contexts: Vec<ContextCoverage>,
}

impl Catalog {
    /// Tally translation coverage for this catalog.
    #[must_use]
    pub fn coverage(&self) -> CoverageReport {
        let mut totals = StatusCounts::default();
        let mut contexts: Vec<ContextCoverage> = Vec::new();

        for context in self.contexts() {
            let mut counts = StatusCounts::default();
            for message in context.messages() {
                counts.record(message.status, message.is_resolvable());
                totals.record(message.status, message.is_resolvable());
            }
            // Split context blocks with the same name merge into one row.
            match contexts.iter_mut().find(|c| c.name == context.name()) {
                Some(existing) => {
                    existing.counts.translated += counts.translated;
                    existing.counts.unfinished += counts.unfinished;
                    existing.counts.vanished += counts.vanished;
                }
                None => contexts.push(ContextCoverage {
                    name: context.name().to_string(),
                    counts,
                }),
            }
        }

        contexts.sort_by(|a, b| a.name.cmp(&b.name));
        CoverageReport {
            language: self.language().to_string(),
            totals,
            contexts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Catalog {
        Catalog::parse(
            r#"<TS version="2.1" language="es_MX">
            <context>
                <name>pv::MainWindow</name>
                <message><source>Open</source><translation>Abrir</translation></message>
                <message><source>Save</source><translation type="unfinished"></translation></message>
                <message><source>Close</source><translation></translation></message>
            </context>
            <context>
                <name>QObject</name>
                <message><source>Quit</source><translation type="vanished">Salir</translation></message>
                <message><source>Cancel</source><translation>Cancelar</translation></message>
            </context>
            </TS>"#,
        )
        .unwrap()
    }

    #[test]
    fn counts_match_fixture_statuses() {
        let report = fixture().coverage();
        assert_eq!(report.language, "es_MX");
        assert_eq!(report.totals.translated, 2);
        // "Save" is unfinished; "Close" is empty-translated, same thing
        // from the caller's perspective.
        assert_eq!(report.totals.unfinished, 2);
        assert_eq!(report.totals.vanished, 1);
        assert_eq!(report.totals.live(), 4);
    }

    #[test]
    fn per_context_breakdown_is_sorted() {
        let report = fixture().coverage();
        let names: Vec<&str> = report.contexts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["QObject", "pv::MainWindow"]);

        let main_window = &report.contexts[1];
        assert_eq!(main_window.counts.translated, 1);
        assert_eq!(main_window.counts.unfinished, 2);
        assert_eq!(main_window.counts.vanished, 0);
    }

    #[test]
    fn vanished_does_not_count_against_coverage() {
        let report = fixture().coverage();
        let qobject = &report.contexts[0];
        assert_eq!(qobject.counts.vanished, 1);
        assert!((qobject.counts.coverage_percent() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_catalog_is_fully_covered() {
        let report = Catalog::empty("en_US").coverage();
        assert_eq!(report.totals.live(), 0);
        assert!((report.totals.coverage_percent() - 100.0).abs() < f32::EPSILON);
        assert!(report.contexts.is_empty());
    }

    #[test]
    fn coverage_percent_half() {
        let catalog = Catalog::parse(
            r#"<TS language="de_DE">
            <context>
                <name>C</name>
                <message><source>A</source><translation>a</translation></message>
                <message><source>B</source><translation type="unfinished"></translation></message>
            </context>
            </TS>"#,
        )
        .unwrap();
        let report = catalog.coverage();
        assert!((report.totals.coverage_percent() - 50.0).abs() < f32::EPSILON);
    }
}
