//! Catalog: the per-language translation table and its lookup rules.
//!
//! # Invariants
//!
//! 1. **Immutable after load**: a `Catalog` is never mutated once built.
//!    Switching languages means building a new catalog and swapping the
//!    handle in a [`CatalogCell`]; readers holding the old one keep a fully
//!    consistent view.
//!
//! 2. **Fallback never yields empty text**: `resolve` returns either a
//!    non-empty translation or the caller's source text, so the UI never
//!    renders a blank string for a non-empty source.
//!
//! 3. **Last one wins**: when one document declares the same
//!    (context, source) pair twice, the entry later in file order owns the
//!    lookup slot. Earlier duplicates stay in the context's message list for
//!    auditing.
//!
//! 4. **Thread safety**: `Catalog` is `Send + Sync`; `resolve` is a pure
//!    read over immutable data.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unknown context | caller passes a context not in the file | Falls back to source text |
//! | Unknown source | string added after extraction | Falls back to source text |
//! | Unfinished entry | translator has not gotten to it | Falls back to source text |
//! | Vanished entry | string removed from the application | Excluded from lookup; falls back |

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::format;
use crate::message::Message;
use crate::parse::{self, LoadError};

/// A namespaced group of messages, generally one originating UI module
/// (e.g. `pv::Session`, `pv::dialogs::Settings`).
#[derive(Debug, Clone)]
pub struct Context {
    name: String,
    messages: Vec<Message>,
}

impl Context {
    pub(crate) fn new(name: String, messages: Vec<Message>) -> Self {
        Self { name, messages }
    }

    /// The context name, exactly as in the `<name>` element.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every message parsed for this context, in file order, duplicates and
    /// vanished entries included.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

/// The full translation table for one language.
///
/// # Example
///
/// ```
/// use linguist_catalog::Catalog;
///
/// let xml = r#"<TS version="2.1" language="de_DE">
///   <context>
///     <name>pv::Session</name>
///     <message>
///       <source>%1 Log</source>
///       <translation>%1-Protokoll</translation>
///     </message>
///   </context>
/// </TS>"#;
///
/// let catalog = Catalog::parse(xml)?;
/// assert_eq!(catalog.language(), "de_DE");
/// assert_eq!(catalog.resolve("pv::Session", "%1 Log"), "%1-Protokoll");
/// assert_eq!(
///     catalog.resolve_with("pv::Session", "%1 Log", &["Debug"]),
///     "Debug-Protokoll"
/// );
/// # Ok::<(), linguist_catalog::LoadError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    language: String,
    contexts: Vec<Context>,
    /// context name → source text → translation. Only resolvable entries
    /// (translated, non-empty) are indexed.
    index: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Build the lookup index over parsed contexts. Walks messages in file
    /// order so a later duplicate replaces an earlier one.
    pub(crate) fn from_parts(language: String, contexts: Vec<Context>) -> Self {
        let mut index: HashMap<String, HashMap<String, String>> = HashMap::new();
        for context in &contexts {
            let slot = index.entry(context.name.clone()).or_default();
            for message in &context.messages {
                if message.is_resolvable() {
                    slot.insert(message.source.clone(), message.translation.clone());
                } else {
                    // A later unfinished/vanished duplicate also wins,
                    // reverting the slot to source-text fallback.
                    slot.remove(&message.source);
                }
            }
        }
        Self {
            language,
            contexts,
            index,
        }
    }

    /// An empty catalog for the given language tag. Every lookup falls back
    /// to source text; this is the "untranslated/default" catalog callers
    /// drop to when a file fails to load.
    #[must_use]
    pub fn empty(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            contexts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Parse a `.ts` document from memory.
    ///
    /// The root's `language` attribute is required here; [`Catalog::load`]
    /// can fall back to the file stem instead.
    pub fn parse(xml: &str) -> Result<Self, LoadError> {
        parse::parse_document(xml, None)
    }

    /// Load and parse one `.ts` file.
    ///
    /// When the root carries no `language` attribute the file stem is used
    /// as the tag (`de.ts` → `de`), matching how translation files are
    /// conventionally named.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stem = path.file_stem().and_then(|s| s.to_str());
        parse::parse_document(&xml, stem)
    }

    /// The language tag this catalog was built for (e.g. `de_DE`, `zh_cn`).
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Every context in file order, for audit and coverage reporting.
    #[must_use]
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// Resolve a (context, source) pair to display text.
    ///
    /// Returns the translation when one exists and is finished; otherwise
    /// the source text unchanged. Misses are fallbacks, never errors, so an
    /// incomplete language shows source text rather than blanks.
    #[must_use]
    pub fn resolve<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        match self.index.get(context).and_then(|slot| slot.get(source)) {
            Some(translation) => translation,
            None => {
                trace!(language = %self.language, context, source, "lookup fallback");
                source
            }
        }
    }

    /// Resolve and interpolate in one step: `%N` placeholders in the
    /// resolved text are replaced from `args` (see [`format::format`]).
    #[must_use]
    pub fn resolve_with(&self, context: &str, source: &str, args: &[&str]) -> String {
        format::format(self.resolve(context, source), args)
    }

    /// Number of (context, source) pairs that resolve to a translation.
    #[must_use]
    pub fn resolvable_len(&self) -> usize {
        self.index.values().map(HashMap::len).sum()
    }
}

/// Shared handle to the active catalog.
///
/// The application holds one cell; a language switch replaces the catalog
/// wholesale. Readers clone out an `Arc` and keep resolving against the
/// catalog they captured, so a switch is atomic from their point of view:
/// old view in full or new view in full, never a mix.
#[derive(Debug)]
pub struct CatalogCell {
    active: RwLock<Arc<Catalog>>,
}

impl CatalogCell {
    /// Create a cell with the given initial catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            active: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The currently active catalog. The returned handle stays valid (and
    /// unchanged) across later [`replace`](Self::replace) calls.
    #[must_use]
    pub fn get(&self) -> Arc<Catalog> {
        match self.active.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swap in a new catalog, returning the previous one.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = match self.active.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn german_catalog() -> Catalog {
        Catalog::parse(
            r#"<TS version="2.1" language="de_DE">
            <context>
                <name>QObject</name>
                <message>
                    <source>Cancel</source>
                    <translation>Abbrechen</translation>
                </message>
                <message>
                    <source>%1 Log</source>
                    <translation>%1-Protokoll</translation>
                </message>
                <message>
                    <source>Save As...</source>
                    <translation type="unfinished"></translation>
                </message>
                <message>
                    <source>Session %1</source>
                    <translation type="obsolete">Analysesitzung %1</translation>
                </message>
            </context>
            <context>
                <name>pv::dialogs::Settings</name>
                <message>
                    <source>Cancel</source>
                    <translation>Verwerfen</translation>
                </message>
            </context>
            </TS>"#,
        )
        .unwrap()
    }

    #[test]
    fn translated_entry_round_trips() {
        let catalog = german_catalog();
        assert_eq!(catalog.resolve("QObject", "Cancel"), "Abbrechen");
    }

    #[test]
    fn same_source_differs_per_context() {
        let catalog = german_catalog();
        assert_eq!(catalog.resolve("QObject", "Cancel"), "Abbrechen");
        assert_eq!(
            catalog.resolve("pv::dialogs::Settings", "Cancel"),
            "Verwerfen"
        );
    }

    #[test]
    fn unknown_context_falls_back_to_source() {
        let catalog = german_catalog();
        assert_eq!(catalog.resolve("pv::Session", "Cancel"), "Cancel");
    }

    #[test]
    fn unfinished_entry_falls_back_to_source() {
        let catalog = german_catalog();
        assert_eq!(catalog.resolve("QObject", "Save As..."), "Save As...");
    }

    #[test]
    fn vanished_entry_is_excluded_from_lookup() {
        // The stale translation exists in the file but must not surface.
        let catalog = german_catalog();
        assert_eq!(catalog.resolve("QObject", "Session %1"), "Session %1");
    }

    #[test]
    fn resolve_never_returns_empty_for_nonempty_source() {
        let catalog = german_catalog();
        for context in catalog.contexts() {
            for message in context.messages() {
                assert!(!catalog.resolve(context.name(), &message.source).is_empty());
            }
        }
    }

    #[test]
    fn resolve_with_interpolates() {
        let catalog = german_catalog();
        assert_eq!(
            catalog.resolve_with("QObject", "%1 Log", &["Debug"]),
            "Debug-Protokoll"
        );
        // Missing argument leaves the placeholder visible.
        assert_eq!(
            catalog.resolve_with("QObject", "%1 Log", &[]),
            "%1-Protokoll"
        );
    }

    #[test]
    fn duplicate_pair_last_one_wins() {
        let catalog = Catalog::parse(
            r#"<TS language="de_DE">
            <context>
                <name>C</name>
                <message><source>Run</source><translation>Erste</translation></message>
                <message><source>Run</source><translation>Zweite</translation></message>
            </context>
            </TS>"#,
        )
        .unwrap();
        assert_eq!(catalog.resolve("C", "Run"), "Zweite");
        // Both declarations remain visible for audit.
        assert_eq!(catalog.contexts()[0].messages().len(), 2);
    }

    #[test]
    fn later_unfinished_duplicate_reverts_to_fallback() {
        let catalog = Catalog::parse(
            r#"<TS language="de_DE">
            <context>
                <name>C</name>
                <message><source>Run</source><translation>Los</translation></message>
                <message><source>Run</source><translation type="unfinished"></translation></message>
            </context>
            </TS>"#,
        )
        .unwrap();
        assert_eq!(catalog.resolve("C", "Run"), "Run");
    }

    #[test]
    fn split_context_blocks_share_one_namespace() {
        let catalog = Catalog::parse(
            r#"<TS language="de_DE">
            <context>
                <name>C</name>
                <message><source>Run</source><translation>Los</translation></message>
            </context>
            <context>
                <name>C</name>
                <message><source>Stop</source><translation>Halt</translation></message>
            </context>
            </TS>"#,
        )
        .unwrap();
        assert_eq!(catalog.resolve("C", "Run"), "Los");
        assert_eq!(catalog.resolve("C", "Stop"), "Halt");
    }

    #[test]
    fn empty_catalog_always_falls_back() {
        let catalog = Catalog::empty("en_US");
        assert_eq!(catalog.language(), "en_US");
        assert_eq!(catalog.resolve("Anything", "Cancel"), "Cancel");
        assert_eq!(catalog.resolvable_len(), 0);
    }

    #[test]
    fn catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
        assert_send_sync::<CatalogCell>();
    }

    #[test]
    fn cell_switch_is_atomic_for_existing_readers() {
        let cell = CatalogCell::new(german_catalog());
        let before = cell.get();

        let replacement = Catalog::parse(
            r#"<TS language="ja_JP">
            <context>
                <name>QObject</name>
                <message><source>Cancel</source><translation>キャンセル</translation></message>
            </context>
            </TS>"#,
        )
        .unwrap();
        cell.replace(replacement);

        // The captured handle still sees the pre-switch catalog in full.
        assert_eq!(before.language(), "de_DE");
        assert_eq!(before.resolve("QObject", "Cancel"), "Abbrechen");
        // New readers see the replacement in full.
        let after = cell.get();
        assert_eq!(after.language(), "ja_JP");
        assert_eq!(after.resolve("QObject", "Cancel"), "キャンセル");
    }
}
