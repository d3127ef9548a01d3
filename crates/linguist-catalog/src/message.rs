//! Message value types: one translatable string with its status and
//! authoring metadata.
//!
//! These are plain immutable data. The lifecycle a message goes through
//! (`unfinished → translated`, `translated → vanished`, ...) happens in the
//! authoring toolchain; at runtime a message only ever carries the status
//! that was baked into the `.ts` file at load time.

/// Translation status of a [`Message`], as recorded in the `type` attribute
/// of its `<translation>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationStatus {
    /// Translation completed. The only status eligible for lookup.
    Translated,
    /// Present in the file but not yet translated (`type="unfinished"`).
    Unfinished,
    /// Source string no longer exists in the application; the entry is
    /// retained for translator history (`type="vanished"` or
    /// `type="obsolete"`) and excluded from lookup.
    Vanished,
}

/// Source location recorded by the string-extraction tool.
///
/// Authoring/traceability metadata only. It is never part of the lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path of the file the string was extracted from, as written.
    pub filename: String,
    /// Line number within that file, when recorded.
    pub line: Option<u32>,
}

/// One source-text/translation pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The untranslated string as it appears in the application source.
    /// Never empty.
    pub source: String,
    /// The translated string. May be empty, which means "untranslated"
    /// regardless of status; lookup then falls back to `source`.
    pub translation: String,
    /// Status baked into the file at extraction/authoring time.
    pub status: TranslationStatus,
    /// Extraction location, when the file records one.
    pub location: Option<Location>,
    /// Free-form note left by the translator (`<translatorcomment>`).
    pub translator_comment: Option<String>,
}

impl Message {
    /// Whether this message may satisfy a lookup: translated and carrying a
    /// non-empty translation. Everything else resolves to the source text.
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        self.status == TranslationStatus::Translated && !self.translation.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(status: TranslationStatus, translation: &str) -> Message {
        Message {
            source: "Cancel".into(),
            translation: translation.into(),
            status,
            location: None,
            translator_comment: None,
        }
    }

    #[test]
    fn translated_with_text_is_resolvable() {
        assert!(message(TranslationStatus::Translated, "Abbrechen").is_resolvable());
    }

    #[test]
    fn empty_translation_is_not_resolvable() {
        assert!(!message(TranslationStatus::Translated, "").is_resolvable());
    }

    #[test]
    fn unfinished_and_vanished_are_not_resolvable() {
        assert!(!message(TranslationStatus::Unfinished, "Abbrechen").is_resolvable());
        assert!(!message(TranslationStatus::Vanished, "Abbrechen").is_resolvable());
    }
}
