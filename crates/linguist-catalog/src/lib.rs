#![forbid(unsafe_code)]

//! Message-catalog lookup and interpolation for Qt Linguist `.ts` files.
//!
//! # Role
//! The UI layer of a desktop application calls in with a context name, a
//! source string, and optional positional arguments, and gets back a
//! display-ready string. Everything upstream (string extraction, human
//! translation) and downstream (widget rendering) lives outside this crate.
//!
//! # Primary responsibilities
//! - **[`Catalog`]**: parse one `.ts` document per language into an
//!   immutable lookup table; resolve (context, source) pairs with
//!   fallback-to-source semantics.
//! - **[`format()`](format::format)**: positional `%1`..`%99` placeholder
//!   interpolation over resolved templates.
//! - **[`available_languages`]**: metadata-only scan of a translation
//!   directory for the language picker.
//! - **[`CatalogCell`]**: wholesale atomic replacement of the active
//!   catalog on language switch.
//!
//! # Failure philosophy
//! Only loading can fail, and only per file ([`LoadError`]). Lookup misses
//! and missing format arguments are fallbacks by design: the worst
//! observable state is untranslated source text, never a blank string, a
//! panic, or an error reaching the UI.

pub mod catalog;
pub mod coverage;
pub mod discover;
pub mod format;
pub mod message;
mod parse;

pub use catalog::{Catalog, CatalogCell, Context};
pub use coverage::{ContextCoverage, CoverageReport, StatusCounts};
pub use discover::{LanguageFile, available_languages};
pub use format::{Token, format, tokenize};
pub use message::{Location, Message, TranslationStatus};
pub use parse::LoadError;
