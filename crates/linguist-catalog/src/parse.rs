//! Streaming parser for Qt Linguist `.ts` documents.
//!
//! A `.ts` file is one XML document: a `<TS>` root carrying the language
//! tag, containing `<context>` blocks that each hold a `<name>` and a run of
//! `<message>` entries. The parser walks the event stream once and builds
//! the immutable context graph; entity escapes (`&apos;`, `&amp;`, ...) are
//! unescaped exactly once here, so lookup keys compare against the decoded
//! text.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unreadable path | I/O error | `LoadError::Io`, fatal for this file |
//! | Malformed XML | syntax error, truncation | `LoadError::Xml` with byte position |
//! | Wrong root | document is not a `<TS>` table | `LoadError::UnexpectedRoot` |
//! | Empty `<source>` | invalid extraction output | `LoadError::EmptySource` |
//! | No language tag | no `language` attribute and no file-stem hint | `LoadError::MissingLanguage` |
//!
//! A `LoadError` is always fatal for the single file being loaded and never
//! for the process; callers fall back to another catalog.

use std::io;
use std::path::PathBuf;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::catalog::{Catalog, Context};
use crate::message::{Location, Message, TranslationStatus};

/// Error loading one `.ts` document. Fatal for that language only.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The XML is not well-formed or violates the expected structure.
    Xml {
        /// Human-readable detail from the XML reader.
        detail: String,
        /// Byte offset into the document where the error was noticed.
        position: usize,
    },
    /// The document's root element is not `<TS>`.
    UnexpectedRoot {
        /// Name of the root element actually found.
        found: String,
    },
    /// A `<message>` carried an empty `<source>`, which can never be a
    /// lookup key.
    EmptySource {
        /// Name of the context the message appeared in.
        context: String,
    },
    /// The root carried no `language` attribute and no file-name hint was
    /// available to derive one.
    MissingLanguage,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::Xml { detail, position } => {
                write!(f, "malformed TS document at byte {position}: {detail}")
            }
            Self::UnexpectedRoot { found } => {
                write!(f, "expected <TS> root element, found <{found}>")
            }
            Self::EmptySource { context } => {
                write!(f, "empty <source> in context '{context}'")
            }
            Self::MissingLanguage => {
                write!(f, "document carries no language tag")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn xml_error(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> LoadError {
    LoadError::Xml {
        detail: err.to_string(),
        position: reader.buffer_position(),
    }
}

/// Pull one attribute value off a start tag, unescaped.
fn attribute(
    reader: &Reader<&[u8]>,
    tag: &BytesStart<'_>,
    name: &[u8],
) -> Result<Option<String>, LoadError> {
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| xml_error(reader, e))?;
        if attr.key.as_ref() == name {
            let value = attr.unescape_value().map_err(|e| xml_error(reader, e))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Collect the unescaped character data up to the matching end tag,
/// skipping over any nested markup.
fn read_text(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<String, LoadError> {
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event().map_err(|e| xml_error(reader, e))? {
            Event::Text(e) => {
                text.push_str(&e.unescape().map_err(|e| xml_error(reader, e))?);
            }
            Event::Start(_) => depth += 1,
            Event::End(e) if depth == 0 && e.name().as_ref() == end => return Ok(text),
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => {
                return Err(LoadError::Xml {
                    detail: format!(
                        "unexpected end of document inside <{}>",
                        String::from_utf8_lossy(end)
                    ),
                    position: reader.buffer_position(),
                });
            }
            _ => {}
        }
    }
}

/// Skip everything up to the matching end tag.
fn skip_element(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<(), LoadError> {
    read_text(reader, end).map(|_| ())
}

fn parse_location(
    reader: &Reader<&[u8]>,
    tag: &BytesStart<'_>,
) -> Result<Option<Location>, LoadError> {
    let Some(filename) = attribute(reader, tag, b"filename")? else {
        return Ok(None);
    };
    let line = attribute(reader, tag, b"line")?.and_then(|v| v.parse().ok());
    Ok(Some(Location { filename, line }))
}

fn parse_message(reader: &mut Reader<&[u8]>, context_name: &str) -> Result<Message, LoadError> {
    let mut source = String::new();
    let mut translation = String::new();
    let mut status = TranslationStatus::Translated;
    let mut location = None;
    let mut translator_comment = None;

    loop {
        match reader.read_event().map_err(|e| xml_error(reader, e))? {
            Event::Empty(e) if e.name().as_ref() == b"location" => {
                location = parse_location(reader, &e)?;
            }
            Event::Start(e) => match e.name().as_ref() {
                b"location" => {
                    location = parse_location(reader, &e)?;
                    skip_element(reader, b"location")?;
                }
                b"source" => source = read_text(reader, b"source")?,
                b"translatorcomment" => {
                    translator_comment = Some(read_text(reader, b"translatorcomment")?);
                }
                b"translation" => {
                    status = translation_status(reader, &e)?;
                    translation = read_text(reader, b"translation")?;
                }
                other => {
                    let name = other.to_vec();
                    skip_element(reader, &name)?;
                }
            },
            Event::Empty(e) if e.name().as_ref() == b"translation" => {
                status = translation_status(reader, &e)?;
            }
            Event::End(e) if e.name().as_ref() == b"message" => break,
            Event::Eof => {
                return Err(LoadError::Xml {
                    detail: "unexpected end of document inside <message>".into(),
                    position: reader.buffer_position(),
                });
            }
            _ => {}
        }
    }

    if source.is_empty() {
        return Err(LoadError::EmptySource {
            context: context_name.to_string(),
        });
    }

    Ok(Message {
        source,
        translation,
        status,
        location,
        translator_comment,
    })
}

fn translation_status(
    reader: &Reader<&[u8]>,
    tag: &BytesStart<'_>,
) -> Result<TranslationStatus, LoadError> {
    Ok(match attribute(reader, tag, b"type")?.as_deref() {
        Some("unfinished") => TranslationStatus::Unfinished,
        // Two spellings across authoring-tool versions, one runtime meaning.
        Some("vanished") | Some("obsolete") => TranslationStatus::Vanished,
        _ => TranslationStatus::Translated,
    })
}

fn parse_context(reader: &mut Reader<&[u8]>) -> Result<Context, LoadError> {
    let mut name = String::new();
    let mut messages = Vec::new();

    loop {
        match reader.read_event().map_err(|e| xml_error(reader, e))? {
            Event::Start(e) => match e.name().as_ref() {
                b"name" => name = read_text(reader, b"name")?,
                b"message" => messages.push(parse_message(reader, &name)?),
                other => {
                    let tag = other.to_vec();
                    skip_element(reader, &tag)?;
                }
            },
            Event::End(e) if e.name().as_ref() == b"context" => break,
            Event::Eof => {
                return Err(LoadError::Xml {
                    detail: "unexpected end of document inside <context>".into(),
                    position: reader.buffer_position(),
                });
            }
            _ => {}
        }
    }

    Ok(Context::new(name, messages))
}

/// Parse a complete `.ts` document.
///
/// `language_hint` supplies the tag when the root carries no `language`
/// attribute (derived from the file stem by [`Catalog::load`]); an explicit
/// attribute always wins.
pub(crate) fn parse_document(
    xml: &str,
    language_hint: Option<&str>,
) -> Result<Catalog, LoadError> {
    // Text is not trimmed: source and translation text must survive
    // byte-for-byte, trailing spaces included. Indentation between elements
    // surfaces as whitespace-only text events, which the structural loops
    // below simply ignore.
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut language = None;
    let mut root_closed = false;
    loop {
        let event = reader.read_event().map_err(|e| xml_error(&reader, e))?;
        match &event {
            Event::Start(e) | Event::Empty(e) => {
                if e.name().as_ref() != b"TS" {
                    return Err(LoadError::UnexpectedRoot {
                        found: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    });
                }
                language = attribute(&reader, e, b"language")?;
                root_closed = matches!(&event, Event::Empty(_));
                break;
            }
            Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::Eof => {
                return Err(LoadError::Xml {
                    detail: "document has no root element".into(),
                    position: reader.buffer_position(),
                });
            }
            _ => {}
        }
    }

    let mut contexts = Vec::new();
    while !root_closed {
        match reader.read_event().map_err(|e| xml_error(&reader, e))? {
            Event::Start(e) => match e.name().as_ref() {
                b"context" => contexts.push(parse_context(&mut reader)?),
                other => {
                    let tag = other.to_vec();
                    skip_element(&mut reader, &tag)?;
                }
            },
            Event::End(e) if e.name().as_ref() == b"TS" => break,
            Event::Eof => break,
            _ => {}
        }
    }

    let language = language
        .or_else(|| language_hint.map(str::to_string))
        .ok_or(LoadError::MissingLanguage)?;

    let message_count: usize = contexts.iter().map(|c| c.messages().len()).sum();
    debug!(
        language = %language,
        contexts = contexts.len(),
        messages = message_count,
        "parsed TS document"
    );

    Ok(Catalog::from_parts(language, contexts))
}
