//! Discovery of installed translation files.
//!
//! A settings surface needs the list of available languages without paying
//! for a full parse of every file. The scan here reads each `*.ts` file
//! only as far as its `<TS>` root tag, takes the `language` attribute (or
//! the file stem when absent), and stops.
//!
//! The scan is tolerant by design: an unreadable or malformed file is
//! skipped with a warning, since one broken language must not hide the
//! others from the language picker.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, warn};

use crate::parse::LoadError;

/// One discovered translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFile {
    /// Language tag from the root element, or the file stem as fallback.
    pub tag: String,
    /// Path of the `.ts` file, for a later full [`Catalog::load`].
    ///
    /// [`Catalog::load`]: crate::Catalog::load
    pub path: PathBuf,
}

/// Enumerate the translation files under `dir`, sorted by tag.
///
/// Only the directory read itself can fail; individual files that cannot be
/// opened or are not TS documents are skipped with a warning.
pub fn available_languages(dir: impl AsRef<Path>) -> Result<Vec<LanguageFile>, LoadError> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut languages = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("ts") {
            continue;
        }
        match read_language_tag(&path) {
            Some(tag) => languages.push(LanguageFile { tag, path }),
            None => {
                warn!(path = %path.display(), "skipping file without a usable TS root");
            }
        }
    }

    languages.sort_by(|a, b| a.tag.cmp(&b.tag));
    debug!(dir = %dir.display(), found = languages.len(), "scanned translation directory");
    Ok(languages)
}

/// Stream the file just far enough to see the root element.
fn read_language_tag(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut reader = Reader::from_reader(BufReader::new(file));
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                if e.name().as_ref() != b"TS" {
                    return None;
                }
                let attr = e.attributes().filter_map(Result::ok).find_map(|attr| {
                    (attr.key.as_ref() == b"language")
                        .then(|| attr.unescape_value().ok().map(|v| v.into_owned()))
                        .flatten()
                });
                // No attribute: fall back to the file stem (`de.ts` → `de`).
                return attr.or_else(|| {
                    path.file_stem()
                        .and_then(|s| s.to_str())
                        .map(str::to_string)
                });
            }
            Ok(Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) | Event::Text(_)) => {}
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => return None,
        }
        buf.clear();
    }
}
