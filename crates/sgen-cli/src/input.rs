//! Reading detected silences from XML.
//!
//! The input lists one `<silence from="…" until="…"/>` element per detected
//! silence, in chronological order. Anything else in the document is ignored.

use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;
use tracing::debug;

use sgen_core::{ParseTimeValueError, Silence, TimeValue};

const TAG_SILENCE: &[u8] = b"silence";
const ATTR_FROM: &str = "from";
const ATTR_UNTIL: &str = "until";

/// Errors raised while reading the silence list.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("silence #{index} has no `{attribute}` attribute")]
    MissingAttribute {
        index: usize,
        attribute: &'static str,
    },

    #[error("silence #{index} has an invalid `{attribute}` value: {source}")]
    TimeValue {
        index: usize,
        attribute: &'static str,
        source: ParseTimeValueError,
    },
}

/// Reads and parses the silence file at `path`.
pub fn read_silences(path: &Path) -> Result<Vec<Silence>, InputError> {
    let xml = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let silences = parse_silences(&xml)?;
    debug!(path = %path.display(), count = silences.len(), "silences loaded");
    Ok(silences)
}

/// Parses every `silence` element of `xml` in document order.
pub fn parse_silences(xml: &str) -> Result<Vec<Silence>, InputError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut silences = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == TAG_SILENCE => {
                let index = silences.len() + 1;
                silences.push(silence_from_element(&reader, &e, index)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(silences)
}

fn silence_from_element(
    reader: &Reader<&[u8]>,
    element: &BytesStart<'_>,
    index: usize,
) -> Result<Silence, InputError> {
    let mut from = None;
    let mut until = None;

    for attr in element.attributes() {
        let attr = attr?;
        let slot = match attr.key.local_name().as_ref() {
            b"from" => &mut from,
            b"until" => &mut until,
            _ => continue,
        };
        *slot = Some(attr.decode_and_unescape_value(reader.decoder())?.into_owned());
    }

    Ok(Silence::new(
        time_attribute(from, ATTR_FROM, index)?,
        time_attribute(until, ATTR_UNTIL, index)?,
    ))
}

fn time_attribute(
    value: Option<String>,
    attribute: &'static str,
    index: usize,
) -> Result<TimeValue, InputError> {
    let value = value.ok_or(InputError::MissingAttribute { index, attribute })?;
    value.parse().map_err(|source| InputError::TimeValue {
        index,
        attribute,
        source,
    })
}
