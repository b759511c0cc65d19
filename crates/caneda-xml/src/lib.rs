//! Versioned XML persistence for [`caneda_sch::Document`].
//!
//! The persisted form is a single XML tree: a `caneda` root carrying the
//! format version, followed by the view-state block, the component, wire,
//! and painting collections (each omitted when empty), and a trailing
//! `symbol` text element holding the embedded symbol sub-document.
//!
//! Wires are not stored flat: on every save the equipotential consolidator
//! groups endpoint-connected wires, and each group becomes one
//! `equipotential` container whose members carry document-unique sequential
//! ids. Loading rebuilds the wires from their endpoint coordinates; the
//! grouping is derived state and is recomputed whenever it is needed.
//!
//! Loading is atomic: the decoder builds a scratch [`Document`] and hands
//! it over only when the whole text parsed, so a failed load never leaves a
//! half-populated document behind.

mod reader;
mod symbol;
pub mod version;
mod writer;

pub use symbol::extract_embedded_symbol;
pub use version::FORMAT_VERSION;

use caneda_sch::{ComponentRegistry, Document};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlFormatError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported document version: {found}")]
    VersionMismatch { found: String },

    #[error("Missing required element: {0}")]
    MissingElement(&'static str),

    #[error("Missing required attribute '{attr}' on element '{element}'")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },

    #[error("Invalid attribute value: {0}")]
    InvalidAttribute(String),

    #[error("Malformed schematic structure: {0}")]
    MalformedStructure(String),
}

pub type Result<T> = std::result::Result<T, XmlFormatError>;

/// Serializes a document to its complete XML text.
///
/// Pure with respect to the document; writing the text anywhere durable is
/// the caller's concern (or use [`save_file`]).
pub fn save_schematic(document: &Document) -> Result<String> {
    writer::write_document(document)
}

/// Parses a schematic from its XML text, resolving component instances
/// through `registry`.
///
/// The version token is checked against the default compatibility rule
/// before anything else is read; see [`load_schematic_with`] to supply a
/// different rule.
pub fn load_schematic(xml: &str, registry: &ComponentRegistry) -> Result<Document> {
    load_schematic_with(xml, registry, version::is_compatible)
}

/// Like [`load_schematic`], with a caller-supplied version compatibility
/// predicate.
pub fn load_schematic_with(
    xml: &str,
    registry: &ComponentRegistry,
    version_ok: impl Fn(&str) -> bool,
) -> Result<Document> {
    let tree = roxmltree::Document::parse_with_options(
        xml,
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )?;
    reader::Parser::new(registry).parse_document(&tree, version_ok)
}

/// Saves a document to `path`, overwriting any existing file.
pub fn save_file(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let text = save_schematic(document)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Loads a schematic document from `path`.
pub fn load_file(path: impl AsRef<Path>, registry: &ComponentRegistry) -> Result<Document> {
    let xml = std::fs::read_to_string(path)?;
    load_schematic(&xml, registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_round_trips() {
        let registry = ComponentRegistry::new();
        let document = Document::new();
        let xml = save_schematic(&document).unwrap();
        let back = load_schematic(&xml, &registry).unwrap();
        assert_eq!(back, document);
    }

    #[test]
    fn load_rejects_foreign_root() {
        let registry = ComponentRegistry::new();
        let result = load_schematic("<qucsstudio version=\"0.1.0\"/>", &registry);
        assert!(matches!(
            result,
            Err(XmlFormatError::MalformedStructure(_))
        ));
    }

    #[test]
    fn load_rejects_unparsable_text() {
        let registry = ComponentRegistry::new();
        assert!(matches!(
            load_schematic("<caneda", &registry),
            Err(XmlFormatError::XmlParse(_))
        ));
    }
}
