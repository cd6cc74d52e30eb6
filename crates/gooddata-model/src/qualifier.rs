//! Object qualifiers: references to catalog objects by URI or by identifier.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{not_empty, ModelError, ModelResult};
use crate::reference;

/// Reference to a metadata object by its URI, e.g. `/gdc/md/PROJECT/obj/1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "UriWire")]
pub struct UriObjQualifier {
    uri: String,
}

impl UriObjQualifier {
    /// Creates a URI qualifier. The URI must not be empty.
    pub fn new(uri: impl Into<String>) -> ModelResult<Self> {
        Ok(Self {
            uri: not_empty(uri.into(), "uri")?,
        })
    }

    /// The referenced URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Numeric object id when the URI has the `/gdc/md/<project>/obj/<id>` shape.
    pub fn object_id(&self) -> Option<u64> {
        reference::object_id(&self.uri)
    }
}

/// Reference to a metadata object by its stable identifier, e.g. `label.product.id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "IdentifierWire")]
pub struct IdentifierObjQualifier {
    identifier: String,
}

impl IdentifierObjQualifier {
    /// Creates an identifier qualifier. The identifier must not be empty.
    pub fn new(identifier: impl Into<String>) -> ModelResult<Self> {
        Ok(Self {
            identifier: not_empty(identifier.into(), "identifier")?,
        })
    }

    /// The referenced identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// Qualifier of an object: either its URI or its identifier.
///
/// On the wire this is `{"uri": "..."}` or `{"identifier": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjQualifier {
    /// Addressed by URI.
    Uri(UriObjQualifier),
    /// Addressed by identifier.
    Identifier(IdentifierObjQualifier),
}

impl ObjQualifier {
    /// Creates a URI qualifier.
    pub fn uri(uri: impl Into<String>) -> ModelResult<Self> {
        UriObjQualifier::new(uri).map(ObjQualifier::Uri)
    }

    /// Creates an identifier qualifier.
    pub fn identifier(identifier: impl Into<String>) -> ModelResult<Self> {
        IdentifierObjQualifier::new(identifier).map(ObjQualifier::Identifier)
    }

    /// Returns true for URI qualifiers.
    pub fn is_uri(&self) -> bool {
        matches!(self, ObjQualifier::Uri(_))
    }

    /// Returns the URI form if this is a URI qualifier.
    pub fn as_uri(&self) -> Option<&UriObjQualifier> {
        match self {
            ObjQualifier::Uri(q) => Some(q),
            ObjQualifier::Identifier(_) => None,
        }
    }

    /// Returns the identifier form if this is an identifier qualifier.
    pub fn as_identifier(&self) -> Option<&IdentifierObjQualifier> {
        match self {
            ObjQualifier::Uri(_) => None,
            ObjQualifier::Identifier(q) => Some(q),
        }
    }
}

impl From<UriObjQualifier> for ObjQualifier {
    fn from(q: UriObjQualifier) -> Self {
        ObjQualifier::Uri(q)
    }
}

impl From<IdentifierObjQualifier> for ObjQualifier {
    fn from(q: IdentifierObjQualifier) -> Self {
        ObjQualifier::Identifier(q)
    }
}

// MAQL reference notation: `[uri]` and `{identifier}`. A closing delimiter
// or backslash inside the value is written with a leading backslash so the
// output always parses back.

fn write_escaped(f: &mut std::fmt::Formatter<'_>, value: &str, close: char) -> std::fmt::Result {
    for c in value.chars() {
        if c == close || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    Ok(())
}

impl std::fmt::Display for UriObjQualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('[')?;
        write_escaped(f, &self.uri, ']')?;
        f.write_char(']')
    }
}

impl std::fmt::Display for IdentifierObjQualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('{')?;
        write_escaped(f, &self.identifier, '}')?;
        f.write_char('}')
    }
}

impl std::fmt::Display for ObjQualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjQualifier::Uri(q) => q.fmt(f),
            ObjQualifier::Identifier(q) => q.fmt(f),
        }
    }
}

impl std::str::FromStr for ObjQualifier {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        reference::parse_reference(s)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UriWire {
    uri: String,
}

impl TryFrom<UriWire> for UriObjQualifier {
    type Error = ModelError;

    fn try_from(wire: UriWire) -> Result<Self, Self::Error> {
        UriObjQualifier::new(wire.uri)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct IdentifierWire {
    identifier: String,
}

impl TryFrom<IdentifierWire> for IdentifierObjQualifier {
    type Error = ModelError;

    fn try_from(wire: IdentifierWire) -> Result<Self, Self::Error> {
        IdentifierObjQualifier::new(wire.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_qualifiers_rejected() {
        assert!(UriObjQualifier::new("").is_err());
        assert!(IdentifierObjQualifier::new("").is_err());
        assert!(ObjQualifier::uri("").is_err());
    }

    #[test]
    fn test_equality_by_variant_and_value() {
        let uri = ObjQualifier::uri("abc").unwrap();
        let id = ObjQualifier::identifier("abc").unwrap();
        assert_ne!(uri, id);
        assert_eq!(uri, ObjQualifier::uri("abc").unwrap());
    }

    #[test]
    fn test_accessors() {
        let q = ObjQualifier::uri("/gdc/md/p/obj/12").unwrap();
        assert!(q.is_uri());
        assert_eq!(q.as_uri().map(|u| u.uri()), Some("/gdc/md/p/obj/12"));
        assert!(q.as_identifier().is_none());
        assert_eq!(q.as_uri().and_then(|u| u.object_id()), Some(12));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ObjQualifier::uri("/gdc/md/p/obj/1").unwrap().to_string(),
            "[/gdc/md/p/obj/1]"
        );
        assert_eq!(
            ObjQualifier::identifier("label.id").unwrap().to_string(),
            "{label.id}"
        );
    }

    #[test]
    fn test_display_escapes_closing_delimiter() {
        assert_eq!(ObjQualifier::identifier("a}b").unwrap().to_string(), r"{a\}b}");
        assert_eq!(ObjQualifier::uri("/x]y").unwrap().to_string(), r"[/x\]y]");
        assert_eq!(ObjQualifier::uri(r"/x\y").unwrap().to_string(), r"[/x\\y]");
        // the other delimiter needs no escape
        assert_eq!(ObjQualifier::uri("/x}y").unwrap().to_string(), "[/x}y]");
    }

    #[test]
    fn test_wire_format() {
        let q: ObjQualifier = serde_json::from_str(r#"{"uri":"/gdc/md/p/obj/1"}"#).unwrap();
        assert_eq!(q, ObjQualifier::uri("/gdc/md/p/obj/1").unwrap());

        let q: ObjQualifier = serde_json::from_str(r#"{"identifier":"date.year"}"#).unwrap();
        assert_eq!(q, ObjQualifier::identifier("date.year").unwrap());
        assert_eq!(
            serde_json::to_string(&q).unwrap(),
            r#"{"identifier":"date.year"}"#
        );
    }

    #[test]
    fn test_wire_rejects_empty_and_unknown() {
        assert!(serde_json::from_str::<ObjQualifier>(r#"{"uri":""}"#).is_err());
        assert!(serde_json::from_str::<ObjQualifier>(r#"{"other":"x"}"#).is_err());
    }
}
