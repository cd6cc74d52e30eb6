//! The catalog collaborator used for batch identifier lookups.
//!
//! This crate performs no I/O. The HTTP layer of the SDK implements
//! [`IdentifierCatalog`] on top of the metadata `identifiers` resource and
//! hands it to a [`QualifierResolver`](crate::QualifierResolver).
//!
//! # Example: in-memory catalog
//!
//! ```rust
//! use std::collections::HashMap;
//! use gooddata_resolver::{IdentifierCatalog, IdentifierToUri, ResolveResult};
//!
//! struct StaticCatalog(HashMap<String, String>);
//!
//! impl IdentifierCatalog for StaticCatalog {
//!     fn uris_by_identifiers(&self, identifiers: &[String]) -> ResolveResult<Vec<IdentifierToUri>> {
//!         Ok(identifiers
//!             .iter()
//!             .filter_map(|id| self.0.get(id).map(|uri| IdentifierToUri::new(id.clone(), uri.clone())))
//!             .collect())
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ResolveResult;

/// One identifier with its current URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentifierToUri {
    /// Object identifier.
    pub identifier: String,
    /// Object URI.
    pub uri: String,
}

impl IdentifierToUri {
    /// Pairs an identifier with its URI.
    pub fn new(identifier: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            uri: uri.into(),
        }
    }
}

/// Wire form of the identifiers resource, both request answer and payload:
/// `{"identifierToUri": [{"identifier": "...", "uri": "..."}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiersAndUris {
    /// The pairs.
    #[serde(default)]
    pub identifier_to_uri: Vec<IdentifierToUri>,
}

/// Catalog able to translate identifiers to URIs in bulk.
///
/// Identifiers the catalog does not know are left out of the answer rather
/// than reported as errors; the resolver decides what a missing one means.
/// Transport failures are reported as [`ResolveError::Catalog`](crate::ResolveError::Catalog).
pub trait IdentifierCatalog: Send + Sync {
    /// Looks up the URIs of the given identifiers.
    fn uris_by_identifiers(&self, identifiers: &[String]) -> ResolveResult<Vec<IdentifierToUri>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MockCatalog {
        uris: HashMap<String, String>,
    }

    impl IdentifierCatalog for MockCatalog {
        fn uris_by_identifiers(&self, identifiers: &[String]) -> ResolveResult<Vec<IdentifierToUri>> {
            Ok(identifiers
                .iter()
                .filter_map(|id| {
                    self.uris
                        .get(id)
                        .map(|uri| IdentifierToUri::new(id.clone(), uri.clone()))
                })
                .collect())
        }
    }

    #[test]
    fn test_mock_catalog_skips_unknown() {
        let catalog = MockCatalog {
            uris: HashMap::from([("a".to_string(), "/gdc/md/p/obj/1".to_string())]),
        };
        let answer = catalog
            .uris_by_identifiers(&["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(answer, vec![IdentifierToUri::new("a", "/gdc/md/p/obj/1")]);
    }

    #[test]
    fn test_identifiers_and_uris_wire() {
        let json = r#"{"identifierToUri":[{"identifier":"label.id","uri":"/gdc/md/p/obj/5"}]}"#;
        let parsed: IdentifiersAndUris = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.identifier_to_uri,
            vec![IdentifierToUri::new("label.id", "/gdc/md/p/obj/5")]
        );
        assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
    }
}
