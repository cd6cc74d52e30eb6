//! Converter backed by an already resolved identifier map.

use std::collections::HashMap;

use gooddata_model::{IdentifierObjQualifier, ObjQualifierConverter, UriObjQualifier};

use crate::error::ResolveError;
use crate::traits::IdentifierToUri;

/// [`ObjQualifierConverter`] answering from a fixed identifier-to-URI map.
///
/// Identifiers missing from the map fail with
/// [`ResolveError::IdentifierNotFound`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapConverter {
    uris: HashMap<String, UriObjQualifier>,
}

impl MapConverter {
    /// Creates an empty converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapping, replacing any previous URI of the identifier.
    pub fn insert(&mut self, identifier: impl Into<String>, uri: UriObjQualifier) {
        self.uris.insert(identifier.into(), uri);
    }

    /// Returns the URI an identifier maps to.
    pub fn get(&self, identifier: &str) -> Option<&UriObjQualifier> {
        self.uris.get(identifier)
    }

    /// Number of known identifiers.
    pub fn len(&self) -> usize {
        self.uris.len()
    }

    /// Returns true if no identifier is known.
    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }
}

impl TryFrom<Vec<IdentifierToUri>> for MapConverter {
    type Error = ResolveError;

    fn try_from(pairs: Vec<IdentifierToUri>) -> Result<Self, Self::Error> {
        let mut converter = Self::new();
        for pair in pairs {
            converter.insert(pair.identifier, UriObjQualifier::new(pair.uri)?);
        }
        Ok(converter)
    }
}

impl ObjQualifierConverter for MapConverter {
    type Error = ResolveError;

    fn convert_to_uri_qualifier(
        &self,
        qualifier: &IdentifierObjQualifier,
    ) -> Result<UriObjQualifier, ResolveError> {
        self.uris
            .get(qualifier.identifier())
            .cloned()
            .ok_or_else(|| ResolveError::IdentifierNotFound(qualifier.identifier().to_string()))
    }
}
