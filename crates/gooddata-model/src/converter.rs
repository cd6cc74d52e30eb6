//! Conversion of identifier qualifiers into URI qualifiers.
//!
//! The model never talks to the platform itself. Whoever owns a connection
//! to the metadata catalog implements [`ObjQualifierConverter`] and hands it
//! to the rewrite methods (`with_obj_uri_qualifiers` and friends).
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use gooddata_model::{IdentifierObjQualifier, ObjQualifierConverter, UriObjQualifier};
//!
//! struct Catalog(HashMap<String, String>);
//!
//! impl ObjQualifierConverter for Catalog {
//!     type Error = String;
//!
//!     fn convert_to_uri_qualifier(
//!         &self,
//!         qualifier: &IdentifierObjQualifier,
//!     ) -> Result<UriObjQualifier, String> {
//!         let uri = self
//!             .0
//!             .get(qualifier.identifier())
//!             .ok_or_else(|| format!("not found: {}", qualifier.identifier()))?;
//!         UriObjQualifier::new(uri.clone()).map_err(|e| e.to_string())
//!     }
//! }
//! ```

use crate::qualifier::{IdentifierObjQualifier, UriObjQualifier};

/// Converts identifier qualifiers to their current URI form.
///
/// Failures (typically "identifier not found") are reported through the
/// implementor's own error type and reach the caller of the rewrite
/// unchanged.
pub trait ObjQualifierConverter {
    /// Error reported when a conversion is not possible.
    type Error;

    /// Looks up the URI form of an identifier qualifier.
    fn convert_to_uri_qualifier(
        &self,
        qualifier: &IdentifierObjQualifier,
    ) -> Result<UriObjQualifier, Self::Error>;
}

impl<C: ObjQualifierConverter + ?Sized> ObjQualifierConverter for &C {
    type Error = C::Error;

    fn convert_to_uri_qualifier(
        &self,
        qualifier: &IdentifierObjQualifier,
    ) -> Result<UriObjQualifier, Self::Error> {
        (**self).convert_to_uri_qualifier(qualifier)
    }
}

/// Adapts a closure into a converter.
///
/// ```rust
/// use gooddata_model::{FnConverter, ObjQualifierConverter, IdentifierObjQualifier, UriObjQualifier};
///
/// let converter = FnConverter::new(|q: &IdentifierObjQualifier| {
///     UriObjQualifier::new(format!("/gdc/md/p/obj/{}", q.identifier().len()))
/// });
/// let id = IdentifierObjQualifier::new("abc").unwrap();
/// assert_eq!(converter.convert_to_uri_qualifier(&id).unwrap().uri(), "/gdc/md/p/obj/3");
/// ```
pub struct FnConverter<F>(F);

impl<F> FnConverter<F> {
    /// Wraps the closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F, E> ObjQualifierConverter for FnConverter<F>
where
    F: Fn(&IdentifierObjQualifier) -> Result<UriObjQualifier, E>,
{
    type Error = E;

    fn convert_to_uri_qualifier(
        &self,
        qualifier: &IdentifierObjQualifier,
    ) -> Result<UriObjQualifier, E> {
        (self.0)(qualifier)
    }
}
