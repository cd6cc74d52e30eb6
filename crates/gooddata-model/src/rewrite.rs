//! Copy-if-necessary rewriting of qualifier-bearing values.
//!
//! A value whose qualifier is already a URI is handed back as-is (moved,
//! never reallocated). A value addressed by identifier is rebuilt through
//! [`QualifiedObject::with_uri_qualifier`] with the converter's answer and
//! all of its other fields untouched.

use tracing::trace;

use crate::converter::ObjQualifierConverter;
use crate::qualifier::{ObjQualifier, UriObjQualifier};

/// A value holding exactly one object qualifier.
pub trait QualifiedObject: Sized {
    /// The qualifier this value refers to.
    fn obj_qualifier(&self) -> &ObjQualifier;

    /// Rebuilds the value with the qualifier replaced, keeping the other fields.
    fn with_uri_qualifier(self, qualifier: UriObjQualifier) -> Self;
}

/// Returns `original` untouched when its qualifier is a URI, otherwise a copy
/// carrying the converted URI qualifier.
///
/// Converter errors are returned unchanged.
pub fn copy_if_necessary<T, C>(original: T, converter: &C) -> Result<T, C::Error>
where
    T: QualifiedObject,
    C: ObjQualifierConverter + ?Sized,
{
    let resolved = match original.obj_qualifier() {
        ObjQualifier::Uri(_) => None,
        ObjQualifier::Identifier(identifier) => {
            let uri = converter.convert_to_uri_qualifier(identifier)?;
            trace!(identifier = identifier.identifier(), uri = uri.uri(), "resolved qualifier");
            Some(uri)
        }
    };

    Ok(match resolved {
        Some(uri) => original.with_uri_qualifier(uri),
        None => original,
    })
}

/// Applies [`copy_if_necessary`] to every element, preserving order.
///
/// Stops at the first converter error.
pub fn copy_all_if_necessary<T, C, I>(items: I, converter: &C) -> Result<Vec<T>, C::Error>
where
    T: QualifiedObject,
    C: ObjQualifierConverter + ?Sized,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .map(|item| copy_if_necessary(item, converter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::FnConverter;
    use crate::qualifier::IdentifierObjQualifier;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq)]
    struct Holder {
        qualifier: ObjQualifier,
        weight: i32,
    }

    impl QualifiedObject for Holder {
        fn obj_qualifier(&self) -> &ObjQualifier {
            &self.qualifier
        }

        fn with_uri_qualifier(self, qualifier: UriObjQualifier) -> Self {
            Self {
                qualifier: qualifier.into(),
                ..self
            }
        }
    }

    fn holder(q: ObjQualifier, weight: i32) -> Holder {
        Holder {
            qualifier: q,
            weight,
        }
    }

    #[test]
    fn test_uri_qualifier_not_converted() {
        let calls = Cell::new(0);
        let converter = FnConverter::new(|_: &IdentifierObjQualifier| {
            calls.set(calls.get() + 1);
            UriObjQualifier::new("/never")
        });

        let original = holder(ObjQualifier::uri("/gdc/md/p/obj/1").unwrap(), 3);
        let ptr = original.qualifier.as_uri().unwrap().uri().as_ptr();

        let copy = copy_if_necessary(original, &converter).unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(copy.qualifier.as_uri().unwrap().uri().as_ptr(), ptr);
        assert_eq!(copy.weight, 3);
    }

    #[test]
    fn test_identifier_qualifier_converted() {
        let converter = FnConverter::new(|q: &IdentifierObjQualifier| {
            UriObjQualifier::new(format!("/gdc/md/p/obj/{}", q.identifier()))
        });

        let copy = copy_if_necessary(holder(ObjQualifier::identifier("9").unwrap(), -2), &converter)
            .unwrap();
        assert_eq!(copy, holder(ObjQualifier::uri("/gdc/md/p/obj/9").unwrap(), -2));
    }

    #[test]
    fn test_converter_error_propagates() {
        let converter =
            FnConverter::new(|_: &IdentifierObjQualifier| Err::<UriObjQualifier, _>("missing"));
        let result = copy_if_necessary(holder(ObjQualifier::identifier("x").unwrap(), 0), &converter);
        assert_eq!(result, Err("missing"));
    }

    #[test]
    fn test_copy_all_preserves_order() {
        let converter = FnConverter::new(|q: &IdentifierObjQualifier| {
            UriObjQualifier::new(format!("/u/{}", q.identifier()))
        });
        let items = vec![
            holder(ObjQualifier::identifier("a").unwrap(), 1),
            holder(ObjQualifier::uri("/u/keep").unwrap(), 0),
            holder(ObjQualifier::identifier("b").unwrap(), -1),
        ];

        let copied = copy_all_if_necessary(items, &converter).unwrap();
        let uris: Vec<_> = copied
            .iter()
            .map(|h| (h.qualifier.as_uri().unwrap().uri().to_string(), h.weight))
            .collect();
        assert_eq!(
            uris,
            vec![
                ("/u/a".to_string(), 1),
                ("/u/keep".to_string(), 0),
                ("/u/b".to_string(), -1)
            ]
        );
    }
}
