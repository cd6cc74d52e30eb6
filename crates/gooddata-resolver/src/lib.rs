//! # gooddata-resolver
//!
//! Resolution of identifier qualifiers into URI qualifiers for GoodData
//! AFM requests.
//!
//! The executeAfm resource accepts objects referenced by URI. Clients often
//! build requests with stable identifiers instead; this crate collects the
//! identifiers a request uses, looks them up in an [`IdentifierCatalog`] in
//! batches, optionally caches the answers, and rewrites the request.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use gooddata_model::afm::{Afm, AttributeItem};
//! use gooddata_model::ObjQualifier;
//! use gooddata_resolver::{
//!     CacheConfig, IdentifierCatalog, IdentifierToUri, QualifierResolver, ResolveResult,
//!     ResolverConfig,
//! };
//!
//! struct Catalog(HashMap<String, String>);
//!
//! impl IdentifierCatalog for Catalog {
//!     fn uris_by_identifiers(&self, ids: &[String]) -> ResolveResult<Vec<IdentifierToUri>> {
//!         Ok(ids
//!             .iter()
//!             .filter_map(|id| self.0.get(id).map(|uri| IdentifierToUri::new(id.clone(), uri.clone())))
//!             .collect())
//!     }
//! }
//!
//! let catalog = Catalog(HashMap::from([(
//!     "label.region".to_string(),
//!     "/gdc/md/p/obj/12".to_string(),
//! )]));
//! let config = ResolverConfig::builder()
//!     .with_cache(CacheConfig::default())
//!     .build();
//! let resolver = QualifierResolver::with_config(&catalog, config);
//!
//! let afm = Afm::new(
//!     vec![AttributeItem::new(ObjQualifier::identifier("label.region").unwrap(), "a1").unwrap()],
//!     vec![],
//! );
//! let resolved = resolver.resolve_afm(afm).unwrap();
//! assert_eq!(
//!     resolved.value.attribute("a1").unwrap().display_form(),
//!     &ObjQualifier::uri("/gdc/md/p/obj/12").unwrap()
//! );
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod config;
mod converter;
mod error;
mod resolver;
mod result;
mod traits;

pub use cache::{CacheStats, UriCache};
pub use config::{CacheConfig, ResolverConfig, ResolverConfigBuilder, DEFAULT_BATCH_SIZE};
pub use converter::MapConverter;
pub use error::{ResolveError, ResolveResult};
pub use resolver::QualifierResolver;
pub use result::{ResolutionStats, Resolved};
pub use traits::{IdentifierCatalog, IdentifierToUri, IdentifiersAndUris};
