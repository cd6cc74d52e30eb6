//! Batch resolution of identifier qualifiers.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use gooddata_model::afm::{Afm, MeasureDefinition};
use gooddata_model::{IdentifierObjQualifier, ObjQualifierConverter, UriObjQualifier};
use tracing::{debug, trace};

use crate::cache::UriCache;
use crate::config::ResolverConfig;
use crate::converter::MapConverter;
use crate::error::{ResolveError, ResolveResult};
use crate::result::{ResolutionStats, Resolved};
use crate::traits::IdentifierCatalog;

/// Rewrites AFM values so that every object is referenced by URI.
///
/// The resolver collects the identifiers a value still uses, asks the
/// catalog for them in batches and then runs the copy-if-necessary rewrite
/// with the answers. With a cache configured, identifiers seen before are
/// not sent to the catalog again until their entry expires.
///
/// # Example
///
/// ```rust
/// use gooddata_model::afm::{MeasureDefinition, SimpleMeasureDefinition};
/// use gooddata_model::ObjQualifier;
/// use gooddata_resolver::{IdentifierCatalog, IdentifierToUri, QualifierResolver, ResolveResult};
///
/// struct Catalog;
///
/// impl IdentifierCatalog for Catalog {
///     fn uris_by_identifiers(&self, ids: &[String]) -> ResolveResult<Vec<IdentifierToUri>> {
///         Ok(ids.iter().map(|id| IdentifierToUri::new(id.clone(), "/gdc/md/p/obj/1")).collect())
///     }
/// }
///
/// let catalog = Catalog;
/// let resolver = QualifierResolver::new(&catalog);
/// let measure: MeasureDefinition =
///     SimpleMeasureDefinition::new(ObjQualifier::identifier("fact.amount").unwrap()).into();
///
/// let resolved = resolver.resolve_measure(measure).unwrap();
/// assert_eq!(resolved.stats.catalog_lookups, 1);
/// assert!(resolved.value.obj_qualifier().unwrap().is_uri());
/// ```
pub struct QualifierResolver<'a> {
    catalog: &'a dyn IdentifierCatalog,
    config: ResolverConfig,
    cache: Option<Arc<UriCache>>,
}

impl<'a> QualifierResolver<'a> {
    /// Creates a resolver with default configuration (no cache).
    ///
    /// # Arguments
    ///
    /// * `catalog` - Catalog answering identifier lookups.
    pub fn new(catalog: &'a dyn IdentifierCatalog) -> Self {
        Self::with_config(catalog, ResolverConfig::default())
    }

    /// Creates a resolver with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Catalog answering identifier lookups.
    /// * `config` - Batch size and optional cache settings.
    pub fn with_config(catalog: &'a dyn IdentifierCatalog, config: ResolverConfig) -> Self {
        let cache = config.cache.as_ref().map(|c| Arc::new(UriCache::new(c)));

        Self {
            catalog,
            config,
            cache,
        }
    }

    /// Returns the cache, if enabled.
    pub fn cache(&self) -> Option<&UriCache> {
        self.cache.as_deref()
    }

    /// Returns the resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Builds a converter knowing the URIs of the given identifiers.
    ///
    /// Duplicates are looked up once. Cached identifiers are served from the
    /// cache; the rest are sent to the catalog in chunks of at most
    /// `batch_size`, and the answers are cached. Catalog answers for
    /// identifiers that were not asked for are ignored.
    ///
    /// # Arguments
    ///
    /// * `identifiers` - Identifiers to resolve, in any order.
    ///
    /// # Returns
    ///
    /// * `Ok((MapConverter, ResolutionStats))` - Converter for every identifier
    ///   the catalog knows. Converting one it does not know fails later with
    ///   [`ResolveError::IdentifierNotFound`].
    /// * `Err(ResolveError)` - If the catalog fails or answers with an empty URI.
    pub fn converter_for<I, S>(&self, identifiers: I) -> ResolveResult<(MapConverter, ResolutionStats)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let mut stats = ResolutionStats::default();
        let mut converter = MapConverter::new();
        let mut seen = HashSet::new();
        let mut pending = Vec::new();

        for identifier in identifiers {
            let identifier = identifier.as_ref();
            if !seen.insert(identifier.to_string()) {
                continue;
            }
            stats.requested += 1;

            match self.cache.as_ref().and_then(|cache| cache.get(identifier)) {
                Some(uri) => {
                    trace!(identifier, uri = %uri, "identifier served from cache");
                    converter.insert(identifier, UriObjQualifier::new(uri)?);
                    stats.cache_hits += 1;
                }
                None => pending.push(identifier.to_string()),
            }
        }

        for batch in pending.chunks(self.config.batch_size.max(1)) {
            debug!(count = batch.len(), "looking up identifiers in catalog");
            let answer = self.catalog.uris_by_identifiers(batch)?;
            stats.catalog_lookups += 1;

            let requested: HashSet<&str> = batch.iter().map(String::as_str).collect();
            for pair in answer {
                if !requested.contains(pair.identifier.as_str()) {
                    debug!(identifier = %pair.identifier, "ignoring unrequested catalog answer");
                    continue;
                }
                let uri = UriObjQualifier::new(pair.uri)?;
                if let Some(ref cache) = self.cache {
                    cache.set(pair.identifier.clone(), uri.uri().to_string());
                }
                converter.insert(pair.identifier, uri);
            }
        }

        stats.duration = start.elapsed();
        debug!(
            requested = stats.requested,
            cache_hits = stats.cache_hits,
            catalog_lookups = stats.catalog_lookups,
            "identifiers resolved"
        );
        Ok((converter, stats))
    }

    /// Rewrites a measure definition to URI qualifiers.
    ///
    /// # Returns
    ///
    /// * `Ok(Resolved<MeasureDefinition>)` - The rewritten definition and stats
    /// * `Err(ResolveError)` - If an identifier is unknown or the catalog fails
    pub fn resolve_measure(&self, definition: MeasureDefinition) -> ResolveResult<Resolved<MeasureDefinition>> {
        let mut identifiers: Vec<String> = definition
            .obj_qualifiers()
            .into_iter()
            .filter_map(|q| q.as_identifier())
            .map(|q| q.identifier().to_string())
            .collect();
        identifiers.sort_unstable();

        let (converter, stats) = self.converter_for(&identifiers)?;
        let definition = definition.into_obj_uri_qualifiers(&converter)?;
        Ok(Resolved::new(definition, stats))
    }

    /// Rewrites every attribute and measure of an AFM to URI qualifiers.
    ///
    /// Identifiers are sent to the catalog in first-seen order.
    pub fn resolve_afm(&self, afm: Afm) -> ResolveResult<Resolved<Afm>> {
        let identifiers: Vec<String> = afm.identifiers().into_iter().map(str::to_string).collect();

        let (converter, stats) = self.converter_for(&identifiers)?;
        let afm = afm.into_obj_uri_qualifiers(&converter)?;
        Ok(Resolved::new(afm, stats))
    }
}

impl ObjQualifierConverter for QualifierResolver<'_> {
    type Error = ResolveError;

    fn convert_to_uri_qualifier(
        &self,
        qualifier: &IdentifierObjQualifier,
    ) -> Result<UriObjQualifier, ResolveError> {
        let (converter, _) = self.converter_for([qualifier.identifier()])?;
        converter.convert_to_uri_qualifier(qualifier)
    }
}

impl std::fmt::Debug for QualifierResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualifierResolver")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
