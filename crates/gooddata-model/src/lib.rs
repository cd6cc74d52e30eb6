//! # gooddata-model
//!
//! Typed model of the GoodData analytics platform payloads used by the
//! executeAfm and MAQL DDL resources.
//!
//! This crate provides:
//! - **Qualifiers**: references to catalog objects by URI or identifier
//! - **AFM**: measure definitions, attribute and measure items
//! - **Rewriting**: conversion of identifier references into URI references
//!   through a caller-supplied [`ObjQualifierConverter`]
//! - **Responses**: execution responses and link entries
//!
//! All values are immutable once built; "modifying" one produces a new value.
//!
//! ## Usage
//!
//! ```rust
//! use gooddata_model::afm::{MeasureDefinition, PreviousPeriodDateDataSet, PreviousPeriodMeasureDefinition};
//! use gooddata_model::{FnConverter, IdentifierObjQualifier, ObjQualifier, UriObjQualifier};
//!
//! let definition: MeasureDefinition = PreviousPeriodMeasureDefinition::new(
//!     "m1",
//!     vec![PreviousPeriodDateDataSet::new(ObjQualifier::identifier("date.dataset.dt").unwrap(), 1)],
//! )
//! .unwrap()
//! .into();
//!
//! let converter = FnConverter::new(|_: &IdentifierObjQualifier| UriObjQualifier::new("/gdc/md/p/obj/7"));
//! let rewritten = definition.with_obj_uri_qualifiers(&converter).unwrap();
//! assert!(rewritten.obj_qualifiers().iter().all(|q| q.is_uri()));
//! ```
//!
//! ## Wire format
//!
//! | Type | JSON |
//! |------|------|
//! | URI qualifier | `{"uri": "/gdc/md/p/obj/1"}` |
//! | Identifier qualifier | `{"identifier": "label.id"}` |
//! | Previous period measure | `{"previousPeriodMeasure": {"measureIdentifier": "m1", "dateDataSets": [...]}}` |
//! | Execution response | `{"executionResponse": {"dimensions": [...], "links": {...}}}` |
//! | MAQL DDL links | `{"entries": [{"category": "tasks-status", "link": "..."}]}` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod afm;
mod converter;
mod error;
mod links;
mod project;
mod qualifier;
mod reference;
mod response;
mod rewrite;

pub use converter::{FnConverter, ObjQualifierConverter};
pub use error::{ModelError, ModelResult};
pub use links::{LinkEntries, LinkEntry, MaqlDdlLinks};
pub use project::ProjectUsersUpdateError;
pub use qualifier::{IdentifierObjQualifier, ObjQualifier, UriObjQualifier};
pub use reference::parse_reference;
pub use response::{
    AttributeHeader, AttributeInHeader, ExecutionResponse, Header, MeasureGroupHeader,
    MeasureHeaderItem, MeasureHeaderItemWrapper, ResultDimension, SimilarVisualization,
    TotalHeaderItem,
};
pub use rewrite::{copy_all_if_necessary, copy_if_necessary, QualifiedObject};
