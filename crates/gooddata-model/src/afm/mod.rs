//! AFM (attributes, filters, measures) execution request.
//!
//! ## Example
//!
//! ```rust
//! use gooddata_model::afm::{Afm, AttributeItem, MeasureItem, SimpleMeasureDefinition};
//! use gooddata_model::ObjQualifier;
//!
//! let afm = Afm::new(
//!     vec![AttributeItem::new(ObjQualifier::identifier("label.region").unwrap(), "a1").unwrap()],
//!     vec![MeasureItem::new(
//!         SimpleMeasureDefinition::new(ObjQualifier::uri("/gdc/md/p/obj/1").unwrap()).into(),
//!         "m1",
//!     )
//!     .unwrap()],
//! );
//!
//! assert_eq!(afm.identifiers(), vec!["label.region"]);
//! ```

mod measure;
mod period;

pub use measure::{
    Aggregation, ArithmeticMeasureDefinition, ArithmeticOperator, MeasureDefinition,
    PopMeasureDefinition, SimpleMeasureDefinition,
};
pub use period::{
    OverPeriodDateAttribute, OverPeriodMeasureDefinition, PreviousPeriodDateDataSet,
    PreviousPeriodMeasureDefinition,
};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::converter::ObjQualifierConverter;
use crate::error::{not_empty, ModelError, ModelResult};
use crate::qualifier::{ObjQualifier, UriObjQualifier};
use crate::rewrite::{copy_all_if_necessary, QualifiedObject};

/// A measure of the request with its local identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MeasureItemWire")]
pub struct MeasureItem {
    definition: MeasureDefinition,
    local_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

impl MeasureItem {
    /// Creates the item. `local_identifier` must not be empty.
    pub fn new(definition: MeasureDefinition, local_identifier: impl Into<String>) -> ModelResult<Self> {
        Ok(Self {
            definition,
            local_identifier: not_empty(local_identifier.into(), "localIdentifier")?,
            alias: None,
            format: None,
        })
    }

    /// Sets the display alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the number format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// The measure definition.
    pub fn definition(&self) -> &MeasureDefinition {
        &self.definition
    }

    /// Identifier unique within the request.
    pub fn local_identifier(&self) -> &str {
        &self.local_identifier
    }

    /// Display alias.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Number format.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Rewrites the definition's identifier qualifiers to URIs.
    pub fn into_obj_uri_qualifiers<C>(self, converter: &C) -> Result<Self, C::Error>
    where
        C: ObjQualifierConverter + ?Sized,
    {
        Ok(Self {
            definition: self.definition.into_obj_uri_qualifiers(converter)?,
            ..self
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeasureItemWire {
    definition: MeasureDefinition,
    local_identifier: String,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    format: Option<String>,
}

impl TryFrom<MeasureItemWire> for MeasureItem {
    type Error = ModelError;

    fn try_from(wire: MeasureItemWire) -> Result<Self, Self::Error> {
        let mut item = MeasureItem::new(wire.definition, wire.local_identifier)?;
        item.alias = wire.alias;
        item.format = wire.format;
        Ok(item)
    }
}

/// An attribute (display form) of the request with its local identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AttributeItemWire")]
pub struct AttributeItem {
    display_form: ObjQualifier,
    local_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
}

impl AttributeItem {
    /// Creates the item. `local_identifier` must not be empty.
    pub fn new(display_form: ObjQualifier, local_identifier: impl Into<String>) -> ModelResult<Self> {
        Ok(Self {
            display_form,
            local_identifier: not_empty(local_identifier.into(), "localIdentifier")?,
            alias: None,
        })
    }

    /// Sets the display alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The attribute display form.
    pub fn display_form(&self) -> &ObjQualifier {
        &self.display_form
    }

    /// Identifier unique within the request.
    pub fn local_identifier(&self) -> &str {
        &self.local_identifier
    }

    /// Display alias.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

impl QualifiedObject for AttributeItem {
    fn obj_qualifier(&self) -> &ObjQualifier {
        &self.display_form
    }

    fn with_uri_qualifier(self, qualifier: UriObjQualifier) -> Self {
        Self {
            display_form: qualifier.into(),
            ..self
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeItemWire {
    display_form: ObjQualifier,
    local_identifier: String,
    #[serde(default)]
    alias: Option<String>,
}

impl TryFrom<AttributeItemWire> for AttributeItem {
    type Error = ModelError;

    fn try_from(wire: AttributeItemWire) -> Result<Self, Self::Error> {
        let mut item = AttributeItem::new(wire.display_form, wire.local_identifier)?;
        item.alias = wire.alias;
        Ok(item)
    }
}

/// Attributes and measures to compute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Afm {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<AttributeItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    measures: Vec<MeasureItem>,
}

impl Afm {
    /// Creates the request.
    pub fn new(attributes: Vec<AttributeItem>, measures: Vec<MeasureItem>) -> Self {
        Self {
            attributes,
            measures,
        }
    }

    /// Attributes in request order.
    pub fn attributes(&self) -> &[AttributeItem] {
        &self.attributes
    }

    /// Measures in request order.
    pub fn measures(&self) -> &[MeasureItem] {
        &self.measures
    }

    /// Looks up a measure by local identifier.
    pub fn measure(&self, local_identifier: &str) -> Option<&MeasureItem> {
        self.measures
            .iter()
            .find(|m| m.local_identifier() == local_identifier)
    }

    /// Looks up an attribute by local identifier.
    pub fn attribute(&self, local_identifier: &str) -> Option<&AttributeItem> {
        self.attributes
            .iter()
            .find(|a| a.local_identifier() == local_identifier)
    }

    /// Distinct qualifiers of all attributes and measures.
    pub fn obj_qualifiers(&self) -> HashSet<&ObjQualifier> {
        self.attributes
            .iter()
            .map(|a| a.display_form())
            .chain(self.measures.iter().flat_map(|m| m.definition().obj_qualifiers()))
            .collect()
    }

    /// Identifiers that still need to be converted, in first-seen order.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let attributes = self.attributes.iter().map(|a| a.display_form());
        let measures = self.measures.iter().flat_map(|m| ordered_qualifiers(m.definition()));

        attributes
            .chain(measures)
            .filter_map(|q| q.as_identifier().map(|i| i.identifier()))
            .filter(|i| seen.insert(*i))
            .collect()
    }

    /// Rewrites every identifier qualifier in the request to its URI form.
    pub fn into_obj_uri_qualifiers<C>(self, converter: &C) -> Result<Self, C::Error>
    where
        C: ObjQualifierConverter + ?Sized,
    {
        let attributes = copy_all_if_necessary(self.attributes, converter)?;
        let measures = self
            .measures
            .into_iter()
            .map(|m| m.into_obj_uri_qualifiers(converter))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            attributes,
            measures,
        })
    }
}

/// Qualifiers of a definition in storage order (duplicates kept).
fn ordered_qualifiers(definition: &MeasureDefinition) -> Vec<&ObjQualifier> {
    match definition {
        MeasureDefinition::Simple(d) => vec![d.item()],
        MeasureDefinition::PopMeasure(d) => vec![d.pop_attribute()],
        MeasureDefinition::PreviousPeriod(d) => {
            d.date_data_sets().iter().map(|d| d.data_set()).collect()
        }
        MeasureDefinition::OverPeriod(d) => {
            d.date_attributes().iter().map(|d| d.attribute()).collect()
        }
        MeasureDefinition::Arithmetic(_) => Vec::new(),
    }
}
