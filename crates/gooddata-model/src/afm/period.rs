//! Measures shifted in time against date data sets or date attributes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::converter::ObjQualifierConverter;
use crate::error::{not_empty, not_empty_vec, ModelError, ModelResult};
use crate::qualifier::{ObjQualifier, UriObjQualifier};
use crate::rewrite::{copy_all_if_necessary, QualifiedObject};

/// Date data set a previous period measure is shifted by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousPeriodDateDataSet {
    data_set: ObjQualifier,
    periods_ago: i32,
}

impl PreviousPeriodDateDataSet {
    /// Pairs a date data set with the number of periods to shift by.
    pub fn new(data_set: ObjQualifier, periods_ago: i32) -> Self {
        Self {
            data_set,
            periods_ago,
        }
    }

    /// The date data set.
    pub fn data_set(&self) -> &ObjQualifier {
        &self.data_set
    }

    /// How many periods back (negative means forward).
    pub fn periods_ago(&self) -> i32 {
        self.periods_ago
    }
}

impl QualifiedObject for PreviousPeriodDateDataSet {
    fn obj_qualifier(&self) -> &ObjQualifier {
        &self.data_set
    }

    fn with_uri_qualifier(self, qualifier: UriObjQualifier) -> Self {
        Self::new(qualifier.into(), self.periods_ago)
    }
}

impl std::fmt::Display for PreviousPeriodDateDataSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.data_set, self.periods_ago)
    }
}

/// Period over period measure used for the previous period comparison.
///
/// References any number of date data sets, so it has no single qualifier;
/// use [`obj_qualifiers`](Self::obj_qualifiers). It is always ad-hoc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PreviousPeriodWire")]
pub struct PreviousPeriodMeasureDefinition {
    measure_identifier: String,
    date_data_sets: Vec<PreviousPeriodDateDataSet>,
}

impl PreviousPeriodMeasureDefinition {
    /// Creates the definition.
    ///
    /// `measure_identifier` is the local identifier of the measure being
    /// shifted. Fails when it or `date_data_sets` is empty.
    pub fn new(
        measure_identifier: impl Into<String>,
        date_data_sets: Vec<PreviousPeriodDateDataSet>,
    ) -> ModelResult<Self> {
        Ok(Self {
            measure_identifier: not_empty(measure_identifier.into(), "measureIdentifier")?,
            date_data_sets: not_empty_vec(date_data_sets, "dateDataSets")?,
        })
    }

    /// Local identifier of the measure this one refers to.
    pub fn measure_identifier(&self) -> &str {
        &self.measure_identifier
    }

    /// Date data sets defining the shift, in request order.
    pub fn date_data_sets(&self) -> &[PreviousPeriodDateDataSet] {
        &self.date_data_sets
    }

    /// Distinct qualifiers of all date data sets.
    pub fn obj_qualifiers(&self) -> HashSet<&ObjQualifier> {
        self.date_data_sets.iter().map(|d| d.data_set()).collect()
    }

    /// Always true.
    pub fn is_ad_hoc(&self) -> bool {
        true
    }

    /// Rewrites identifier qualifiers to URIs, reusing date data sets that
    /// already carry one.
    pub fn into_obj_uri_qualifiers<C>(self, converter: &C) -> Result<Self, C::Error>
    where
        C: ObjQualifierConverter + ?Sized,
    {
        Ok(Self {
            measure_identifier: self.measure_identifier,
            date_data_sets: copy_all_if_necessary(self.date_data_sets, converter)?,
        })
    }

    /// Same as [`into_obj_uri_qualifiers`](Self::into_obj_uri_qualifiers), leaving `self` intact.
    pub fn with_obj_uri_qualifiers<C>(&self, converter: &C) -> Result<Self, C::Error>
    where
        C: ObjQualifierConverter + ?Sized,
    {
        self.clone().into_obj_uri_qualifiers(converter)
    }
}

impl std::fmt::Display for PreviousPeriodMeasureDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "previousPeriodMeasure({}", self.measure_identifier)?;
        for d in &self.date_data_sets {
            write!(f, ", {}", d)?;
        }
        write!(f, ")")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviousPeriodWire {
    measure_identifier: String,
    date_data_sets: Vec<PreviousPeriodDateDataSet>,
}

impl TryFrom<PreviousPeriodWire> for PreviousPeriodMeasureDefinition {
    type Error = ModelError;

    fn try_from(wire: PreviousPeriodWire) -> Result<Self, Self::Error> {
        Self::new(wire.measure_identifier, wire.date_data_sets)
    }
}

/// Date attribute an over period measure is shifted by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverPeriodDateAttribute {
    attribute: ObjQualifier,
    periods_ago: i32,
}

impl OverPeriodDateAttribute {
    /// Pairs a date attribute with the number of periods to shift by.
    pub fn new(attribute: ObjQualifier, periods_ago: i32) -> Self {
        Self {
            attribute,
            periods_ago,
        }
    }

    /// The date attribute.
    pub fn attribute(&self) -> &ObjQualifier {
        &self.attribute
    }

    /// How many periods back (negative means forward).
    pub fn periods_ago(&self) -> i32 {
        self.periods_ago
    }
}

impl QualifiedObject for OverPeriodDateAttribute {
    fn obj_qualifier(&self) -> &ObjQualifier {
        &self.attribute
    }

    fn with_uri_qualifier(self, qualifier: UriObjQualifier) -> Self {
        Self::new(qualifier.into(), self.periods_ago)
    }
}

impl std::fmt::Display for OverPeriodDateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.attribute, self.periods_ago)
    }
}

/// Over period measure: the same period of a different year, quarter and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "OverPeriodWire")]
pub struct OverPeriodMeasureDefinition {
    measure_identifier: String,
    date_attributes: Vec<OverPeriodDateAttribute>,
}

impl OverPeriodMeasureDefinition {
    /// Creates the definition. Fails when either argument is empty.
    pub fn new(
        measure_identifier: impl Into<String>,
        date_attributes: Vec<OverPeriodDateAttribute>,
    ) -> ModelResult<Self> {
        Ok(Self {
            measure_identifier: not_empty(measure_identifier.into(), "measureIdentifier")?,
            date_attributes: not_empty_vec(date_attributes, "dateAttributes")?,
        })
    }

    /// Local identifier of the measure this one refers to.
    pub fn measure_identifier(&self) -> &str {
        &self.measure_identifier
    }

    /// Date attributes defining the shift.
    pub fn date_attributes(&self) -> &[OverPeriodDateAttribute] {
        &self.date_attributes
    }

    /// Distinct qualifiers of all date attributes.
    pub fn obj_qualifiers(&self) -> HashSet<&ObjQualifier> {
        self.date_attributes.iter().map(|d| d.attribute()).collect()
    }

    /// Always true.
    pub fn is_ad_hoc(&self) -> bool {
        true
    }

    /// Rewrites identifier qualifiers to URIs.
    pub fn into_obj_uri_qualifiers<C>(self, converter: &C) -> Result<Self, C::Error>
    where
        C: ObjQualifierConverter + ?Sized,
    {
        Ok(Self {
            measure_identifier: self.measure_identifier,
            date_attributes: copy_all_if_necessary(self.date_attributes, converter)?,
        })
    }

    /// Same as [`into_obj_uri_qualifiers`](Self::into_obj_uri_qualifiers), leaving `self` intact.
    pub fn with_obj_uri_qualifiers<C>(&self, converter: &C) -> Result<Self, C::Error>
    where
        C: ObjQualifierConverter + ?Sized,
    {
        self.clone().into_obj_uri_qualifiers(converter)
    }
}

impl std::fmt::Display for OverPeriodMeasureDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "overPeriodMeasure({}", self.measure_identifier)?;
        for d in &self.date_attributes {
            write!(f, ", {}", d)?;
        }
        write!(f, ")")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverPeriodWire {
    measure_identifier: String,
    date_attributes: Vec<OverPeriodDateAttribute>,
}

impl TryFrom<OverPeriodWire> for OverPeriodMeasureDefinition {
    type Error = ModelError;

    fn try_from(wire: OverPeriodWire) -> Result<Self, Self::Error> {
        Self::new(wire.measure_identifier, wire.date_attributes)
    }
}
