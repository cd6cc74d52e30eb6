//! Measure definitions of an AFM request.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::period::{OverPeriodMeasureDefinition, PreviousPeriodMeasureDefinition};
use crate::converter::ObjQualifierConverter;
use crate::error::{not_empty, ModelError, ModelResult};
use crate::qualifier::{ObjQualifier, UriObjQualifier};
use crate::rewrite::{copy_if_necessary, QualifiedObject};

// =============================================================================
// Simple measure
// =============================================================================

/// Aggregation applied to a fact or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// `sum`
    Sum,
    /// `count`
    Count,
    /// `avg`
    Avg,
    /// `min`
    Min,
    /// `max`
    Max,
    /// `median`
    Median,
    /// `runsum`
    Runsum,
}

impl std::fmt::Display for Aggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Aggregation::Sum => "sum",
            Aggregation::Count => "count",
            Aggregation::Avg => "avg",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::Median => "median",
            Aggregation::Runsum => "runsum",
        };
        f.write_str(name)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Measure computed from a single catalog item (metric, fact or attribute).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMeasureDefinition {
    item: ObjQualifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aggregation: Option<Aggregation>,
    #[serde(default, skip_serializing_if = "is_false")]
    compute_ratio: bool,
}

impl SimpleMeasureDefinition {
    /// Creates a measure over `item` with no aggregation.
    pub fn new(item: ObjQualifier) -> Self {
        Self {
            item,
            aggregation: None,
            compute_ratio: false,
        }
    }

    /// Sets the aggregation.
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    /// Sets whether the measure is computed as a ratio.
    pub fn with_compute_ratio(mut self, compute_ratio: bool) -> Self {
        self.compute_ratio = compute_ratio;
        self
    }

    /// The measured item.
    pub fn item(&self) -> &ObjQualifier {
        &self.item
    }

    /// The aggregation, if any.
    pub fn aggregation(&self) -> Option<Aggregation> {
        self.aggregation
    }

    /// Whether the measure is computed as a ratio.
    pub fn compute_ratio(&self) -> bool {
        self.compute_ratio
    }

    /// The single qualifier of this measure.
    pub fn obj_qualifier(&self) -> &ObjQualifier {
        &self.item
    }

    /// Ad-hoc when it aggregates or computes a ratio; otherwise it is the
    /// catalog metric itself.
    pub fn is_ad_hoc(&self) -> bool {
        self.aggregation.is_some() || self.compute_ratio
    }
}

impl QualifiedObject for SimpleMeasureDefinition {
    fn obj_qualifier(&self) -> &ObjQualifier {
        &self.item
    }

    fn with_uri_qualifier(self, qualifier: UriObjQualifier) -> Self {
        Self {
            item: qualifier.into(),
            ..self
        }
    }
}

impl std::fmt::Display for SimpleMeasureDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "measure({}", self.item)?;
        if let Some(aggregation) = self.aggregation {
            write!(f, ", aggregation={}", aggregation)?;
        }
        if self.compute_ratio {
            write!(f, ", computeRatio")?;
        }
        write!(f, ")")
    }
}

// =============================================================================
// Period over period (same period previous year)
// =============================================================================

/// Period over period measure shifted along a single date attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PopWire")]
pub struct PopMeasureDefinition {
    measure_identifier: String,
    pop_attribute: ObjQualifier,
}

impl PopMeasureDefinition {
    /// Creates the definition. `measure_identifier` must not be empty.
    pub fn new(measure_identifier: impl Into<String>, pop_attribute: ObjQualifier) -> ModelResult<Self> {
        Ok(Self {
            measure_identifier: not_empty(measure_identifier.into(), "measureIdentifier")?,
            pop_attribute,
        })
    }

    /// Local identifier of the measure this one refers to.
    pub fn measure_identifier(&self) -> &str {
        &self.measure_identifier
    }

    /// The date attribute.
    pub fn pop_attribute(&self) -> &ObjQualifier {
        &self.pop_attribute
    }

    /// The single qualifier of this measure.
    pub fn obj_qualifier(&self) -> &ObjQualifier {
        &self.pop_attribute
    }
}

impl QualifiedObject for PopMeasureDefinition {
    fn obj_qualifier(&self) -> &ObjQualifier {
        &self.pop_attribute
    }

    fn with_uri_qualifier(self, qualifier: UriObjQualifier) -> Self {
        Self {
            pop_attribute: qualifier.into(),
            ..self
        }
    }
}

impl std::fmt::Display for PopMeasureDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "popMeasure({}, {})", self.measure_identifier, self.pop_attribute)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PopWire {
    measure_identifier: String,
    pop_attribute: ObjQualifier,
}

impl TryFrom<PopWire> for PopMeasureDefinition {
    type Error = ModelError;

    fn try_from(wire: PopWire) -> Result<Self, Self::Error> {
        Self::new(wire.measure_identifier, wire.pop_attribute)
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

/// Operator combining the measures of an arithmetic measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithmeticOperator {
    /// Sum of all measures.
    Sum,
    /// First minus second.
    Difference,
    /// Product of all measures.
    Multiplication,
    /// First divided by second.
    Ratio,
    /// Relative change from second to first.
    Change,
}

impl std::fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArithmeticOperator::Sum => "sum",
            ArithmeticOperator::Difference => "difference",
            ArithmeticOperator::Multiplication => "multiplication",
            ArithmeticOperator::Ratio => "ratio",
            ArithmeticOperator::Change => "change",
        };
        f.write_str(name)
    }
}

/// Measure computed from other measures of the same request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ArithmeticWire")]
pub struct ArithmeticMeasureDefinition {
    measure_identifiers: Vec<String>,
    operator: ArithmeticOperator,
}

impl ArithmeticMeasureDefinition {
    /// Creates the definition. Needs at least one non-empty local identifier.
    pub fn new(measure_identifiers: Vec<String>, operator: ArithmeticOperator) -> ModelResult<Self> {
        if measure_identifiers.is_empty() {
            return Err(ModelError::empty("measureIdentifiers"));
        }
        if measure_identifiers.iter().any(String::is_empty) {
            return Err(ModelError::IllegalArgument {
                name: "measureIdentifiers",
                message: "may not contain empty identifiers".to_string(),
            });
        }
        Ok(Self {
            measure_identifiers,
            operator,
        })
    }

    /// Local identifiers of the combined measures.
    pub fn measure_identifiers(&self) -> &[String] {
        &self.measure_identifiers
    }

    /// The operator.
    pub fn operator(&self) -> ArithmeticOperator {
        self.operator
    }
}

impl std::fmt::Display for ArithmeticMeasureDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "arithmeticMeasure({}, {})",
            self.operator,
            self.measure_identifiers.join(", ")
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArithmeticWire {
    measure_identifiers: Vec<String>,
    operator: ArithmeticOperator,
}

impl TryFrom<ArithmeticWire> for ArithmeticMeasureDefinition {
    type Error = ModelError;

    fn try_from(wire: ArithmeticWire) -> Result<Self, Self::Error> {
        Self::new(wire.measure_identifiers, wire.operator)
    }
}

// =============================================================================
// MeasureDefinition
// =============================================================================

/// Definition of how a measure is computed.
///
/// Serialized in a wrapper object named after the variant, e.g.
/// `{"previousPeriodMeasure": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureDefinition {
    /// Catalog item, optionally aggregated.
    #[serde(rename = "measure")]
    Simple(SimpleMeasureDefinition),
    /// Same period previous year along one date attribute.
    #[serde(rename = "popMeasure")]
    PopMeasure(PopMeasureDefinition),
    /// Previous period along date data sets.
    #[serde(rename = "previousPeriodMeasure")]
    PreviousPeriod(PreviousPeriodMeasureDefinition),
    /// Same period of another year/quarter/... along date attributes.
    #[serde(rename = "overPeriodMeasure")]
    OverPeriod(OverPeriodMeasureDefinition),
    /// Arithmetic over other measures.
    #[serde(rename = "arithmeticMeasure")]
    Arithmetic(ArithmeticMeasureDefinition),
}

impl MeasureDefinition {
    /// Distinct qualifiers this definition refers to.
    pub fn obj_qualifiers(&self) -> HashSet<&ObjQualifier> {
        match self {
            MeasureDefinition::Simple(d) => HashSet::from([d.obj_qualifier()]),
            MeasureDefinition::PopMeasure(d) => HashSet::from([d.obj_qualifier()]),
            MeasureDefinition::PreviousPeriod(d) => d.obj_qualifiers(),
            MeasureDefinition::OverPeriod(d) => d.obj_qualifiers(),
            MeasureDefinition::Arithmetic(_) => HashSet::new(),
        }
    }

    /// The single qualifier of a definition that has exactly one.
    ///
    /// Fails with [`ModelError::UnsupportedOperation`] for definitions that
    /// reference several objects (or none); use
    /// [`obj_qualifiers`](Self::obj_qualifiers) for those.
    pub fn obj_qualifier(&self) -> ModelResult<&ObjQualifier> {
        match self {
            MeasureDefinition::Simple(d) => Ok(d.obj_qualifier()),
            MeasureDefinition::PopMeasure(d) => Ok(d.obj_qualifier()),
            _ => Err(ModelError::UnsupportedOperation("obj_qualifier")),
        }
    }

    /// Replaces the single qualifier of a definition that has exactly one.
    ///
    /// Fails with [`ModelError::UnsupportedOperation`] otherwise; use
    /// [`with_obj_uri_qualifiers`](Self::with_obj_uri_qualifiers) instead.
    pub fn with_obj_uri_qualifier(&self, qualifier: UriObjQualifier) -> ModelResult<Self> {
        match self {
            MeasureDefinition::Simple(d) => {
                Ok(MeasureDefinition::Simple(d.clone().with_uri_qualifier(qualifier)))
            }
            MeasureDefinition::PopMeasure(d) => {
                Ok(MeasureDefinition::PopMeasure(d.clone().with_uri_qualifier(qualifier)))
            }
            _ => Err(ModelError::UnsupportedOperation("with_obj_uri_qualifier")),
        }
    }

    /// Rewrites every identifier qualifier to its URI form.
    ///
    /// The definition itself is always rebuilt; parts that already use
    /// URIs are moved over unchanged.
    pub fn into_obj_uri_qualifiers<C>(self, converter: &C) -> Result<Self, C::Error>
    where
        C: ObjQualifierConverter + ?Sized,
    {
        Ok(match self {
            MeasureDefinition::Simple(d) => MeasureDefinition::Simple(copy_if_necessary(d, converter)?),
            MeasureDefinition::PopMeasure(d) => {
                MeasureDefinition::PopMeasure(copy_if_necessary(d, converter)?)
            }
            MeasureDefinition::PreviousPeriod(d) => {
                MeasureDefinition::PreviousPeriod(d.into_obj_uri_qualifiers(converter)?)
            }
            MeasureDefinition::OverPeriod(d) => {
                MeasureDefinition::OverPeriod(d.into_obj_uri_qualifiers(converter)?)
            }
            MeasureDefinition::Arithmetic(d) => MeasureDefinition::Arithmetic(d),
        })
    }

    /// Same as [`into_obj_uri_qualifiers`](Self::into_obj_uri_qualifiers), leaving `self` intact.
    pub fn with_obj_uri_qualifiers<C>(&self, converter: &C) -> Result<Self, C::Error>
    where
        C: ObjQualifierConverter + ?Sized,
    {
        self.clone().into_obj_uri_qualifiers(converter)
    }

    /// Whether the measure exists only in this request and not in the catalog.
    pub fn is_ad_hoc(&self) -> bool {
        match self {
            MeasureDefinition::Simple(d) => d.is_ad_hoc(),
            MeasureDefinition::PreviousPeriod(d) => d.is_ad_hoc(),
            MeasureDefinition::OverPeriod(d) => d.is_ad_hoc(),
            MeasureDefinition::PopMeasure(_) | MeasureDefinition::Arithmetic(_) => true,
        }
    }

    /// Local identifiers of sibling measures this definition depends on.
    pub fn measure_identifiers(&self) -> Vec<&str> {
        match self {
            MeasureDefinition::Simple(_) => Vec::new(),
            MeasureDefinition::PopMeasure(d) => vec![d.measure_identifier()],
            MeasureDefinition::PreviousPeriod(d) => vec![d.measure_identifier()],
            MeasureDefinition::OverPeriod(d) => vec![d.measure_identifier()],
            MeasureDefinition::Arithmetic(d) => {
                d.measure_identifiers().iter().map(String::as_str).collect()
            }
        }
    }
}

impl From<SimpleMeasureDefinition> for MeasureDefinition {
    fn from(d: SimpleMeasureDefinition) -> Self {
        MeasureDefinition::Simple(d)
    }
}

impl From<PopMeasureDefinition> for MeasureDefinition {
    fn from(d: PopMeasureDefinition) -> Self {
        MeasureDefinition::PopMeasure(d)
    }
}

impl From<PreviousPeriodMeasureDefinition> for MeasureDefinition {
    fn from(d: PreviousPeriodMeasureDefinition) -> Self {
        MeasureDefinition::PreviousPeriod(d)
    }
}

impl From<OverPeriodMeasureDefinition> for MeasureDefinition {
    fn from(d: OverPeriodMeasureDefinition) -> Self {
        MeasureDefinition::OverPeriod(d)
    }
}

impl From<ArithmeticMeasureDefinition> for MeasureDefinition {
    fn from(d: ArithmeticMeasureDefinition) -> Self {
        MeasureDefinition::Arithmetic(d)
    }
}

impl std::fmt::Display for MeasureDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasureDefinition::Simple(d) => d.fmt(f),
            MeasureDefinition::PopMeasure(d) => d.fmt(f),
            MeasureDefinition::PreviousPeriod(d) => d.fmt(f),
            MeasureDefinition::OverPeriod(d) => d.fmt(f),
            MeasureDefinition::Arithmetic(d) => d.fmt(f),
        }
    }
}
