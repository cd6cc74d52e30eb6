//! Response to an AFM execution request.
//!
//! Carries the result dimensions with their headers and the (polling) link
//! to the execution result.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{not_empty, ModelError, ModelResult};

const EXECUTION_RESULT_LINK: &str = "executionResult";

/// Response on an execution request.
///
/// Serialized as `{"executionResponse": {"dimensions": [...], "links": {...}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ExecutionResponseEnvelope", from = "ExecutionResponseEnvelope")]
pub struct ExecutionResponse {
    dimensions: Vec<ResultDimension>,
    links: IndexMap<String, String>,
    similar_visualizations: Option<Vec<SimilarVisualization>>,
}

impl ExecutionResponse {
    /// Creates a response pointing at the given execution result.
    ///
    /// Fails when `execution_result_uri` is empty.
    pub fn new(
        dimensions: Vec<ResultDimension>,
        execution_result_uri: impl Into<String>,
        similar_visualizations: Option<Vec<SimilarVisualization>>,
    ) -> ModelResult<Self> {
        let uri = not_empty(execution_result_uri.into(), "executionResultUri")?;
        let mut links = IndexMap::new();
        links.insert(EXECUTION_RESULT_LINK.to_string(), uri);
        Ok(Self {
            dimensions,
            links,
            similar_visualizations,
        })
    }

    /// Dimensions describing the result.
    pub fn dimensions(&self) -> &[ResultDimension] {
        &self.dimensions
    }

    /// Links of the response in payload order.
    pub fn links(&self) -> &IndexMap<String, String> {
        &self.links
    }

    /// Visualizations similar to the executed one, when the server sent any.
    pub fn similar_visualizations(&self) -> Option<&[SimilarVisualization]> {
        self.similar_visualizations.as_deref()
    }

    /// URI of the data result.
    ///
    /// A well-formed response always has it, so a missing link is reported
    /// as [`ModelError::IllegalState`].
    pub fn execution_result_uri(&self) -> ModelResult<&str> {
        self.links
            .get(EXECUTION_RESULT_LINK)
            .map(String::as_str)
            .ok_or_else(|| ModelError::IllegalState(EXECUTION_RESULT_LINK.to_string()))
    }
}

impl std::fmt::Display for ExecutionResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExecutionResponse[dimensions={}, links={{", self.dimensions.len())?;
        for (i, (category, uri)) in self.links.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", category, uri)?;
        }
        write!(f, "}}]")
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionResponseBody {
    dimensions: Vec<ResultDimension>,
    links: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    similar_visualizations: Option<Vec<SimilarVisualization>>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ExecutionResponseEnvelope {
    ExecutionResponse(ExecutionResponseBody),
}

impl From<ExecutionResponse> for ExecutionResponseEnvelope {
    fn from(r: ExecutionResponse) -> Self {
        ExecutionResponseEnvelope::ExecutionResponse(ExecutionResponseBody {
            dimensions: r.dimensions,
            links: r.links,
            similar_visualizations: r.similar_visualizations,
        })
    }
}

impl From<ExecutionResponseEnvelope> for ExecutionResponse {
    fn from(envelope: ExecutionResponseEnvelope) -> Self {
        let ExecutionResponseEnvelope::ExecutionResponse(body) = envelope;
        Self {
            dimensions: body.dimensions,
            links: body.links,
            similar_visualizations: body.similar_visualizations,
        }
    }
}

/// Visualization similar to the executed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarVisualization {
    /// Similarity score, kept with the exact digits the server sent.
    ///
    /// Older servers send the score as a JSON string; it is accepted and
    /// written back as a number.
    #[serde(deserialize_with = "number_or_string")]
    pub score: serde_json::Number,
    /// Visualization URI.
    pub uri: String,
}

impl SimilarVisualization {
    /// Creates a scored reference.
    pub fn new(score: serde_json::Number, uri: impl Into<String>) -> Self {
        Self {
            score,
            uri: uri.into(),
        }
    }
}

// Goes through `Value` rather than an untagged enum: buffered untagged
// content loses arbitrary precision numbers.
fn number_or_string<'de, D>(deserializer: D) -> Result<serde_json::Number, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => Ok(n),
        serde_json::Value::String(s) => serde_json::from_str::<serde_json::Number>(s.trim())
            .map_err(|_| D::Error::custom(format!("invalid score: {s:?}"))),
        other => Err(D::Error::custom(format!("invalid score: {other}"))),
    }
}

/// One dimension of the result with its headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDimension {
    headers: Vec<Header>,
}

impl ResultDimension {
    /// Creates a dimension.
    pub fn new(headers: Vec<Header>) -> Self {
        Self { headers }
    }

    /// Headers of the dimension.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }
}

/// Header of a result dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Header {
    /// Group of measures.
    MeasureGroupHeader(MeasureGroupHeader),
    /// Attribute.
    AttributeHeader(AttributeHeader),
}

/// Header listing the measures of a dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureGroupHeader {
    /// The measures.
    pub items: Vec<MeasureHeaderItemWrapper>,
}

/// Wire wrapper around [`MeasureHeaderItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureHeaderItemWrapper {
    /// The wrapped item.
    pub measure_header_item: MeasureHeaderItem,
}

/// A measure in a measure group header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureHeaderItem {
    /// Display name.
    pub name: String,
    /// Number format.
    pub format: String,
    /// Local identifier from the request.
    pub local_identifier: String,
    /// Catalog URI, for catalog measures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Catalog identifier, for catalog measures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// Header describing an attribute of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeHeader {
    /// Display form name.
    pub name: String,
    /// Local identifier from the request.
    pub local_identifier: String,
    /// Display form URI.
    pub uri: String,
    /// Display form identifier.
    pub identifier: String,
    /// Attribute the display form belongs to.
    pub form_of: AttributeInHeader,
    /// Totals per header item, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<Vec<TotalHeaderItem>>,
}

/// Attribute a display form belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInHeader {
    /// Attribute name.
    pub name: String,
    /// Attribute URI.
    pub uri: String,
    /// Attribute identifier.
    pub identifier: String,
}

/// Total header item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalHeaderItem {
    /// Total type, e.g. `sum`.
    pub name: String,
}
