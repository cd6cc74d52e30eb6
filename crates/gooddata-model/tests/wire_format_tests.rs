//! Wire format tests for the AFM model.
//!
//! Payloads mirror what the executeAfm resource sends and accepts.

use gooddata_model::afm::{
    Afm, Aggregation, ArithmeticOperator, MeasureDefinition, PreviousPeriodDateDataSet,
    PreviousPeriodMeasureDefinition,
};
use gooddata_model::{
    ExecutionResponse, Header, MaqlDdlLinks, ModelError, ObjQualifier, SimilarVisualization,
};
use serde_json::json;

// =============================================================================
// Measure definitions
// =============================================================================

#[test]
fn test_previous_period_measure_from_json() {
    let json = json!({
        "previousPeriodMeasure": {
            "measureIdentifier": "m1",
            "dateDataSets": [
                {"dataSet": {"uri": "/gdc/md/p/obj/1"}, "periodsAgo": 1},
                {"dataSet": {"identifier": "date.dataset.dt"}, "periodsAgo": -2}
            ]
        }
    });

    let def: MeasureDefinition = serde_json::from_value(json.clone()).unwrap();
    let MeasureDefinition::PreviousPeriod(pp) = &def else {
        panic!("expected previous period measure, got {def:?}");
    };
    assert_eq!(pp.measure_identifier(), "m1");
    assert_eq!(pp.date_data_sets().len(), 2);
    assert_eq!(pp.date_data_sets()[1].periods_ago(), -2);
    assert_eq!(
        pp.date_data_sets()[1].data_set(),
        &ObjQualifier::identifier("date.dataset.dt").unwrap()
    );

    assert_eq!(serde_json::to_value(&def).unwrap(), json);
}

#[test]
fn test_previous_period_measure_rejects_invalid_payload() {
    let empty_sets = json!({
        "previousPeriodMeasure": {"measureIdentifier": "m1", "dateDataSets": []}
    });
    assert!(serde_json::from_value::<MeasureDefinition>(empty_sets).is_err());

    let empty_id = json!({
        "previousPeriodMeasure": {
            "measureIdentifier": "",
            "dateDataSets": [{"dataSet": {"uri": "/ds"}, "periodsAgo": 1}]
        }
    });
    assert!(serde_json::from_value::<MeasureDefinition>(empty_id).is_err());

    let missing = json!({"previousPeriodMeasure": {"measureIdentifier": "m1"}});
    assert!(serde_json::from_value::<MeasureDefinition>(missing).is_err());
}

#[test]
fn test_simple_measure_wire() {
    let json = json!({
        "measure": {
            "item": {"identifier": "fact.amount"},
            "aggregation": "sum",
            "computeRatio": true
        }
    });
    let def: MeasureDefinition = serde_json::from_value(json.clone()).unwrap();
    let MeasureDefinition::Simple(simple) = &def else {
        panic!("expected simple measure");
    };
    assert_eq!(simple.aggregation(), Some(Aggregation::Sum));
    assert!(simple.compute_ratio());
    assert_eq!(serde_json::to_value(&def).unwrap(), json);

    let minimal = json!({"measure": {"item": {"uri": "/gdc/md/p/obj/2"}}});
    let def: MeasureDefinition = serde_json::from_value(minimal.clone()).unwrap();
    assert!(!def.is_ad_hoc());
    assert_eq!(serde_json::to_value(&def).unwrap(), minimal);
}

#[test]
fn test_other_measure_variants_wire() {
    let pop = json!({
        "popMeasure": {"measureIdentifier": "m1", "popAttribute": {"uri": "/gdc/md/p/obj/9"}}
    });
    let over = json!({
        "overPeriodMeasure": {
            "measureIdentifier": "m1",
            "dateAttributes": [{"attribute": {"identifier": "date.year"}, "periodsAgo": 1}]
        }
    });
    let arithmetic = json!({
        "arithmeticMeasure": {"measureIdentifiers": ["m1", "m2"], "operator": "change"}
    });

    for json in [pop, over, arithmetic.clone()] {
        let def: MeasureDefinition = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&def).unwrap(), json);
    }

    let MeasureDefinition::Arithmetic(def) =
        serde_json::from_value::<MeasureDefinition>(arithmetic).unwrap()
    else {
        panic!("expected arithmetic measure");
    };
    assert_eq!(def.operator(), ArithmeticOperator::Change);
}

#[test]
fn test_unknown_measure_type_rejected() {
    let json = json!({"unknownMeasure": {"measureIdentifier": "m1"}});
    assert!(serde_json::from_value::<MeasureDefinition>(json).is_err());
}

// =============================================================================
// AFM
// =============================================================================

#[test]
fn test_afm_round_trip() {
    let json = json!({
        "attributes": [
            {"displayForm": {"identifier": "label.region"}, "localIdentifier": "a1"}
        ],
        "measures": [
            {
                "definition": {"measure": {"item": {"uri": "/gdc/md/p/obj/1"}}},
                "localIdentifier": "m1",
                "alias": "Revenue",
                "format": "#,##0"
            },
            {
                "definition": {
                    "previousPeriodMeasure": {
                        "measureIdentifier": "m1",
                        "dateDataSets": [{"dataSet": {"identifier": "date.ds"}, "periodsAgo": 1}]
                    }
                },
                "localIdentifier": "m2"
            }
        ]
    });

    let afm: Afm = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(afm.identifiers(), vec!["label.region", "date.ds"]);
    assert_eq!(afm.measure("m1").and_then(|m| m.format()), Some("#,##0"));
    assert_eq!(serde_json::to_value(&afm).unwrap(), json);
}

#[test]
fn test_afm_rejects_empty_local_identifier() {
    let json = json!({
        "measures": [{
            "definition": {"measure": {"item": {"uri": "/m"}}},
            "localIdentifier": ""
        }]
    });
    assert!(serde_json::from_value::<Afm>(json).is_err());
}

#[test]
fn test_built_definition_serializes() {
    let def: MeasureDefinition = PreviousPeriodMeasureDefinition::new(
        "m1",
        vec![PreviousPeriodDateDataSet::new(
            ObjQualifier::uri("/gdc/md/p/obj/5").unwrap(),
            0,
        )],
    )
    .unwrap()
    .into();

    assert_eq!(
        serde_json::to_string(&def).unwrap(),
        r#"{"previousPeriodMeasure":{"measureIdentifier":"m1","dateDataSets":[{"dataSet":{"uri":"/gdc/md/p/obj/5"},"periodsAgo":0}]}}"#
    );
}

// =============================================================================
// Execution response
// =============================================================================

#[test]
fn test_execution_response_from_server_payload() {
    let json = json!({
        "executionResponse": {
            "dimensions": [
                {
                    "headers": [
                        {
                            "attributeHeader": {
                                "name": "Region",
                                "localIdentifier": "a1",
                                "uri": "/gdc/md/p/obj/10",
                                "identifier": "label.region",
                                "formOf": {
                                    "name": "Region",
                                    "uri": "/gdc/md/p/obj/11",
                                    "identifier": "attr.region"
                                }
                            }
                        }
                    ]
                },
                {
                    "headers": [
                        {
                            "measureGroupHeader": {
                                "items": [
                                    {
                                        "measureHeaderItem": {
                                            "name": "Revenue",
                                            "format": "#,##0",
                                            "localIdentifier": "m1",
                                            "uri": "/gdc/md/p/obj/1",
                                            "identifier": "metric.revenue"
                                        }
                                    }
                                ]
                            }
                        }
                    ]
                }
            ],
            "links": {"executionResult": "/gdc/app/projects/p/executionResults/1?q=a&c=b"},
            "similarVisualizations": [{"score": 0.75, "uri": "/gdc/md/p/obj/99"}]
        }
    });

    let response: ExecutionResponse = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(
        response.execution_result_uri().unwrap(),
        "/gdc/app/projects/p/executionResults/1?q=a&c=b"
    );
    assert_eq!(response.dimensions().len(), 2);

    let Header::AttributeHeader(attribute) = &response.dimensions()[0].headers()[0] else {
        panic!("expected attribute header");
    };
    assert_eq!(attribute.form_of.identifier, "attr.region");

    let Header::MeasureGroupHeader(group) = &response.dimensions()[1].headers()[0] else {
        panic!("expected measure group header");
    };
    assert_eq!(group.items[0].measure_header_item.local_identifier, "m1");

    let similar = response.similar_visualizations().unwrap();
    assert_eq!(similar[0].uri, "/gdc/md/p/obj/99");
    assert_eq!(similar[0].score.as_f64(), Some(0.75));

    assert_eq!(serde_json::to_value(&response).unwrap(), json);
}

#[test]
fn test_execution_response_without_links_fails_on_access() {
    let json = json!({"executionResponse": {"dimensions": [], "links": {"other": "/x"}}});
    let response: ExecutionResponse = serde_json::from_value(json).unwrap();
    assert!(matches!(
        response.execution_result_uri(),
        Err(ModelError::IllegalState(_))
    ));
}

#[test]
fn test_execution_response_requires_links_field() {
    let json = json!({"executionResponse": {"dimensions": []}});
    assert!(serde_json::from_value::<ExecutionResponse>(json).is_err());
}

#[test]
fn test_constructed_response_serializes() {
    let response = ExecutionResponse::new(vec![], "https://x/1", None).unwrap();
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"executionResponse": {"dimensions": [], "links": {"executionResult": "https://x/1"}}})
    );
}

// =============================================================================
// MAQL DDL links
// =============================================================================

#[test]
fn test_maql_ddl_links_from_server_payload() {
    let json = json!({
        "entries": [
            {"category": "tasks-status", "link": "/gdc/md/p/tasks/abc/status"}
        ]
    });
    let links: MaqlDdlLinks = serde_json::from_value(json).unwrap();
    assert_eq!(links.status_uri(), Some("/gdc/md/p/tasks/abc/status"));

    let none: MaqlDdlLinks = serde_json::from_value(json!({"entries": []})).unwrap();
    assert_eq!(none.status_uri(), None);
}

// =============================================================================
// Similar visualization scores
// =============================================================================

#[test]
fn test_similar_visualization_score_keeps_all_digits() {
    let json = r#"{"score":0.12345678901234567890123,"uri":"/gdc/md/p/obj/99"}"#;
    let similar: SimilarVisualization = serde_json::from_str(json).unwrap();
    assert_eq!(similar.score.to_string(), "0.12345678901234567890123");
    assert_eq!(serde_json::to_string(&similar).unwrap(), json);

    let response = json!({
        "executionResponse": {
            "dimensions": [],
            "links": {"executionResult": "/r"},
            "similarVisualizations": [similar]
        }
    });
    let parsed: ExecutionResponse = serde_json::from_value(response).unwrap();
    assert_eq!(
        parsed.similar_visualizations().unwrap()[0].score.to_string(),
        "0.12345678901234567890123"
    );
}

#[test]
fn test_similar_visualization_accepts_string_score() {
    let similar: SimilarVisualization =
        serde_json::from_str(r#"{"score":"0.5","uri":"/gdc/md/p/obj/1"}"#).unwrap();
    assert_eq!(similar.score.as_f64(), Some(0.5));
    assert_eq!(
        serde_json::to_string(&similar).unwrap(),
        r#"{"score":0.5,"uri":"/gdc/md/p/obj/1"}"#
    );

    assert!(serde_json::from_str::<SimilarVisualization>(r#"{"score":"high","uri":"/u"}"#).is_err());
    assert!(serde_json::from_str::<SimilarVisualization>(r#"{"score":true,"uri":"/u"}"#).is_err());
}
