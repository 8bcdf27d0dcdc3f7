use docdata_core::config::{Group, GroupingConfig};
use docdata_core::error::BuildError;
use docdata_core::model::{SchemaType, StatusCode};
use docdata_core::parse;
use docdata_core::parse::operation::ParamLocation;
use docdata_core::transform::build_collections;
use indexmap::IndexMap;

const CLUSTER: &str = include_str!("fixtures/cluster-api.yaml");

fn grouping_for(entries: &[(&str, &str, i64)]) -> GroupingConfig {
    let mut groups = IndexMap::new();
    let mut collections = IndexMap::new();
    for (collection, label, weight) in entries {
        groups.entry(label.to_string()).or_insert(Group {
            name: label.to_string(),
            weight: *weight,
        });
        collections.insert(collection.to_string(), label.to_string());
    }
    GroupingConfig {
        groups,
        collections,
    }
}

#[test]
fn collections_sorted_by_weight_then_name() {
    let doc = parse::from_yaml(CLUSTER).unwrap();
    let collections = build_collections(&doc, &GroupingConfig::default()).unwrap();

    let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
    // Deployments is orchestration (weight 0); Events and Metrics are both
    // monitoring (weight 2) and tie-break on name.
    assert_eq!(names, ["Deployments", "Events", "Metrics"]);
}

#[test]
fn apex_resource_is_normalized_and_resolved() {
    let doc = parse::from_yaml(CLUSTER).unwrap();
    let collections = build_collections(&doc, &GroupingConfig::default()).unwrap();
    let deployments = &collections[0];

    assert_eq!(deployments.base_path, "/api/deployments");
    assert_eq!(deployments.group.name, "Orchestration");
    assert_eq!(deployments.group.weight, 0);

    let resource = &deployments.resource;
    assert_eq!(resource.name, "Deployment");

    let id = &resource.properties[0];
    assert_eq!(id.name, "id");
    assert!(id.required);
    assert_eq!(id.kind, SchemaType::Primitive("string".to_string()));

    let status = &resource.properties[1];
    assert_eq!(status.kind, SchemaType::Enum);
    assert!(status.required);

    let replicas = &resource.properties[2];
    assert!(!replicas.required);

    // Non-resource reference expands inline and is marked.
    let template = &resource.properties[3];
    assert!(template.is_ref);
    match &template.kind {
        SchemaType::Inline(def) => {
            assert_eq!(def.properties[0].name, "image");
            assert!(def.properties[0].required);
            assert_eq!(def.required, ["image"]);
        }
        other => panic!("expected inline PodTemplate, got {other:?}"),
    }

    // Resource-to-resource reference stays a token.
    let events = &resource.properties[4];
    let items = events.items.as_deref().unwrap();
    assert_eq!(items.kind, SchemaType::Token("Event".to_string()));
    assert!(!items.is_ref);
}

#[test]
fn resource_example_rendering() {
    let doc = parse::from_yaml(CLUSTER).unwrap();
    let collections = build_collections(&doc, &GroupingConfig::default()).unwrap();

    let example = &collections[0].resource.example;
    let expected = "{\n  \
        // A unique identifier assigned by\n  \
        // the scheduler on creation.\n  \
        \"id\": uuid\n  \
        // Current rollout state.\n  \
        \"status\": enum\n  \
        \"replicas\": int32\n  \
        \"template\": {\n    \
        \"image\": string\n    \
        \"labels\": string[]\n  \
        }\n  \
        \"events\": Event[]\n\
        }";
    assert_eq!(example, expected);
}

#[test]
fn paths_filtered_by_base_path_in_document_order() {
    let doc = parse::from_yaml(CLUSTER).unwrap();
    let collections = build_collections(&doc, &GroupingConfig::default()).unwrap();

    let deployments = &collections[0];
    let path_names: Vec<&str> = deployments.paths.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        path_names,
        ["/api/deployments", "/api/deployments/{id}/bundle"]
    );

    let events = collections.iter().find(|c| c.name == "Events").unwrap();
    assert_eq!(events.paths.len(), 1);
    assert_eq!(events.paths[0].name, "/api/events");

    let metrics = collections.iter().find(|c| c.name == "Metrics").unwrap();
    assert!(metrics.paths.is_empty());
}

#[test]
fn responses_sorted_and_lowest_2xx_becomes_model() {
    let doc = parse::from_yaml(CLUSTER).unwrap();
    let collections = build_collections(&doc, &GroupingConfig::default()).unwrap();

    let get = &collections[0].paths[0].methods[0];
    assert_eq!(get.name, "GET");
    assert_eq!(get.description.as_deref(), Some("List deployments."));

    let codes: Vec<StatusCode> = get.responses.iter().map(|r| r.code.clone()).collect();
    assert_eq!(codes, [StatusCode::Numeric(200), StatusCode::Numeric(500)]);

    let model = get.model.as_ref().expect("GET should have a model");
    assert_eq!(model.kind, SchemaType::Array);
    assert_eq!(get.example.as_deref(), Some("Deployment[]"));

    // POST 201 resolves PodTemplate inline and renders a block example.
    let post = &collections[0].paths[0].methods[1];
    assert_eq!(post.name, "POST");
    let model = post.model.as_ref().expect("POST should have a model");
    assert!(model.is_ref);
    assert!(model.kind.is_inline());
    assert_eq!(
        post.example.as_deref(),
        Some("{\n  \"image\": string\n  \"labels\": string[]\n}")
    );
}

#[test]
fn default_response_key_sorts_after_numeric_codes() {
    let doc = parse::from_yaml(
        r##"
swagger: "2.0"
info:
  title: Jobs API
  version: "1.0"
tags:
  - name: Jobs
definitions:
  Job:
    properties:
      id:
        type: string
paths:
  /api/jobs:
    get:
      responses:
        default:
          description: unexpected error
        "200":
          description: OK
          schema:
            $ref: "#/definitions/Job"
"##,
    )
    .unwrap();

    let grouping = grouping_for(&[("Jobs", "orch", 0)]);
    let collections = build_collections(&doc, &grouping).unwrap();

    let get = &collections[0].paths[0].methods[0];
    let codes: Vec<StatusCode> = get.responses.iter().map(|r| r.code.clone()).collect();
    assert_eq!(
        codes,
        [
            StatusCode::Numeric(200),
            StatusCode::Named("default".to_string()),
        ]
    );

    // The model comes from the numeric 2xx response, not the named key.
    assert!(get.model.is_some());

    // Numeric codes serialize as numbers, named keys as strings.
    let json = serde_json::to_value(&get.responses).unwrap();
    assert_eq!(json[0]["code"], 200);
    assert_eq!(json[1]["code"], "default");
}

#[test]
fn file_parameter_regrouped_into_form_data() {
    let doc = parse::from_yaml(CLUSTER).unwrap();
    let collections = build_collections(&doc, &GroupingConfig::default()).unwrap();

    let upload = &collections[0].paths[1].methods[0];
    assert_eq!(upload.name, "POST");
    assert!(!upload.parameters.contains_key(&ParamLocation::Query));

    let form = &upload.parameters[&ParamLocation::FormData];
    let names: Vec<&str> = form.iter().map(|p| p.name.as_str()).collect();
    // Required-first after the move.
    assert_eq!(names, ["bundle", "note"]);
    assert!(form.iter().all(|p| p.location == ParamLocation::FormData));
}

#[test]
fn required_parameters_grouped_first() {
    let doc = parse::from_yaml(CLUSTER).unwrap();
    let collections = build_collections(&doc, &GroupingConfig::default()).unwrap();

    let get = &collections[0].paths[0].methods[0];
    let query = &get.parameters[&ParamLocation::Query];
    let names: Vec<&str> = query.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["status", "limit"]);
}

#[test]
fn unknown_group_aborts_the_build() {
    let doc = parse::from_yaml(CLUSTER).unwrap();
    // A table that knows two of the three collections.
    let grouping = grouping_for(&[
        ("Deployments", "Orchestration", 0),
        ("Events", "Monitoring", 2),
    ]);
    let err = build_collections(&doc, &grouping).unwrap_err();
    match err {
        BuildError::UnknownGroup(name) => assert_eq!(name, "Metrics"),
        other => panic!("expected UnknownGroup, got {other:?}"),
    }
}

#[test]
fn missing_resource_definition_is_an_error() {
    let yaml = r#"
swagger: "2.0"
info:
  title: Broken
  version: "1.0"
tags:
  - name: Ghosts
paths: {}
"#;
    let doc = parse::from_yaml(yaml).unwrap();
    let grouping = grouping_for(&[("Ghosts", "Spooky", 0)]);
    let err = build_collections(&doc, &grouping).unwrap_err();
    match err {
        BuildError::MissingResource {
            collection,
            definition,
        } => {
            assert_eq!(collection, "Ghosts");
            assert_eq!(definition, "Ghost");
        }
        other => panic!("expected MissingResource, got {other:?}"),
    }
}

#[test]
fn dangling_reference_is_an_error() {
    let yaml = r#"
swagger: "2.0"
info:
  title: Broken
  version: "1.0"
tags:
  - name: Jobs
definitions:
  Job:
    properties:
      spec:
        $ref: '#/definitions/Missing'
paths: {}
"#;
    let doc = parse::from_yaml(yaml).unwrap();
    let grouping = grouping_for(&[("Jobs", "Batch", 0)]);
    let err = build_collections(&doc, &grouping).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Missing"), "got: {message}");
}

#[test]
fn cyclic_definitions_resolve_with_a_token() {
    let yaml = r#"
swagger: "2.0"
info:
  title: Graphs
  version: "1.0"
tags:
  - name: Jobs
definitions:
  Job:
    properties:
      graph:
        $ref: '#/definitions/JobGraph'
  JobGraph:
    properties:
      nodes:
        type: array
        items:
          $ref: '#/definitions/JobNode'
  JobNode:
    properties:
      parent:
        $ref: '#/definitions/JobGraph'
paths: {}
"#;
    let doc = parse::from_yaml(yaml).unwrap();
    let grouping = grouping_for(&[("Jobs", "Batch", 0)]);
    let collections = build_collections(&doc, &grouping).unwrap();

    let graph = &collections[0].resource.properties[0];
    let graph_def = match &graph.kind {
        SchemaType::Inline(def) => def,
        other => panic!("expected inline JobGraph, got {other:?}"),
    };
    let node_def = match &graph_def.properties[0].items.as_deref().unwrap().kind {
        SchemaType::Inline(def) => def.clone(),
        other => panic!("expected inline JobNode, got {other:?}"),
    };
    // The back-reference to JobGraph is broken into a token.
    assert_eq!(
        node_def.properties[0].kind,
        SchemaType::Token("JobGraph".to_string())
    );
}

#[test]
fn pipeline_is_idempotent() {
    let doc = parse::from_yaml(CLUSTER).unwrap();
    let grouping = GroupingConfig::default();

    let first = serde_json::to_string_pretty(&build_collections(&doc, &grouping).unwrap()).unwrap();
    let second =
        serde_json::to_string_pretty(&build_collections(&doc, &grouping).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn serialized_shape_matches_site_contract() {
    let doc = parse::from_yaml(CLUSTER).unwrap();
    let collections = build_collections(&doc, &GroupingConfig::default()).unwrap();
    let value = serde_json::to_value(&collections).unwrap();

    let deployments = &value[0];
    assert_eq!(deployments["basePath"], "/api/deployments");
    assert_eq!(deployments["group"]["weight"], 0);

    let template = &deployments["resource"]["properties"][3];
    assert_eq!(template["isRef"], true);
    assert!(template["type"].is_object());

    let events_items = &deployments["resource"]["properties"][4]["items"];
    assert_eq!(events_items["type"], "Event");

    // No reference marker survives in any resolved schema graph. (Body
    // parameter schemas are passed through raw and are the one place a
    // marker may still appear.)
    let resource_json = serde_json::to_string(&deployments["resource"]).unwrap();
    assert!(!resource_json.contains("$ref"));
    for path in deployments["paths"].as_array().unwrap() {
        for method in path["methods"].as_array().unwrap() {
            let responses = serde_json::to_string(&method["responses"]).unwrap();
            assert!(!responses.contains("$ref"));
        }
    }

    // formData grouping serializes under its camelCase key.
    let upload = &deployments["paths"][1]["methods"][0];
    assert!(upload["parameters"]["formData"].is_array());
    assert!(upload["parameters"].get("query").is_none());
}
