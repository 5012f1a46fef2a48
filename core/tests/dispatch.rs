//! Dispatch properties of `Endpoint` and `ActionMap`, checked against a
//! transport that records every request it receives.

use std::cell::RefCell;

use endpoint_core::{ActionMap, Endpoint, EndpointConfig, EndpointError, HttpMethod, HttpRequest};
use serde_json::{json, Value};

/// Records requests and answers each with a sequence number.
#[derive(Default)]
struct Recorder {
    sent: RefCell<Vec<HttpRequest>>,
}

impl Recorder {
    fn transport(&self) -> impl Fn(HttpRequest) -> usize + '_ {
        move |request| {
            let mut sent = self.sent.borrow_mut();
            sent.push(request);
            sent.len()
        }
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

#[test]
fn add_then_get_returns_exactly_what_was_registered() {
    let mut map = ActionMap::new();
    let entries = [
        ("read", "/a/:id", HttpMethod::Get),
        ("publish", "/a/:id/publish", HttpMethod::Put),
        ("purge", "/a", HttpMethod::from_token("purge")),
    ];
    for (name, path, verb) in &entries {
        map.add(*name, *path, Some(verb.clone()));
    }
    for (name, path, verb) in &entries {
        let action = map.get(name).unwrap();
        assert_eq!(action.path(), *path, "{name}");
        assert_eq!(action.verb(), Some(verb), "{name}");
    }
    for name in ["browse", "create", "", "READ"] {
        assert!(
            matches!(map.get(name), Err(EndpointError::ActionNotFound { .. })),
            "{name} should be missing"
        );
    }
}

#[test]
fn rest_endpoint_uses_rest_verbs() {
    let recorder = Recorder::default();
    let endpoint = Endpoint::new(recorder.transport(), EndpointConfig::rest("/widgets"));

    endpoint.index(None::<Value>).unwrap();
    endpoint.create(json!({})).unwrap();
    endpoint.read(1).unwrap();
    endpoint.update(json!({"id": 1})).unwrap();
    endpoint.delete(1).unwrap();

    let methods: Vec<HttpMethod> = recorder.sent().into_iter().map(|r| r.method).collect();
    assert_eq!(
        methods,
        vec![
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Get,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ]
    );
    assert!(recorder.sent().iter().all(|r| r.path == "/widgets"));
}

#[test]
fn explicit_endpoint_uses_explicit_verbs() {
    let recorder = Recorder::default();
    let endpoint = Endpoint::new(
        recorder.transport(),
        EndpointConfig::explicit([
            ("update", "/widgets/save"),
            ("delete", "/widgets/remove"),
        ]),
    );

    endpoint.update(json!({"id": 1})).unwrap();
    endpoint.delete(1).unwrap();

    let sent = recorder.sent();
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].path, "/widgets/save");
    assert_eq!(sent[1].method, HttpMethod::Post);
    assert_eq!(sent[1].path, "/widgets/remove");
}

#[test]
fn validation_failures_never_reach_the_transport() {
    let recorder = Recorder::default();
    let endpoint = Endpoint::new(recorder.transport(), EndpointConfig::rest("/widgets"));

    assert!(endpoint.create(Value::Null).is_err());
    assert!(endpoint.create(None::<Value>).is_err());
    assert!(endpoint.create("x").is_err());
    assert!(endpoint.create(vec![1, 2]).is_err());
    assert!(endpoint.update(true).is_err());
    assert!(endpoint.read(None::<u64>).is_err());
    assert!(endpoint.delete(()).is_err());

    assert!(recorder.sent().is_empty());
}

#[test]
fn missing_action_never_reaches_the_transport() {
    let recorder = Recorder::default();
    let endpoint = Endpoint::new(
        recorder.transport(),
        EndpointConfig::explicit([("create", "/widgets")]),
    );

    let err = endpoint.index(None::<Value>).unwrap_err();
    assert_eq!(
        err,
        EndpointError::ActionNotFound {
            name: "browse".to_string()
        }
    );
    assert!(recorder.sent().is_empty());
}

#[test]
fn index_passes_data_through_unvalidated() {
    let recorder = Recorder::default();
    let endpoint = Endpoint::new(recorder.transport(), EndpointConfig::rest("/widgets"));

    endpoint.index(None::<Value>).unwrap();
    endpoint.index(Some("anything")).unwrap();
    endpoint.index(Some(vec![1, 2])).unwrap();

    let data: Vec<Option<Value>> = recorder.sent().into_iter().map(|r| r.data).collect();
    assert_eq!(data, vec![None, Some(json!("anything")), Some(json!([1, 2]))]);
}

#[test]
fn transport_output_is_returned_as_is() {
    let recorder = Recorder::default();
    let endpoint = Endpoint::new(recorder.transport(), EndpointConfig::rest("/widgets"));

    assert_eq!(endpoint.read(0).unwrap(), 1);
    assert_eq!(endpoint.read(0).unwrap(), 2);
    assert_eq!(recorder.sent()[0].data, Some(json!(0)));
}

#[test]
fn failing_transport_result_passes_through() {
    let endpoint = Endpoint::new(
        |request: HttpRequest| -> Result<(), String> { Err(format!("refused {}", request.path)) },
        EndpointConfig::rest("/widgets"),
    );

    let outcome = endpoint.read(1).unwrap();
    assert_eq!(outcome, Err("refused /widgets".to_string()));
}

#[test]
fn lookups_do_not_mutate_the_map() {
    let endpoint = Endpoint::new(|_: HttpRequest| (), EndpointConfig::rest("/widgets"));
    let before: Vec<_> = endpoint
        .actions()
        .iter()
        .map(|(name, action)| (name.to_string(), action.clone()))
        .collect();

    endpoint.read(1).unwrap();
    let _ = endpoint.call("missing", None);
    let first = endpoint.actions().get("read").unwrap().clone();
    let second = endpoint.actions().get("read").unwrap().clone();
    assert_eq!(first, second);

    let after: Vec<_> = endpoint
        .actions()
        .iter()
        .map(|(name, action)| (name.to_string(), action.clone()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn actions_added_by_hand_keep_their_verbs() {
    let mut actions = ActionMap::new();
    actions.add("publish", "/widgets/:id/publish", Some(HttpMethod::Put));
    actions.add("browse", "/widgets", Some(HttpMethod::Get));

    let recorder = Recorder::default();
    let endpoint = Endpoint::from_actions(recorder.transport(), actions);

    endpoint.call("publish", Some(json!(1))).unwrap();
    endpoint.index(None::<Value>).unwrap();

    let sent = recorder.sent();
    assert_eq!(sent[0].method, HttpMethod::Put);
    assert_eq!(sent[0].path, "/widgets/:id/publish");
    assert_eq!(sent[0].data, Some(json!(1)));
    assert_eq!(sent[1].method, HttpMethod::Get);
    assert!(matches!(
        endpoint.create(json!({})),
        Err(EndpointError::ActionNotFound { .. })
    ));
}

#[test]
fn explicit_configuration_keeps_its_key_order() {
    let config: EndpointConfig =
        serde_json::from_str(r#"{"update":"/w/u","create":"/w","read":"/w/:id"}"#).unwrap();
    let endpoint = Endpoint::new(|_: HttpRequest| (), config);
    let names: Vec<&str> = endpoint.actions().iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["update", "create", "read"]);
}
