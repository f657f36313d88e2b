mod common;

use common::{options, Recorder, ENDPOINT};
use parcelvoy::{Alias, Event, Identify, IdentityClient, Track};
use serde_json::json;

fn make_client(recorder: &Recorder) -> IdentityClient {
    IdentityClient::with_transport(options(), recorder.clone()).unwrap()
}

#[test]
fn fresh_client_fills_anonymous_id_and_null_external_id() {
    let recorder = Recorder::new();
    let client = make_client(&recorder);

    client
        .track(Track::new("signup").property("plan", "pro"))
        .unwrap();

    let req = recorder.last();
    assert_eq!(req.url, format!("{ENDPOINT}/client/track"));
    assert_eq!(
        req.body,
        format!(
            r#"{{"event":"signup","anonymous_id":"{}","external_id":null,"data":{{"plan":"pro"}}}}"#,
            client.anonymous_id()
        )
    );
}

#[test]
fn anonymous_id_is_stable_per_instance_and_unique_across_instances() {
    let recorder = Recorder::new();
    let a = make_client(&recorder);
    let b = make_client(&recorder);

    assert_eq!(a.anonymous_id().len(), 36);
    assert_ne!(a.anonymous_id(), b.anonymous_id());

    a.track(Track::new("one")).unwrap();
    let first = recorder.last_json()["anonymous_id"].clone();
    a.identify(Identify::new("u1")).unwrap();
    a.track(Track::new("two")).unwrap();
    let second = recorder.last_json()["anonymous_id"].clone();

    assert_eq!(first, json!(a.anonymous_id()));
    assert_eq!(first, second);
}

#[test]
fn identify_sets_external_id_for_later_calls() {
    let recorder = Recorder::new();
    let client = make_client(&recorder);

    client.identify(Identify::new("user-42")).unwrap();
    assert_eq!(
        recorder.last_json(),
        json!({"external_id": "user-42", "anonymous_id": client.anonymous_id(), "data": {}})
    );

    client.track(Track::new("purchase")).unwrap();
    assert_eq!(recorder.last_json()["external_id"], "user-42");

    client
        .events(vec![Event::new("a"), Event::new("b")])
        .unwrap();
    let batch = recorder.last_json();
    assert_eq!(batch[0]["external_id"], "user-42");
    assert_eq!(batch[1]["external_id"], "user-42");
    assert_eq!(batch[1]["anonymous_id"], client.anonymous_id());
}

#[test]
fn track_override_is_call_scoped() {
    let recorder = Recorder::new();
    let client = make_client(&recorder);
    client.identify(Identify::new("cached")).unwrap();

    client
        .track(Track::new("x").external_id("override").anonymous_id("anon-override"))
        .unwrap();
    let body = recorder.last_json();
    assert_eq!(body["external_id"], "override");
    assert_eq!(body["anonymous_id"], "anon-override");

    assert_eq!(client.external_id().as_deref(), Some("cached"));
    client.track(Track::new("y")).unwrap();
    assert_eq!(recorder.last_json()["external_id"], "cached");
}

#[test]
fn events_override_applies_per_item() {
    let recorder = Recorder::new();
    let client = make_client(&recorder);

    client
        .events(vec![Event::new("a").external_id("e-a"), Event::new("b")])
        .unwrap();

    let batch = recorder.last_json();
    assert_eq!(batch[0]["external_id"], "e-a");
    assert_eq!(batch[1]["external_id"], json!(null));
    assert_eq!(client.external_id(), None);
}

#[test]
fn identify_keeps_explicit_anonymous_id() {
    let recorder = Recorder::new();
    let client = make_client(&recorder);

    client
        .identify(Identify::new("u1").anonymous_id("from-cookie"))
        .unwrap();

    assert_eq!(recorder.last_json()["anonymous_id"], "from-cookie");
}

#[test]
fn alias_forwards_ids_as_given_and_caches_external_id() {
    let recorder = Recorder::new();
    let client = make_client(&recorder);

    client.alias(Alias::new("a1", "e1")).unwrap();

    let req = recorder.last();
    assert_eq!(req.url, format!("{ENDPOINT}/client/identify"));
    assert_eq!(req.body, r#"{"anonymous_id":"a1","external_id":"e1"}"#);
    assert_eq!(client.external_id().as_deref(), Some("e1"));

    client.track(Track::new("after_alias")).unwrap();
    assert_eq!(recorder.last_json()["external_id"], "e1");
}

#[test]
fn empty_events_does_not_fail() {
    let recorder = Recorder::new();
    let client = make_client(&recorder);

    client.events(Vec::new()).unwrap();
    assert_eq!(recorder.last().body, "[]");
}
