//! Request body shaping.
//!
//! Payloads are serialized with camelCase field names and, for
//! [`KeyCase::Snake`], their top-level keys are rewritten to snake_case.
//! Nested values (the `data` map in particular) are sent untouched.

use crate::error::{Error, Result};
use crate::types::{Alias, Event, Identify, KeyCase, Properties, Track};

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackPayload<'a> {
    event: &'a str,
    anonymous_id: Option<&'a str>,
    external_id: Option<&'a str>,
    data: &'a Properties,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventPayload<'a> {
    name: &'a str,
    anonymous_id: Option<&'a str>,
    external_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Properties>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifyPayload<'a> {
    external_id: &'a str,
    anonymous_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    locale: Option<&'a str>,
    data: &'a Properties,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AliasPayload<'a> {
    anonymous_id: &'a str,
    external_id: &'a str,
}

pub(crate) fn track_body(track: &Track, case: KeyCase) -> Result<String> {
    encode(
        &TrackPayload {
            event: &track.event,
            anonymous_id: track.anonymous_id.as_deref(),
            external_id: track.external_id.as_deref(),
            data: &track.properties,
        },
        case,
    )
}

pub(crate) fn events_body(events: &[Event], case: KeyCase) -> Result<String> {
    let payload: Vec<EventPayload<'_>> = events
        .iter()
        .map(|event| EventPayload {
            name: &event.name,
            anonymous_id: event.anonymous_id.as_deref(),
            external_id: event.external_id.as_deref(),
            data: event.properties.as_ref(),
        })
        .collect();
    encode(&payload, case)
}

pub(crate) fn identify_body(identify: &Identify, case: KeyCase) -> Result<String> {
    encode(
        &IdentifyPayload {
            external_id: &identify.external_id,
            anonymous_id: identify.anonymous_id.as_deref(),
            phone: identify.phone.as_deref(),
            email: identify.email.as_deref(),
            timezone: identify.timezone.as_deref(),
            locale: identify.locale.as_deref(),
            data: &identify.traits,
        },
        case,
    )
}

pub(crate) fn alias_body(alias: &Alias, case: KeyCase) -> Result<String> {
    encode(
        &AliasPayload {
            anonymous_id: &alias.anonymous_id,
            external_id: &alias.external_id,
        },
        case,
    )
}

fn encode<T: Serialize>(payload: &T, case: KeyCase) -> Result<String> {
    let value = serde_json::to_value(payload).map_err(Error::Serialize)?;
    let value = match case {
        KeyCase::Snake => normalize_keys(value),
        KeyCase::Camel => value,
    };
    serde_json::to_string(&value).map_err(Error::Serialize)
}

/// Rewrite the keys of an object, or of every object in an array, to
/// snake_case. Values are left as they are.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (camel_to_snake(&key), value))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

/// `anonymousId` -> `anonymous_id`. Every ASCII capital gets an underscore
/// in front of it, then the whole key is lowercased.
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
