use serde_json::{Map, Value};
use std::time::Duration;

/// Free-form key/value attributes attached to an event or a user.
pub type Properties = Map<String, Value>;

/// How top-level JSON keys are spelled on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyCase {
    /// `anonymousId` is sent as `anonymous_id`.
    #[default]
    Snake,
    /// Keys are sent as declared (`anonymousId`).
    Camel,
}

/// Configuration for the Parcelvoy client.
#[derive(Debug, Clone)]
pub struct Options {
    /// API key sent as a bearer token (required).
    pub api_key: String,
    /// Base URL of the Parcelvoy API, without the `/client/...` path (required).
    pub endpoint: String,
    /// Key spelling of request bodies. Default: snake_case.
    pub key_case: KeyCase,
    /// Overall request timeout. Default: none, the transport decides.
    pub timeout: Option<Duration>,
}

impl Options {
    /// Create options with required fields only; all others use defaults.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            key_case: KeyCase::default(),
            timeout: None,
        }
    }
}

/// A single tracked event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub event: String,
    pub anonymous_id: Option<String>,
    pub external_id: Option<String>,
    pub properties: Properties,
}

impl Track {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..Self::default()
        }
    }

    pub fn anonymous_id(mut self, id: impl Into<String>) -> Self {
        self.anonymous_id = Some(id.into());
        self
    }

    pub fn external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }
}

/// One entry of a batch sent with `events`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub name: String,
    pub anonymous_id: Option<String>,
    pub external_id: Option<String>,
    /// Omitted from the request body when `None`.
    pub properties: Option<Properties>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn anonymous_id(mut self, id: impl Into<String>) -> Self {
        self.anonymous_id = Some(id.into());
        self
    }

    pub fn external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Attributes of a known user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identify {
    pub external_id: String,
    pub anonymous_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub timezone: Option<String>,
    pub locale: Option<String>,
    pub traits: Properties,
}

impl Identify {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            ..Self::default()
        }
    }

    pub fn anonymous_id(mut self, id: impl Into<String>) -> Self {
        self.anonymous_id = Some(id.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn trait_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.traits.insert(key.into(), value.into());
        self
    }
}

/// Links an anonymous visitor to a known user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alias {
    pub anonymous_id: String,
    pub external_id: String,
}

impl Alias {
    pub fn new(anonymous_id: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            anonymous_id: anonymous_id.into(),
            external_id: external_id.into(),
        }
    }
}
