use crate::client::Client;
use crate::error::Result;
use crate::transport::{Response, Transport};
use crate::types::{Alias, Event, Identify, Options, Track};

use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Client that remembers who it is talking about.
///
/// A random anonymous ID is generated once per instance and filled into
/// every call that does not carry its own. The external ID passed to the
/// last `identify` or `alias` is cached and filled in the same way.
/// Per-call overrides on `track`/`events` never touch the cache.
pub struct IdentityClient {
    client: Client,
    anonymous_id: String,
    external_id: Mutex<Option<String>>,
}

impl IdentityClient {
    pub fn new(opts: Options) -> Result<Self> {
        Ok(Self::from_client(Client::new(opts)?))
    }

    pub fn with_transport(opts: Options, transport: impl Transport + 'static) -> Result<Self> {
        Ok(Self::from_client(Client::with_transport(opts, transport)?))
    }

    /// Wrap an existing request client with a fresh identity.
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            anonymous_id: Uuid::new_v4().hyphenated().to_string(),
            external_id: Mutex::new(None),
        }
    }

    pub fn anonymous_id(&self) -> &str {
        &self.anonymous_id
    }

    /// External ID from the most recent `identify` or `alias`, if any.
    pub fn external_id(&self) -> Option<String> {
        self.cached_external_id().clone()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn track(&self, mut track: Track) -> Result<Response> {
        track.anonymous_id.get_or_insert_with(|| self.anonymous_id.clone());
        if track.external_id.is_none() {
            track.external_id = self.external_id();
        }
        self.client.track(&track)
    }

    pub fn events(&self, mut events: Vec<Event>) -> Result<Response> {
        let external_id = self.external_id();
        for event in &mut events {
            event.anonymous_id.get_or_insert_with(|| self.anonymous_id.clone());
            if event.external_id.is_none() {
                event.external_id.clone_from(&external_id);
            }
        }
        self.client.events(&events)
    }

    pub fn identify(&self, mut identify: Identify) -> Result<Response> {
        self.remember(&identify.external_id);
        identify.anonymous_id.get_or_insert_with(|| self.anonymous_id.clone());
        self.client.identify(&identify)
    }

    /// Forwards both IDs as given and caches the external one.
    pub fn alias(&self, alias: Alias) -> Result<Response> {
        self.remember(&alias.external_id);
        self.client.alias(&alias)
    }

    fn remember(&self, external_id: &str) {
        let mut cached = self.cached_external_id();
        if cached.as_deref() != Some(external_id) {
            log::debug!("external ID changed, later events will carry it");
        }
        *cached = Some(external_id.to_string());
    }

    fn cached_external_id(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.external_id.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for IdentityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityClient")
            .field("client", &self.client)
            .field("anonymous_id", &self.anonymous_id)
            .field("external_id", &*self.cached_external_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpRequest;

    struct Unreachable;

    impl Transport for Unreachable {
        fn post(&self, _request: &HttpRequest) -> Result<Response> {
            Err(crate::Error::Transport("connection refused".into()))
        }
    }

    fn client() -> IdentityClient {
        IdentityClient::with_transport(Options::new("pk_test", "https://api.example.com"), Unreachable)
            .unwrap()
    }

    #[test]
    fn anonymous_id_is_canonical_v4() {
        let client = client();
        let id = Uuid::parse_str(client.anonymous_id()).unwrap();
        assert_eq!(client.anonymous_id().len(), 36);
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(id.get_variant(), uuid::Variant::RFC4122);
    }

    #[test]
    fn identify_updates_cache_even_when_send_fails() {
        let client = client();
        assert!(client.identify(Identify::new("u1")).is_err());
        assert_eq!(client.external_id().as_deref(), Some("u1"));
    }

    #[test]
    fn alias_updates_cache() {
        let client = client();
        let _ = client.alias(Alias::new("a1", "e1"));
        assert_eq!(client.external_id().as_deref(), Some("e1"));
    }
}
