//! Process-wide access point.
//!
//! [`Parcelvoy`] holds at most one [`IdentityClient`]. Calls made before
//! [`Parcelvoy::initialize`] (or after [`Parcelvoy::teardown`]) do nothing
//! and return `Ok(None)`, so a missing setup never takes the host
//! application down.

use crate::error::Result;
use crate::identity::IdentityClient;
use crate::transport::Response;
use crate::types::{Alias, Event, Identify, Options, Track};

use std::sync::{Arc, PoisonError, RwLock};

static INSTANCE: RwLock<Option<Arc<IdentityClient>>> = RwLock::new(None);

/// Global Parcelvoy handle.
pub struct Parcelvoy;

impl Parcelvoy {
    /// Build a client from `opts` and make it the global instance,
    /// replacing any previous one. On a configuration error the previous
    /// instance stays in place.
    pub fn initialize(opts: Options) -> Result<()> {
        let client = IdentityClient::new(opts)?;
        Self::install(client);
        Ok(())
    }

    /// Make `client` the global instance. Returns the one it replaced.
    pub fn install(client: IdentityClient) -> Option<Arc<IdentityClient>> {
        let mut slot = INSTANCE.write().unwrap_or_else(PoisonError::into_inner);
        let previous = slot.replace(Arc::new(client));
        if previous.is_some() {
            log::debug!("replaced global Parcelvoy client");
        }
        previous
    }

    /// Remove the global instance. Later calls become no-ops.
    pub fn teardown() -> Option<Arc<IdentityClient>> {
        INSTANCE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn instance() -> Option<Arc<IdentityClient>> {
        INSTANCE
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn track(track: Track) -> Result<Option<Response>> {
        Self::with_instance(|client| client.track(track))
    }

    pub fn events(events: Vec<Event>) -> Result<Option<Response>> {
        Self::with_instance(|client| client.events(events))
    }

    pub fn identify(identify: Identify) -> Result<Option<Response>> {
        Self::with_instance(|client| client.identify(identify))
    }

    pub fn alias(alias: Alias) -> Result<Option<Response>> {
        Self::with_instance(|client| client.alias(alias))
    }

    // The lock is released before the request goes out.
    fn with_instance<F>(call: F) -> Result<Option<Response>>
    where
        F: FnOnce(&IdentityClient) -> Result<Response>,
    {
        match Self::instance() {
            Some(client) => call(&client).map(Some),
            None => {
                log::debug!("Parcelvoy is not initialized, dropping call");
                Ok(None)
            }
        }
    }
}
