use crate::endpoint::validate_endpoint;
use crate::error::{Error, Result};
use crate::transport::{HttpRequest, Response, Transport, UreqTransport};
use crate::types::{Alias, Event, Identify, KeyCase, Options, Track};
use crate::wire;

const TRACK_PATH: &str = "track";
const EVENTS_PATH: &str = "events";
const IDENTIFY_PATH: &str = "identify";

/// Request client for the Parcelvoy client API.
///
/// Each call shapes one JSON payload and sends it as a single authenticated
/// POST to `{endpoint}/client/{path}`. Nothing is buffered or retried; the
/// response comes back whatever its status.
pub struct Client {
    api_key: String,
    endpoint: String,
    key_case: KeyCase,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Create a client sending through a blocking `ureq` agent.
    pub fn new(opts: Options) -> Result<Self> {
        let transport = UreqTransport::new(opts.timeout);
        Self::with_transport(opts, transport)
    }

    /// Create a client sending through a custom transport.
    pub fn with_transport(opts: Options, transport: impl Transport + 'static) -> Result<Self> {
        if opts.api_key.is_empty() {
            return Err(Error::InvalidConfig("'api_key' is required".to_string()));
        }
        if opts.api_key.contains('\0') || opts.api_key.contains('\r') || opts.api_key.contains('\n')
        {
            return Err(Error::InvalidConfig(
                "'api_key' contains invalid characters".to_string(),
            ));
        }

        let endpoint = validate_endpoint(&opts.endpoint)?;

        Ok(Self {
            api_key: opts.api_key,
            endpoint,
            key_case: opts.key_case,
            transport: Box::new(transport),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn key_case(&self) -> KeyCase {
        self.key_case
    }

    /// Record a single event.
    pub fn track(&self, track: &Track) -> Result<Response> {
        let body = wire::track_body(track, self.key_case)?;
        self.request(TRACK_PATH, body)
    }

    /// Record a batch of events in one request. The batch succeeds or fails
    /// as a whole.
    pub fn events(&self, events: &[Event]) -> Result<Response> {
        let body = wire::events_body(events, self.key_case)?;
        self.request(EVENTS_PATH, body)
    }

    /// Create or update a user.
    pub fn identify(&self, identify: &Identify) -> Result<Response> {
        let body = wire::identify_body(identify, self.key_case)?;
        self.request(IDENTIFY_PATH, body)
    }

    /// Link an anonymous ID to an external ID. The server merges the two
    /// through the identify endpoint; there is no separate alias route.
    pub fn alias(&self, alias: &Alias) -> Result<Response> {
        let body = wire::alias_body(alias, self.key_case)?;
        self.request(IDENTIFY_PATH, body)
    }

    fn request(&self, path: &str, body: String) -> Result<Response> {
        let request = HttpRequest {
            url: format!("{}/client/{path}", self.endpoint),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), format!("Bearer {}", self.api_key)),
            ],
            body,
        };

        log::debug!("POST /client/{path} ({} bytes)", request.body.len());
        let response = self.transport.post(&request)?;

        if response.is_success() {
            log::debug!("/client/{path} returned {}", response.status);
        } else {
            log::warn!("/client/{path} returned {}", response.status);
        }
        Ok(response)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("key_case", &self.key_case)
            .finish_non_exhaustive()
    }
}
