//! Parcelvoy client SDK for Rust.
//!
//! Sends `track`, `events`, `identify` and `alias` calls to the Parcelvoy
//! client API, one blocking HTTP POST per call. [`IdentityClient`] keeps an
//! anonymous visitor ID and the last known external ID so callers don't have
//! to pass them around; [`Parcelvoy`] exposes one such client process-wide.
//!
//! # Example
//!
//! ```rust,no_run
//! use parcelvoy::{Identify, IdentityClient, Options, Track};
//!
//! let client = IdentityClient::new(Options::new("pk_live", "https://parcelvoy.example.com/api"))?;
//! client.track(Track::new("viewed_pricing").property("plan", "pro"))?;
//! client.identify(Identify::new("user-42").email("ada@example.com"))?;
//! # Ok::<(), parcelvoy::Error>(())
//! ```

mod client;
mod endpoint;
mod error;
mod facade;
mod identity;
mod transport;
mod types;
mod wire;

pub use client::Client;
pub use endpoint::validate_endpoint;
pub use error::{Error, Result};
pub use facade::Parcelvoy;
pub use identity::IdentityClient;
pub use transport::{HttpRequest, Response, Transport, UreqTransport};
pub use types::{Alias, Event, Identify, KeyCase, Options, Properties, Track};
pub use wire::{camel_to_snake, normalize_keys};
