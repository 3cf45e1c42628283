//! # HelpSpot
//!
//! A client for the HelpSpot helpdesk web services API.
//!
//! HelpSpot exposes its API as dotted methods (`version`, `private.version`,
//! `private.request.update`, ...) under `<install>/api/index.php`. This crate
//! does not model those methods. Any method name can be called with any named
//! parameters, and the JSON reply comes back untouched as a
//! [`serde_json::Value`].
//!
//! ## Features
//!
//! - **Open-ended methods**: `client.call("private_request_update", &params)`;
//!   underscores in names become dots on the wire
//! - **Verb selection**: state-changing methods are sent as POST with a form
//!   body, everything else as GET with a query string
//! - **Authentication**: HTTP Basic credentials are attached to `private.*`
//!   methods only
//! - **Typed service errors**: HTTP 400 replies become
//!   [`HelpSpotError::Api`] with the description and numeric id HelpSpot reported
//!
//! ## Architecture
//!
//! - [`client`] - [`HelpSpotClient`], the caller-facing entry point
//! - [`invoker`] - [`MethodInvoker`], one callable method and its request building
//! - [`method`] - method names, scope and verb selection
//! - [`decoder`] - decoding of HelpSpot error replies
//! - [`auth`] - staff credentials and the Basic token
//! - [`config`] - configuration loading from environment variables
//! - [`error`] - the unified error type
//!
//! ## Example
//!
//! ```no_run
//! use helpspot::{HelpSpotClient, HelpSpotError, Params};
//!
//! # async fn example() -> Result<(), HelpSpotError> {
//! let hs = HelpSpotClient::from_parts(
//!     "http://helpdesk.example.com/help",
//!     "you@example.com",
//!     "secret",
//!     0,
//! )?;
//!
//! match hs.call("private_request_get", &Params::new().with("xRequest", 12345)).await {
//!     Ok(request) => println!("{}", request),
//!     Err(HelpSpotError::Api { description, id }) => eprintln!("rejected ({}): {}", id, description),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Security Considerations
//!
//! The password is kept in memory only. It is never logged, `Debug` output
//! redacts it, and error messages built by the client are scrubbed of it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod auth;
pub mod client;
pub mod config;
pub mod decoder;
pub mod error;
pub mod invoker;
pub mod method;

pub use client::HelpSpotClient;
pub use error::HelpSpotError;
pub use invoker::{MethodInvoker, Params, RequestDescriptor};
pub use method::{HttpVerb, MethodName, Scope};
