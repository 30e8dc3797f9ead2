//! typed-webhooks: deliver typed records as webhooks.
//!
//! A record is dumped to an ordered field mapping, turned into a wire
//! payload by a [`Serializer`](webhook::Serializer), and transmitted by a
//! [`Deliverer`](webhook::Deliverer) that declares which formats it
//! accepts. Components are looked up by name in a
//! [`WebhookRegistry`](webhook::WebhookRegistry) using [`Settings`](config::Settings).
//!
//! ```no_run
//! use serde::Serialize;
//! use typed_webhooks::config::Settings;
//! use typed_webhooks::webhook::{SerializeOptions, resolve_producer};
//!
//! #[derive(Debug, Serialize)]
//! struct Signup {
//!     id: u64,
//!     name: String,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env()?;
//! let producer = resolve_producer(&settings)?;
//! let signup = Signup { id: 1, name: "John Doe".into() };
//! producer.send_webhook(&signup, &SerializeOptions::new().exclude(["name"]))?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod webhook;
