//! # Domain Layer
//!
//! Core types of the Keycloak NATS adapter. Everything in this crate is pure:
//! no I/O, no async, no transport types.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`events`] | Client and admin events as received from the host |
//! | [`value_objects`] | Subject keys and durable log descriptors |
//! | [`serialization`] | Event to JSON payload with a sentinel fallback |
//! | [`constants`] | Wire-level names shared with downstream consumers |
//! | [`error`] | Error taxonomy and `Result` alias |

pub mod constants;
pub mod error;
pub mod events;
pub mod serialization;
pub mod value_objects;

pub use error::{Error, Result};
pub use events::{AdminDomainEvent, AuthDetails, DomainEvent, EventKind};
pub use serialization::serialize;
pub use value_objects::{DurableLogDescriptor, SubjectKey};
