//! # skema-validator
//!
//! A declarative schema validation engine for untrusted payloads.
//!
//! Declare the expected shape once — scalars with rules, arrays, objects —
//! then validate raw JSON against it. The result is either a typed,
//! normalized value tree or the full ordered list of path-addressed
//! violations, never just the first one.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use skema_validator::prelude::*;
//!
//! let schema = Schema::new(object().field(
//!     "dailyAttendance",
//!     array(
//!         object()
//!             .field("date_in", date("yyyy-MM-dd HH:mm:ss"))
//!             .field("status", one_of(["present", "absent", "permission", "sick"]))
//!             .field("classId", string().rule(exists("academic.classes", "id"))),
//!     ),
//! ));
//!
//! let validator = Validator::new(schema)
//!     .with_messages(CustomMessages::new().add(
//!         "dailyAttendance.*.status.enum",
//!         "Status must be present, absent, permission, or sick",
//!     ));
//!
//! match validator.validate(&payload, &lookup).await {
//!     Ok(data) => { /* dates parsed, declared fields only */ }
//!     Err(errors) => { /* e.g. [dailyAttendance.2.status] enum: ... */ }
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`schema`] — the shape tree and its builder surface
//! - [`rules`] — built-in named rules (`date`, `enum`, `alphaNum`,
//!   `exists`, …)
//! - [`engine`] — the walk: aggregation, concurrency, lookup policy
//! - [`messages`] — wildcard-addressed custom failure messages
//! - [`lookup`] — the injected existence-lookup capability
//! - [`foundation`] — paths, error types, normalized values

// Validation results carry the full error list by value — boxing it would
// add indirection to every call for no practical benefit.
#![allow(clippy::result_large_err)]

pub mod engine;
pub mod foundation;
pub mod lookup;
pub mod messages;
pub mod prelude;
pub mod rules;
pub mod schema;
