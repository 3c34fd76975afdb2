//! till-core: the domain layer of the till retail console.
//!
//! Everything here is local and synchronous — no network, no terminal. The
//! crate covers the four cooperating pieces every page composes:
//!
//! - [`view::CollectionView`] — raw collection in, filtered + sorted view out.
//! - [`join::JoinIndex`] — keyed lookup over a secondary collection.
//! - [`draft::SaleDraft`] — freeform line items into a validated sale payload.
//! - [`session::SessionStore`] — the cached login identity and token.
//!
//! # Conventions
//!
//! - **Errors**: typed enums (`thiserror`) at crate seams, [`error::ErrorCode`]
//!   for machine-readable terminal output.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod draft;
pub mod error;
pub mod fetch;
pub mod join;
pub mod model;
pub mod session;
pub mod view;
