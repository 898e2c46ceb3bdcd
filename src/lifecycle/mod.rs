//! # System Lifecycle & Orchestration
//!
//! Individual actors are simple; wiring them together is where the complexity lives.
//! [`MarketSystem`] creates every actor, injects each one's dependencies through
//! `run(context)`, and shuts them all down again.
//!
//! ## Dependency Graph
//!
//! ```text
//! cart  ──► catalog
//!   │
//!   └─────► promo lookup
//! order ──► catalog
//! account (no dependencies)
//! ```
//!
//! The graph is acyclic, so shutdown needs no explicit signal: once every outside client
//! is dropped, the cart and order actors stop, drop the catalog clients in their context,
//! and the catalog actor stops in turn.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - the HTTP server's [`AppState`](crate::api::AppState) clones
//!    must be gone too, so stop serving first
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - every actor task is joined; a panicked task is reported

pub mod market_system;

pub use market_system::*;
