//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//!
//! Each wrapper exposes the domain operations of one actor and reports failures in
//! that actor's error type.

pub mod account_client;
pub mod cart_client;
pub mod catalog_client;
pub mod order_client;

pub use account_client::*;
pub use cart_client::*;
pub use catalog_client::*;
pub use order_client::*;
