//! # Meal Market
//!
//! REST backend for a home-cooked-meal marketplace. Customers fill a cart and place
//! orders; chefs move their orders through the kitchen. The core is the cart and order
//! lifecycle engine, built as resource actors on the [`resource_actor`] crate.
//!
//! ## Module Tour
//!
//! ### 1. The Records ([`model`])
//! Plain data: [`Cart`](model::Cart), [`Order`](model::Order), [`Meal`](model::Meal),
//! [`Account`](model::Account), the ids and the money helpers.
//!
//! ### 2. The Actors ([`catalog_actor`], [`account_actor`], [`cart_actor`], [`order_actor`])
//! One [`ActorEntity`](resource_actor::ActorEntity) implementation per record type. The
//! business rules live in their hooks; every mutation commits atomically or not at all.
//!
//! ### 3. The Interface ([`clients`])
//! Domain-specific wrappers over `ResourceClient` that hide message passing and speak in
//! each actor's error type.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`MarketSystem`](lifecycle::MarketSystem) creates the actors, injects their contexts
//! (catalog, [`promo`] lookup) and shuts them down.
//!
//! ### 5. The Edge ([`api`], [`projection`])
//! Axum routes, the request principal, the error mapping and the wire shapes.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! curl -H 'X-User-Id: 101' -H 'X-User-Role: customer' localhost:5000/cart
//! ```

pub mod account_actor;
pub mod api;
pub mod cart_actor;
pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod projection;
pub mod promo;
pub mod seed;
