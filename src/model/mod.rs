//! Records managed by the marketplace actors and the DTOs used to create and change them.
//!
//! Every record type implements [`ActorEntity`](resource_actor::ActorEntity) in its actor
//! module; this module only holds the data and the pure rules on it.

pub mod account;
pub mod cart;
pub mod meal;
pub mod money;
pub mod order;
pub mod promo;

pub use account::*;
pub use cart::*;
pub use meal::*;
pub use order::*;
pub use promo::*;
