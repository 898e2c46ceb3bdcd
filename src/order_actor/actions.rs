//! Custom actions for the Order actor.
//!
//! Both actions carry the requester so the actor can enforce who may see or change an
//! order in the same step that reads it.

use crate::model::{OrderStatus, UserId};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Read the order. Allowed for its buyer and its chef.
    View { requester: UserId },
    /// Set a new status. Allowed only for the order's chef; `Delivered` stamps
    /// `delivered_at`.
    SetStatus {
        requester: UserId,
        status: OrderStatus,
    },
}
