//! Notification surface consumed by the coordinator.

use async_trait::async_trait;

use crate::invitations::CallInvitation;
use crate::types::{ContactId, User};

/// Call-notification gateway.
///
/// Delivery is fire-and-forget: the coordinator never observes whether a
/// notification actually reached the user.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Raise a time-sensitive incoming-call alert for an invitation that
    /// is still fresh enough to ring interactively.
    async fn notify_incoming(&self, invitation: &CallInvitation);

    /// Raise a passive notification for a call that was not promoted to
    /// an interactive alert.
    async fn notify_missed(&self, user: &User, contact_id: &ContactId, display_name: &str, text: &str);

    /// Withdraw any outstanding call notification.
    async fn cancel(&self);
}
