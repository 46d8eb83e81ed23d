//! Call-control requests towards the remote party.

use async_trait::async_trait;

use crate::types::Contact;

/// Remote call-control interface.
///
/// Both requests report success or failure without an error type; the
/// coordinator logs failures and proceeds with local cleanup regardless.
#[async_trait]
pub trait CallControl: Send + Sync {
    /// Request call termination at the remote party.
    async fn request_end(&self, contact: &Contact) -> bool;

    /// Tell the remote party the invitation was rejected.
    async fn request_reject(&self, contact: &Contact) -> bool;
}
