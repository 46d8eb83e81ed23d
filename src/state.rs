//! Call session state machine.

use serde::Serialize;

use crate::types::{CallMediaType, Contact};

/// Lifecycle state of the active call session.
///
/// "Idle" is the absence of a [`Call`], not a variant here: once a session
/// reaches [`CallState::Ended`] and cleanup is acknowledged, the session
/// object itself is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CallState {
    /// Local commitment made, media negotiation not yet confirmed.
    #[default]
    InvitationAccepted,
    /// Media flowing. Reached via an external media-layer signal.
    Connected,
    /// Terminal. The session stays around until cleanup is acknowledged.
    Ended,
}

impl CallState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended)
    }
}

/// The call currently in progress or being set up.
///
/// At most one exists process-wide at any instant; a new call may only be
/// accepted after the previous one is fully torn down.
#[derive(Debug, Clone)]
pub struct Call {
    pub contact: Contact,
    pub state: CallState,
    pub media: CallMediaType,
    pub shared_key: Option<String>,
}

impl Call {
    pub fn new(contact: Contact, media: CallMediaType, shared_key: Option<String>) -> Self {
        Self {
            contact,
            state: CallState::InvitationAccepted,
            media,
            shared_key,
        }
    }

    /// Media-layer confirmation that the call is live. A no-op once the
    /// session has ended.
    pub fn mark_connected(&mut self) {
        if !self.state.is_ended() {
            self.state = CallState::Connected;
        }
    }

    pub fn mark_ended(&mut self) {
        self.state = CallState::Ended;
    }
}
