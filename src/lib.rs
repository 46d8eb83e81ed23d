//! Call-session coordination for one-to-one audio/video calls.
//!
//! This crate decides *when* a call exists, *which* call is active, and
//! *what signaling command* goes out next. Media transport, notification
//! delivery and call UI rendering live behind narrow traits owned by
//! adjacent subsystems.
//!
//! # Architecture
//!
//! - [`CallInvitation`] & [`InvitationRegistry`]: pending inbound call offers
//! - [`CallState`] & [`Call`]: the single active session and its lifecycle
//! - [`CallCommand`] & [`SignalingTransport`]: outbound media-layer commands
//! - [`NotificationGateway`]: incoming/missed call alerts
//! - [`CallControl`]: end/reject requests towards the remote party
//! - [`CallManager`]: orchestrates all of the above

mod config;
mod control;
mod error;
mod invitations;
mod manager;
mod notify;
mod signaling;
mod state;
mod types;

pub use config::{CallConfig, SharedCallConfig};
pub use control::CallControl;
pub use error::CallError;
pub use invitations::{CallInvitation, InvitationRegistry};
pub use manager::CallManager;
pub use notify::NotificationGateway;
pub use signaling::{CallCommand, IceServer, SignalingTransport};
pub use state::{Call, CallState};
pub use types::{CallMediaType, Contact, ContactId, User, UserId};
