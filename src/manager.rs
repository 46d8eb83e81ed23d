//! Call coordinator: arbitrates pending invitations, the single active
//! session, and outbound signaling.

use chrono::{Duration, Utc};
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::config::SharedCallConfig;
use crate::control::CallControl;
use crate::error::CallError;
use crate::invitations::{CallInvitation, InvitationRegistry};
use crate::notify::NotificationGateway;
use crate::signaling::{CallCommand, SignalingTransport};
use crate::state::Call;
use crate::types::ContactId;

/// Invitations older than this are recorded but no longer ring
/// interactively; the caller has most likely given up by then.
const FRESH_INVITATION_WINDOW_SECS: i64 = 180;

/// Mutable coordinator state. Everything lives behind one mutex so that
/// accept/end/switch sequences never interleave at the field level.
#[derive(Debug, Default)]
struct CoordinatorState {
    invitations: InvitationRegistry,
    /// The single invitation eligible for an interactive incoming-call
    /// prompt. References a registry entry, or is empty.
    active_invitation: Option<CallInvitation>,
    active_call: Option<Call>,
    call_view_visible: bool,
}

/// Orchestrates the call lifecycle: records and promotes invitations,
/// accepts/rejects/ends calls, and drives the signaling transport.
///
/// All mutating operations serialize on one internal mutex; collaborators
/// are invoked while it is held, so a call switch's teardown-then-setup
/// sequence cannot be interleaved by another operation.
pub struct CallManager {
    state: Mutex<CoordinatorState>,
    /// True while a call switch is replacing the active session. Lives
    /// outside the state mutex so readers can observe it throughout the
    /// switch's suspension.
    switching: AtomicBool,
    config: SharedCallConfig,
    notifications: Arc<dyn NotificationGateway>,
    transport: Arc<dyn SignalingTransport>,
    control: Arc<dyn CallControl>,
}

impl CallManager {
    pub fn new(
        config: SharedCallConfig,
        notifications: Arc<dyn NotificationGateway>,
        transport: Arc<dyn SignalingTransport>,
        control: Arc<dyn CallControl>,
    ) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(CoordinatorState::default()),
            switching: AtomicBool::new(false),
            config,
            notifications,
            transport,
            control,
        })
    }

    /// Record a new inbound call offer and decide how loudly to surface it.
    ///
    /// The invitation is always recorded. If the owning user shows
    /// notifications, a fresh invitation is promoted to the active slot
    /// and rings interactively; one that arrived while the app was
    /// unreachable only raises a passive missed-call notification.
    pub async fn report_incoming(&self, invitation: CallInvitation) {
        debug!("report_incoming: call offer from {}", invitation.contact.id);
        let mut st = self.state.lock().await;
        st.invitations.record(invitation.clone());

        if !invitation.user.show_notifications {
            return;
        }

        let age = Utc::now().signed_duration_since(invitation.received_at);
        if age <= Duration::seconds(FRESH_INVITATION_WINDOW_SECS) {
            st.active_invitation = Some(invitation.clone());
            self.notifications.notify_incoming(&invitation).await;
        } else {
            self.notifications
                .notify_missed(
                    &invitation.user,
                    &invitation.contact.id,
                    &invitation.contact.display_name,
                    &invitation.call_type_text(),
                )
                .await;
        }
    }

    /// Accept a pending invitation, switching away from an existing call
    /// if one is active.
    ///
    /// Returns [`CallError::Unsupported`] without touching any state when
    /// this environment cannot run calls. An invitation that is no longer
    /// pending (raced with a remote cancellation or an earlier
    /// accept/reject) is a no-op.
    pub async fn accept(&self, invitation: CallInvitation) -> Result<(), CallError> {
        if !self.config.read().await.calls_supported {
            return Err(CallError::Unsupported);
        }

        let mut st = self.state.lock().await;
        if st.invitations.lookup(&invitation.contact.id).is_none() {
            debug!(
                "accept: invitation from {} no longer pending",
                invitation.contact.id
            );
            return Ok(());
        }

        if st.active_call.is_some() {
            debug!("accept: switching active call to {}", invitation.contact.id);
            self.switching.store(true, Ordering::SeqCst);
            let _guard = scopeguard::guard((), |_| {
                self.switching.store(false, Ordering::SeqCst);
            });
            self.end_call_locked(&mut st).await;
            self.accept_locked(&mut st, invitation).await;
        } else {
            self.accept_locked(&mut st, invitation).await;
        }
        Ok(())
    }

    async fn accept_locked(&self, st: &mut CoordinatorState, invitation: CallInvitation) {
        st.active_call = Some(Call::new(
            invitation.contact.clone(),
            invitation.media,
            invitation.shared_key.clone(),
        ));
        st.call_view_visible = true;

        let (relay, ice_servers) = {
            let config = self.config.read().await;
            (config.relay_policy, config.ice_servers.clone())
        };
        debug!(
            "accept: starting media negotiation with {} ({} ice servers, relay: {relay})",
            invitation.contact.id,
            ice_servers.len()
        );
        self.transport
            .send(CallCommand::Start {
                media: invitation.media,
                shared_key: invitation.shared_key.clone(),
                ice_servers,
                relay,
            })
            .await;

        // Registry removal and pointer clearing happen before the
        // notification is withdrawn, so a stale notification can never
        // outlive its invitation.
        st.invitations.remove(&invitation.contact.id);
        if st
            .active_invitation
            .as_ref()
            .is_some_and(|active| active.contact.id == invitation.contact.id)
        {
            st.active_invitation = None;
            self.notifications.cancel().await;
        }
    }

    /// End the active call.
    ///
    /// Idempotent: converges to no session and a hidden call UI whether a
    /// live session, an already-ended session, or nothing is present.
    pub async fn end_active_call(&self) {
        let mut st = self.state.lock().await;
        self.end_call_locked(&mut st).await;
    }

    async fn end_call_locked(&self, st: &mut CoordinatorState) {
        match st.active_call.take() {
            None => {
                st.call_view_visible = false;
            }
            Some(call) if call.state.is_ended() => {
                debug!("end_call: session with {} already ended", call.contact.id);
                st.call_view_visible = false;
            }
            Some(call) => {
                debug!("end_call: ending call with {}", call.contact.id);
                self.transport.send(CallCommand::End).await;
                st.call_view_visible = false;
                // Local cleanup is unconditional; a failed remote request
                // must not keep the session alive.
                if !self.control.request_end(&call.contact).await {
                    warn!("remote end request for {} failed", call.contact.id);
                }
            }
        }
    }

    /// Reject a pending invitation that was never accepted.
    ///
    /// The invitation is removed locally first; the remote rejection
    /// request is best-effort and a failure never resurfaces it.
    pub async fn reject(&self, invitation: CallInvitation) {
        let mut st = self.state.lock().await;
        let removed = st.invitations.remove(&invitation.contact.id);
        let was_active = st
            .active_invitation
            .as_ref()
            .is_some_and(|active| active.contact.id == invitation.contact.id);
        if was_active {
            st.active_invitation = None;
            self.notifications.cancel().await;
        }
        if !removed && !was_active {
            debug!(
                "reject: invitation from {} already gone",
                invitation.contact.id
            );
            return;
        }
        drop(st);

        if !self.control.request_reject(&invitation.contact).await {
            warn!("remote reject request for {} failed", invitation.contact.id);
        }
    }

    /// Remote party cancelled the offer before we accepted.
    ///
    /// Only the active/ringing projection is reconciled here; registry
    /// membership is handled by the surrounding event flow.
    pub async fn handle_remote_invitation_ended(&self, invitation: &CallInvitation) {
        let mut st = self.state.lock().await;
        if st
            .active_invitation
            .as_ref()
            .is_some_and(|active| active.contact.id == invitation.contact.id)
        {
            st.active_invitation = None;
            self.notifications.cancel().await;
        }
    }

    /// Media-layer confirmation that the accepted call is live.
    pub async fn handle_media_connected(&self) {
        let mut st = self.state.lock().await;
        if let Some(call) = st.active_call.as_mut() {
            debug!("media connected for call with {}", call.contact.id);
            call.mark_connected();
        }
    }

    /// Remote-side termination of the active session. The session is
    /// marked ended and left in place; [`CallManager::end_active_call`]
    /// acknowledges the cleanup without issuing another transport command.
    pub async fn handle_remote_terminated(&self) {
        let mut st = self.state.lock().await;
        if let Some(call) = st.active_call.as_mut() {
            debug!("remote terminated call with {}", call.contact.id);
            call.mark_ended();
        }
    }

    /// The call currently in progress or being set up, if any.
    pub async fn active_call(&self) -> Option<Call> {
        self.state.lock().await.active_call.clone()
    }

    /// The invitation currently eligible for an interactive prompt.
    pub async fn active_invitation(&self) -> Option<CallInvitation> {
        self.state.lock().await.active_invitation.clone()
    }

    /// Look up a pending invitation by contact.
    pub async fn pending_invitation(&self, contact_id: &ContactId) -> Option<CallInvitation> {
        self.state.lock().await.invitations.lookup(contact_id).cloned()
    }

    pub async fn is_call_view_visible(&self) -> bool {
        self.state.lock().await.call_view_visible
    }

    /// Whether a call switch is currently replacing the active session.
    pub fn is_switching(&self) -> bool {
        self.switching.load(Ordering::SeqCst)
    }
}
