//! Pending inbound call offers and the registry that tracks them.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::types::{CallMediaType, Contact, ContactId, User};

/// An unanswered inbound call offer from a remote contact.
///
/// Owned by the [`InvitationRegistry`] until the coordinator consumes it
/// by accepting or rejecting.
#[derive(Debug, Clone)]
pub struct CallInvitation {
    pub user: User,
    pub contact: Contact,
    pub media: CallMediaType,
    /// Pre-shared session key; present for e2e-encrypted calls.
    pub shared_key: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl CallInvitation {
    /// Human-readable description of the offered call, used as
    /// notification body text.
    pub fn call_type_text(&self) -> String {
        if self.shared_key.is_some() {
            format!("encrypted {} call", self.media)
        } else {
            format!("{} call (not e2e encrypted)", self.media)
        }
    }
}

/// Pending invitations keyed by remote contact.
///
/// A later invitation from the same contact silently replaces the earlier
/// one. Every entry corresponds to a call not yet accepted or ended.
#[derive(Debug, Default)]
pub struct InvitationRegistry {
    entries: HashMap<ContactId, CallInvitation>,
}

impl InvitationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for the invitation's contact.
    pub fn record(&mut self, invitation: CallInvitation) {
        self.entries
            .insert(invitation.contact.id.clone(), invitation);
    }

    /// Delete the entry if present. Returns whether an entry was removed.
    pub fn remove(&mut self, contact_id: &ContactId) -> bool {
        self.entries.remove(contact_id).is_some()
    }

    pub fn lookup(&self, contact_id: &ContactId) -> Option<&CallInvitation> {
        self.entries.get(contact_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;
    use chrono::Utc;

    fn invitation(contact_id: &str, shared_key: Option<&str>) -> CallInvitation {
        CallInvitation {
            user: User {
                id: UserId::new("u1"),
                show_notifications: true,
            },
            contact: Contact::new(contact_id, "Alice"),
            media: CallMediaType::Video,
            shared_key: shared_key.map(str::to_string),
            received_at: Utc::now(),
        }
    }

    #[test]
    fn record_and_lookup() {
        let mut registry = InvitationRegistry::new();
        assert!(registry.is_empty());

        registry.record(invitation("c1", None));
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup(&ContactId::new("c1")).is_some());
        assert!(registry.lookup(&ContactId::new("c2")).is_none());
    }

    /// A later invitation from the same contact supersedes the earlier one.
    #[test]
    fn record_replaces_entry_for_same_contact() {
        let mut registry = InvitationRegistry::new();
        registry.record(invitation("c1", None));
        registry.record(invitation("c1", Some("key2")));

        assert_eq!(registry.len(), 1);
        let entry = registry.lookup(&ContactId::new("c1")).unwrap();
        assert_eq!(entry.shared_key.as_deref(), Some("key2"));
    }

    #[test]
    fn remove_is_noop_when_absent() {
        let mut registry = InvitationRegistry::new();
        registry.record(invitation("c1", None));

        assert!(registry.remove(&ContactId::new("c1")));
        assert!(!registry.remove(&ContactId::new("c1")));
        assert!(registry.is_empty());
    }

    #[test]
    fn call_type_text_reflects_media_and_encryption() {
        assert_eq!(
            invitation("c1", Some("k")).call_type_text(),
            "encrypted video call"
        );
        let mut plain = invitation("c1", None);
        plain.media = CallMediaType::Audio;
        assert_eq!(plain.call_type_text(), "audio call (not e2e encrypted)");
    }
}
