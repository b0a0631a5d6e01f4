//! Request checks shared by the conversation endpoints.
//!
//! Edit and delete requests go through these in a fixed order and stop at the first
//! failure:
//!
//! 1. [`require_session`]
//! 2. [`parse_conversation_id`]
//! 3. user authentication (done by the service, needs storage)
//! 4. conversation lookup (done by the service, needs storage)
//! 5. [`ensure_owner`]
//! 6. request body decoding (edits only)
//! 7. [`check_field_compatibility`] (edits only)
//!
//! Nothing is written unless every check passes.

use crate::core::error::ConversationError;
use crate::infrastructure::entities::{Conversation, ConversationState, ConversationUserARating};
use uuid::Uuid;

/// Longest accepted invited user name, in characters.
pub const MAX_INVITEE_NAME_CHARS: usize = 20;

/// Field pairs that may not be submitted together in one edit.
pub const CONFLICTING_FIELDS: &[(EditField, EditField)] =
    &[(EditField::UserARating, EditField::State)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    ReceiverName,
    State,
    UserARating,
}

impl EditField {
    /// Name of the field in request bodies.
    pub fn name(self) -> &'static str {
        match self {
            EditField::ReceiverName => "receiverName",
            EditField::State => "state",
            EditField::UserARating => "userARating",
        }
    }
}

/// A partial update of a conversation. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationEdit {
    pub receiver_name: Option<String>,
    pub state: Option<ConversationState>,
    pub user_a_rating: Option<ConversationUserARating>,
}

impl ConversationEdit {
    pub fn contains(&self, field: EditField) -> bool {
        match field {
            EditField::ReceiverName => self.receiver_name.is_some(),
            EditField::State => self.state.is_some(),
            EditField::UserARating => self.user_a_rating.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.contains(EditField::ReceiverName)
            || self.contains(EditField::State)
            || self.contains(EditField::UserARating))
    }

    /// Copies the present fields onto `conversation`.
    pub fn apply_to(self, conversation: &mut Conversation) {
        if let Some(receiver_name) = self.receiver_name {
            conversation.receiver_name = receiver_name;
        }
        if let Some(state) = self.state {
            conversation.state = state;
        }
        if let Some(rating) = self.user_a_rating {
            conversation.user_a_rating = Some(rating);
        }
    }
}

pub fn require_session(session_id: Option<&str>) -> Result<&str, ConversationError> {
    session_id.ok_or(ConversationError::MissingSession)
}

pub fn parse_conversation_id(raw: &str) -> Result<Uuid, ConversationError> {
    Uuid::parse_str(raw).map_err(|_| ConversationError::InvalidIdentifierFormat(raw.to_owned()))
}

pub fn validate_invitee_name(name: &str) -> Result<&str, ConversationError> {
    let length = name.chars().count();
    if length == 0 || length > MAX_INVITEE_NAME_CHARS {
        return Err(ConversationError::InvalidInviteeName {
            max: MAX_INVITEE_NAME_CHARS,
        });
    }
    Ok(name)
}

/// Whether `principal` may act on a resource owned by `owner`.
pub fn has_rights(principal: Uuid, owner: Uuid) -> bool {
    principal == owner
}

pub fn ensure_owner(principal: Uuid, conversation: &Conversation) -> Result<(), ConversationError> {
    if has_rights(principal, conversation.sender_user_id) {
        Ok(())
    } else {
        Err(ConversationError::OwnershipMismatch(conversation.id))
    }
}

pub fn check_field_compatibility(edit: &ConversationEdit) -> Result<(), ConversationError> {
    match CONFLICTING_FIELDS
        .iter()
        .find(|(a, b)| edit.contains(*a) && edit.contains(*b))
    {
        Some((a, b)) => Err(ConversationError::ConflictingFields(a.name(), b.name())),
        None => Ok(()),
    }
}

/// Checks the submitted values against the stored conversation.
pub fn validate_edit_values(
    edit: &ConversationEdit,
    current: &Conversation,
) -> Result<(), ConversationError> {
    if let Some(receiver_name) = &edit.receiver_name {
        validate_invitee_name(receiver_name)?;
    }
    if edit.user_a_rating.is_some() && current.state != ConversationState::Completed {
        return Err(ConversationError::RatingBeforeCompletion);
    }
    Ok(())
}
