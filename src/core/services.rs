//! Implementations for the service the app needs.
//!

use crate::core::error::ConversationError;
use crate::core::traits::{ConversationService, Credentials, RequestBody};
use crate::core::validation::{
    ConversationEdit, check_field_compatibility, ensure_owner, parse_conversation_id,
    require_session, validate_edit_values, validate_invitee_name,
};
use crate::infrastructure::entities::{Conversation, ConversationState, Session, User};
use crate::infrastructure::traits::{ConversationRepository, UserRepository};
use async_trait::async_trait;
use chrono::Utc;
use di::{Ref, injectable};
use log::{debug, info};
use uuid::Uuid;

#[injectable(ConversationService)]
pub struct DbConversationService {
    repo: Ref<dyn ConversationRepository>,
    users: Ref<dyn UserRepository>,
}

impl DbConversationService {
    async fn lookup_session(&self, session_id: &str) -> Result<Option<Session>, ConversationError> {
        // a malformed id can't name a stored session
        match Uuid::parse_str(session_id) {
            Ok(session_id) => Ok(self.users.find_session(session_id).await?),
            Err(_) => Ok(None),
        }
    }

    /// Resolves the user owning both the access token and the session.
    async fn session_user(
        &self,
        session: Option<&Session>,
        access_token: Option<&str>,
    ) -> Result<User, ConversationError> {
        let Some(access_token) = access_token else {
            debug!("request without access token");
            return Err(ConversationError::Unauthenticated);
        };

        let Some(user) = self.users.find_user_by_access_token(access_token).await? else {
            debug!("unknown access token");
            return Err(ConversationError::Unauthenticated);
        };

        match session {
            Some(session) if session.user_id == user.id => Ok(user),
            _ => {
                debug!("session does not belong to user {}", user.id);
                Err(ConversationError::Unauthenticated)
            }
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<User, ConversationError> {
        let session_id = require_session(credentials.session_id.as_deref())?;
        let session = self.lookup_session(session_id).await?;
        self.session_user(session.as_ref(), credentials.access_token.as_deref())
            .await
    }

    /// Runs the checks every edit and delete goes through, returning the target
    /// conversation when the caller may change it.
    async fn authorize(
        &self,
        credentials: &Credentials,
        conversation_id: &str,
        include_deleted: bool,
    ) -> Result<(User, Conversation), ConversationError> {
        require_session(credentials.session_id.as_deref())?;
        let conversation_id = parse_conversation_id(conversation_id)?;
        let user = self.authenticate(credentials).await?;

        let conversation = self
            .repo
            .find_conversation(conversation_id)
            .await?
            .filter(|conversation| include_deleted || !conversation.is_marked_deleted)
            .ok_or(ConversationError::ResourceNotFound(conversation_id))?;

        ensure_owner(user.id, &conversation)?;

        Ok((user, conversation))
    }
}

#[async_trait]
impl ConversationService for DbConversationService {
    async fn list_conversations(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<Conversation>, ConversationError> {
        let user = self.authenticate(credentials).await?;
        Ok(self.repo.list_conversations(user.id).await?)
    }

    async fn create_conversation_invite(
        &self,
        credentials: &Credentials,
        invited_user_name: RequestBody<String>,
    ) -> Result<Conversation, ConversationError> {
        let session_id = require_session(credentials.session_id.as_deref())?;
        let invited_user_name = invited_user_name.map_err(ConversationError::InvalidBody)?;
        let invited_user_name = validate_invitee_name(&invited_user_name)?;

        let session = self
            .lookup_session(session_id)
            .await?
            .ok_or(ConversationError::SessionNotFound)?;
        let user = self
            .session_user(Some(&session), credentials.access_token.as_deref())
            .await?;

        let now = Utc::now();
        let conversation = self
            .repo
            .create_conversation(Conversation {
                id: Uuid::new_v4(),
                sender_user_id: user.id,
                receiver_name: invited_user_name.to_owned(),
                state: ConversationState::Invited,
                user_a_rating: None,
                is_marked_deleted: false,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(
            "user {} invited `{}` to conversation {}",
            user.id, conversation.receiver_name, conversation.id
        );

        Ok(conversation)
    }

    async fn edit_conversation(
        &self,
        credentials: &Credentials,
        conversation_id: &str,
        edit: RequestBody<ConversationEdit>,
    ) -> Result<Conversation, ConversationError> {
        let (user, mut conversation) = self.authorize(credentials, conversation_id, false).await?;
        let edit = edit.map_err(ConversationError::InvalidBody)?;

        check_field_compatibility(&edit)?;
        validate_edit_values(&edit, &conversation)?;

        if edit.is_empty() {
            return Ok(conversation);
        }

        edit.apply_to(&mut conversation);
        let conversation = self.repo.update_conversation(conversation).await?;

        info!("user {} edited conversation {}", user.id, conversation.id);

        Ok(conversation)
    }

    async fn delete_conversation(
        &self,
        credentials: &Credentials,
        conversation_id: &str,
    ) -> Result<(), ConversationError> {
        let (user, conversation) = self.authorize(credentials, conversation_id, true).await?;

        if conversation.is_marked_deleted {
            debug!("conversation {} is already marked deleted", conversation.id);
            return Ok(());
        }

        self.repo.mark_conversation_deleted(conversation.id).await?;

        info!("user {} deleted conversation {}", user.id, conversation.id);

        Ok(())
    }
}
