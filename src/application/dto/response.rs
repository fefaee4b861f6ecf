//! Response DTOs
//!
//! Data structures for API response bodies. Timestamps are serialized as
//! RFC 3339 strings and user payloads never carry the password hash.

use serde::Serialize;

use crate::domain::entities::{Exchange, ExchangeStatus, Message, Skill, SkillType, User};

/// User response. Built from the entity so the password hash cannot leak.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub rating: i32,
    pub exchange_count: i32,
}

impl UserResponse {
    pub fn from_user(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar: user.avatar,
            bio: user.bio,
            rating: user.rating,
            exchange_count: user.exchange_count,
        }
    }
}

/// Skill response, optionally enriched with the owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub skill_type: SkillType,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: String,
    /// Owner of the skill; omitted when the owner is not attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl SkillResponse {
    pub fn from_skill(skill: Skill, user: Option<User>) -> Self {
        Self {
            id: skill.id,
            user_id: skill.user_id,
            title: skill.title,
            description: skill.description,
            skill_type: skill.skill_type,
            category: skill.category,
            tags: skill.tags,
            created_at: skill.created_at.to_rfc3339(),
            user: user.map(UserResponse::from_user),
        }
    }
}

/// Exchange response, enriched with both participants and both skills.
/// The skill slots serialize as `null` when the skill has been deleted
/// since the exchange was proposed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResponse {
    pub id: i64,
    pub initiator_id: i64,
    pub responder_id: i64,
    pub initiator_skill_id: i64,
    pub responder_skill_id: i64,
    pub status: ExchangeStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiator: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder: Option<UserResponse>,
    pub initiator_skill: Option<SkillResponse>,
    pub responder_skill: Option<SkillResponse>,
}

impl ExchangeResponse {
    pub fn from_exchange(exchange: Exchange) -> Self {
        Self {
            id: exchange.id,
            initiator_id: exchange.initiator_id,
            responder_id: exchange.responder_id,
            initiator_skill_id: exchange.initiator_skill_id,
            responder_skill_id: exchange.responder_skill_id,
            status: exchange.status,
            created_at: exchange.created_at.to_rfc3339(),
            updated_at: exchange.updated_at.to_rfc3339(),
            initiator: None,
            responder: None,
            initiator_skill: None,
            responder_skill: None,
        }
    }

    pub fn with_participants(mut self, initiator: Option<User>, responder: Option<User>) -> Self {
        self.initiator = initiator.map(UserResponse::from_user);
        self.responder = responder.map(UserResponse::from_user);
        self
    }

    pub fn with_skills(
        mut self,
        initiator_skill: Option<Skill>,
        responder_skill: Option<Skill>,
    ) -> Self {
        self.initiator_skill = initiator_skill.map(|s| SkillResponse::from_skill(s, None));
        self.responder_skill = responder_skill.map(|s| SkillResponse::from_skill(s, None));
        self
    }
}

/// Message response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub exchange_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            exchange_id: message.exchange_id,
            sender_id: message.sender_id,
            content: message.content,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}

/// Session probe response for `GET /api/auth/session`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl SessionResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            authenticated: true,
            user: Some(UserResponse::from_user(user)),
        }
    }
}
