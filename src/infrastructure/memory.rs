//! In-Memory Storage Backend
//!
//! Map-backed implementation of the persistence gateway, used for
//! development and tests. Ids come from monotonic counters starting at 1.
//! One instance is constructed at startup and lives for the whole process;
//! tests reset state by constructing a fresh instance.
//!
//! Every operation runs under a single `parking_lot::RwLock`, so a write
//! (including the conditional status transitions and their counter side
//! effects) is one atomic critical section.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::entities::{
    Exchange, ExchangeRepository, ExchangeStatus, Message, MessageRepository, NewExchange,
    NewMessage, NewSkill, NewUser, Skill, SkillRepository, SkillType, SkillUpdate, User,
    UserProfileUpdate, UserRepository,
};
use crate::shared::error::AppError;

#[derive(Debug)]
struct Inner {
    users: BTreeMap<i64, User>,
    skills: BTreeMap<i64, Skill>,
    exchanges: BTreeMap<i64, Exchange>,
    messages: BTreeMap<i64, Message>,

    next_user_id: i64,
    next_skill_id: i64,
    next_exchange_id: i64,
    next_message_id: i64,
}

impl Inner {
    fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            skills: BTreeMap::new(),
            exchanges: BTreeMap::new(),
            messages: BTreeMap::new(),
            next_user_id: 1,
            next_skill_id: 1,
            next_exchange_id: 1,
            next_message_id: 1,
        }
    }
}

/// Map-backed storage with monotonic id counters.
#[derive(Debug)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryStorage {
    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read();
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read();
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, new: &NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.write();

        let id = inner.next_user_id;
        inner.next_user_id += 1;

        let user = User {
            id,
            username: new.username.clone(),
            email: new.email.clone(),
            password_hash: new.password_hash.clone(),
            full_name: new.full_name.clone(),
            avatar: new.avatar.clone(),
            bio: new.bio.clone(),
            rating: 0,
            exchange_count: 0,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_user_profile(
        &self,
        id: i64,
        update: &UserProfileUpdate,
    ) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.write();

        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(full_name) = &update.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(avatar) = &update.avatar {
            user.avatar = Some(avatar.clone());
        }
        if let Some(bio) = &update.bio {
            user.bio = Some(bio.clone());
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl SkillRepository for MemoryStorage {
    async fn find_skill(&self, id: i64) -> Result<Option<Skill>, AppError> {
        Ok(self.inner.read().skills.get(&id).cloned())
    }

    async fn skills_by_user(&self, user_id: i64) -> Result<Vec<Skill>, AppError> {
        let inner = self.inner.read();
        Ok(inner
            .skills
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn skills_by_category(&self, category: &str) -> Result<Vec<Skill>, AppError> {
        let inner = self.inner.read();
        Ok(inner
            .skills
            .values()
            .filter(|s| s.category == category)
            .cloned()
            .collect())
    }

    async fn skills_by_type(&self, skill_type: SkillType) -> Result<Vec<Skill>, AppError> {
        let inner = self.inner.read();
        Ok(inner
            .skills
            .values()
            .filter(|s| s.skill_type == skill_type)
            .cloned()
            .collect())
    }

    async fn all_skills(&self) -> Result<Vec<Skill>, AppError> {
        Ok(self.inner.read().skills.values().cloned().collect())
    }

    async fn create_skill(&self, new: &NewSkill) -> Result<Skill, AppError> {
        let mut inner = self.inner.write();

        let id = inner.next_skill_id;
        inner.next_skill_id += 1;

        let skill = Skill {
            id,
            user_id: new.user_id,
            title: new.title.clone(),
            description: new.description.clone(),
            skill_type: new.skill_type,
            category: new.category.clone(),
            tags: new.tags.clone(),
            created_at: Utc::now(),
        };
        inner.skills.insert(id, skill.clone());
        Ok(skill)
    }

    async fn update_skill(
        &self,
        id: i64,
        update: &SkillUpdate,
    ) -> Result<Option<Skill>, AppError> {
        let mut inner = self.inner.write();

        let Some(skill) = inner.skills.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &update.title {
            skill.title = title.clone();
        }
        if let Some(description) = &update.description {
            skill.description = description.clone();
        }
        if let Some(category) = &update.category {
            skill.category = category.clone();
        }
        if let Some(tags) = &update.tags {
            skill.tags = tags.clone();
        }
        Ok(Some(skill.clone()))
    }

    async fn delete_skill(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().skills.remove(&id).is_some())
    }
}

#[async_trait]
impl ExchangeRepository for MemoryStorage {
    async fn find_exchange(&self, id: i64) -> Result<Option<Exchange>, AppError> {
        Ok(self.inner.read().exchanges.get(&id).cloned())
    }

    async fn exchanges_for_user(&self, user_id: i64) -> Result<Vec<Exchange>, AppError> {
        let inner = self.inner.read();
        let mut exchanges: Vec<Exchange> = inner
            .exchanges
            .values()
            .filter(|e| e.is_participant(user_id))
            .cloned()
            .collect();
        // Most recently updated first; id as tiebreak for stable output.
        exchanges.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(exchanges)
    }

    async fn create_exchange(&self, new: &NewExchange) -> Result<Exchange, AppError> {
        let mut inner = self.inner.write();

        let id = inner.next_exchange_id;
        inner.next_exchange_id += 1;

        let now = Utc::now();
        let exchange = Exchange {
            id,
            initiator_id: new.initiator_id,
            responder_id: new.responder_id,
            initiator_skill_id: new.initiator_skill_id,
            responder_skill_id: new.responder_skill_id,
            status: ExchangeStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        inner.exchanges.insert(id, exchange.clone());
        Ok(exchange)
    }

    async fn settle_exchange(
        &self,
        id: i64,
        status: ExchangeStatus,
    ) -> Result<Option<Exchange>, AppError> {
        debug_assert!(matches!(
            status,
            ExchangeStatus::Accepted | ExchangeStatus::Rejected
        ));

        let mut inner = self.inner.write();
        match inner.exchanges.get_mut(&id) {
            Some(exchange) if exchange.status == ExchangeStatus::Pending => {
                exchange.status = status;
                exchange.updated_at = Utc::now();
                Ok(Some(exchange.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn complete_exchange(&self, id: i64) -> Result<Option<Exchange>, AppError> {
        let mut inner = self.inner.write();

        let completed = match inner.exchanges.get_mut(&id) {
            Some(exchange)
                if matches!(
                    exchange.status,
                    ExchangeStatus::Pending | ExchangeStatus::Accepted
                ) =>
            {
                exchange.status = ExchangeStatus::Completed;
                exchange.updated_at = Utc::now();
                exchange.clone()
            }
            _ => return Ok(None),
        };

        // A user referenced by an exchange is never deleted in this design;
        // a missing user is skipped rather than aborting the completion.
        for user_id in [completed.initiator_id, completed.responder_id] {
            if let Some(user) = inner.users.get_mut(&user_id) {
                user.exchange_count += 1;
            }
        }

        Ok(Some(completed))
    }
}

#[async_trait]
impl MessageRepository for MemoryStorage {
    async fn find_message(&self, id: i64) -> Result<Option<Message>, AppError> {
        Ok(self.inner.read().messages.get(&id).cloned())
    }

    async fn messages_for_exchange(&self, exchange_id: i64) -> Result<Vec<Message>, AppError> {
        let inner = self.inner.read();
        let mut messages: Vec<Message> = inner
            .messages
            .values()
            .filter(|m| m.exchange_id == exchange_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }

    async fn create_message(&self, new: &NewMessage) -> Result<Message, AppError> {
        let mut inner = self.inner.write();

        let id = inner.next_message_id;
        inner.next_message_id += 1;

        let message = Message {
            id,
            exchange_id: new.exchange_id,
            sender_id: new.sender_id,
            content: new.content.clone(),
            created_at: Utc::now(),
        };
        inner.messages.insert(id, message.clone());
        Ok(message)
    }
}
