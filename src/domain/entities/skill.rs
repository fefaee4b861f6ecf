//! Skill entity and repository trait.
//!
//! Maps to the `skills` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Whether a skill is offered or sought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    Offering,
    Seeking,
}

impl SkillType {
    /// Convert from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "offering" => Some(Self::Offering),
            "seeking" => Some(Self::Seeking),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offering => "offering",
            Self::Seeking => "seeking",
        }
    }
}

impl std::fmt::Display for SkillType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A skill listing owned by exactly one user.
///
/// Maps to the `skills` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - user_id: BIGINT NOT NULL
/// - title: TEXT NOT NULL
/// - description: TEXT NOT NULL
/// - type: TEXT NOT NULL ('offering' | 'seeking')
/// - category: TEXT NOT NULL
/// - tags: TEXT[] NOT NULL (order-preserving)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub skill_type: SkillType,
    /// Free-text category such as "development" or "design"
    pub category: String,
    /// Ordered tag list; order is part of the contract
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a skill.
#[derive(Debug, Clone)]
pub struct NewSkill {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub skill_type: SkillType,
    pub category: String,
    pub tags: Vec<String>,
}

/// Partial skill update. Ownership and type are immutable.
#[derive(Debug, Clone, Default)]
pub struct SkillUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Repository trait for Skill data access operations.
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Find a skill by id.
    async fn find_skill(&self, id: i64) -> Result<Option<Skill>, AppError>;

    /// List skills owned by the given user.
    async fn skills_by_user(&self, user_id: i64) -> Result<Vec<Skill>, AppError>;

    /// List skills in the given category.
    async fn skills_by_category(&self, category: &str) -> Result<Vec<Skill>, AppError>;

    /// List skills of the given type.
    async fn skills_by_type(&self, skill_type: SkillType) -> Result<Vec<Skill>, AppError>;

    /// List every skill.
    async fn all_skills(&self) -> Result<Vec<Skill>, AppError>;

    /// Create a new skill, stamping `created_at`.
    async fn create_skill(&self, new: &NewSkill) -> Result<Skill, AppError>;

    /// Merge a partial update. Returns `None` if the id is absent.
    async fn update_skill(&self, id: i64, update: &SkillUpdate)
        -> Result<Option<Skill>, AppError>;

    /// Delete a skill. Returns whether a record was removed; callers must
    /// verify by re-reading the id before trusting the flag.
    async fn delete_skill(&self, id: i64) -> Result<bool, AppError>;
}
