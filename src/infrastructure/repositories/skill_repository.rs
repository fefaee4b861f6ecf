//! Skill Repository Implementation
//!
//! PostgreSQL implementation of the SkillRepository trait. The `type`
//! column is aliased to `skill_type` on the way out because `type` is not a
//! usable Rust field name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::PgStorage;
use crate::domain::entities::{NewSkill, Skill, SkillRepository, SkillType, SkillUpdate};
use crate::shared::error::AppError;

/// Database row representation matching the skills table schema.
#[derive(Debug, sqlx::FromRow)]
struct SkillRow {
    id: i64,
    user_id: i64,
    title: String,
    description: String,
    skill_type: String,
    category: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl SkillRow {
    fn into_skill(self) -> Result<Skill, AppError> {
        let skill_type = SkillType::parse(&self.skill_type).ok_or_else(|| {
            AppError::Internal(format!("Unknown skill type in storage: {}", self.skill_type))
        })?;

        Ok(Skill {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            skill_type,
            category: self.category,
            tags: self.tags,
            created_at: self.created_at,
        })
    }
}

const SKILL_COLUMNS: &str =
    "id, user_id, title, description, type AS skill_type, category, tags, created_at";

fn into_skills(rows: Vec<SkillRow>) -> Result<Vec<Skill>, AppError> {
    rows.into_iter().map(SkillRow::into_skill).collect()
}

#[async_trait]
impl SkillRepository for PgStorage {
    async fn find_skill(&self, id: i64) -> Result<Option<Skill>, AppError> {
        let row = sqlx::query_as::<_, SkillRow>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(SkillRow::into_skill).transpose()
    }

    async fn skills_by_user(&self, user_id: i64) -> Result<Vec<Skill>, AppError> {
        let rows = sqlx::query_as::<_, SkillRow>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        into_skills(rows)
    }

    async fn skills_by_category(&self, category: &str) -> Result<Vec<Skill>, AppError> {
        let rows = sqlx::query_as::<_, SkillRow>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills WHERE category = $1 ORDER BY id"
        ))
        .bind(category)
        .fetch_all(self.pool())
        .await?;

        into_skills(rows)
    }

    async fn skills_by_type(&self, skill_type: SkillType) -> Result<Vec<Skill>, AppError> {
        let rows = sqlx::query_as::<_, SkillRow>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills WHERE type = $1 ORDER BY id"
        ))
        .bind(skill_type.as_str())
        .fetch_all(self.pool())
        .await?;

        into_skills(rows)
    }

    async fn all_skills(&self) -> Result<Vec<Skill>, AppError> {
        let rows = sqlx::query_as::<_, SkillRow>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills ORDER BY id"
        ))
        .fetch_all(self.pool())
        .await?;

        into_skills(rows)
    }

    async fn create_skill(&self, new: &NewSkill) -> Result<Skill, AppError> {
        let row = sqlx::query_as::<_, SkillRow>(&format!(
            r#"
            INSERT INTO skills (user_id, title, description, type, category, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SKILL_COLUMNS}
            "#
        ))
        .bind(new.user_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.skill_type.as_str())
        .bind(&new.category)
        .bind(&new.tags)
        .fetch_one(self.pool())
        .await?;

        row.into_skill()
    }

    async fn update_skill(
        &self,
        id: i64,
        update: &SkillUpdate,
    ) -> Result<Option<Skill>, AppError> {
        let row = sqlx::query_as::<_, SkillRow>(&format!(
            r#"
            UPDATE skills
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                tags = COALESCE($5, tags)
            WHERE id = $1
            RETURNING {SKILL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.category)
        .bind(&update.tags)
        .fetch_optional(self.pool())
        .await?;

        row.map(SkillRow::into_skill).transpose()
    }

    async fn delete_skill(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
