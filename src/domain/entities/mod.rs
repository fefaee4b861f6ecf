//! # Domain Entities
//!
//! Core domain entities representing the main business objects in the
//! marketplace. All entities map directly to their corresponding database
//! tables.
//!
//! - **User**: An account with profile data and exchange statistics
//! - **Skill**: A listing a user offers or seeks, owned by exactly one user
//! - **Exchange**: A proposed barter pairing two users and two skills
//! - **Message**: A chat message scoped to one exchange
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer,
//! following the dependency inversion principle.

mod exchange;
mod message;
mod skill;
mod user;

pub use exchange::{Exchange, ExchangeRepository, ExchangeStatus, NewExchange};
pub use message::{Message, MessageRepository, NewMessage};
pub use skill::{NewSkill, Skill, SkillRepository, SkillType, SkillUpdate};
pub use user::{NewUser, User, UserProfileUpdate, UserRepository};
