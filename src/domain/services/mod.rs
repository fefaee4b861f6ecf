//! Domain Services
//!
//! Pure business rules with no storage or framework dependencies.

pub mod exchange_policy;

pub use exchange_policy::{authorize_transition, TransitionDenied};
