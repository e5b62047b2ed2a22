//! Domain model for review decisions, review settings and escalation.

mod error;
mod log;
mod queue;
mod settings;
mod urgency;

pub use error::{ParseReviewOutcomeError, ReviewDomainError};
pub use log::{PersistedReviewLog, ReviewDecision, ReviewLog, ReviewLogId, ReviewOutcome};
pub use queue::{ReviewCandidate, daily_review_due, needs_review, select_for_review};
pub use settings::ReviewSettings;
pub use urgency::{EscalationRule, UrgencyStatus, assess_urgency};
