//! Port contracts for review persistence and notification delivery.

pub mod log;
pub mod notifier;
pub mod settings;

pub use log::{ReviewLogRepository, ReviewLogRepositoryError, ReviewLogRepositoryResult};
pub use notifier::{PendingReviewNotice, ReviewNotifier, ReviewNotifierError};
pub use settings::{SettingsRepository, SettingsRepositoryError, SettingsRepositoryResult};

#[cfg(test)]
pub use settings::MockSettingsRepository;
