//! In-memory adapters for tests and single-process use.

mod log;
mod notifier;
mod settings;

pub use log::InMemoryReviewLogRepository;
pub use notifier::InMemoryNotifier;
pub use settings::InMemorySettingsRepository;
