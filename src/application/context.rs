use std::sync::Arc;

use crate::domain::services::clock::Clock;
use crate::infrastructure::db::repositories::Repositories;

/// Shared application resources used by use cases.
pub struct AppContext {
    pub repos: Repositories,
    pub clock: Arc<dyn Clock>,
    /// Prefix for randomly generated keys.
    pub key_prefix: String,
}

impl AppContext {
    /// Build a new application context with shared repositories and services.
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>, key_prefix: impl Into<String>) -> Self {
        Self {
            repos,
            clock,
            key_prefix: key_prefix.into(),
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::AppContext;
    use crate::domain::services::clock::ManualClock;
    use crate::domain::value_objects::timestamps::Timestamp;
    use crate::infrastructure::db::repositories::Repositories;
    use std::sync::Arc;
    use time::macros::datetime;

    pub const TEST_PREFIX: &str = "URAZ";

    /// In-memory context pinned to 2024-01-01T00:00:00Z.
    pub fn test_context() -> (AppContext, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Timestamp::from(datetime!(
            2024-01-01 00:00:00 UTC
        ))));
        let ctx = AppContext::new(Repositories::in_memory(), clock.clone(), TEST_PREFIX);
        (ctx, clock)
    }
}
