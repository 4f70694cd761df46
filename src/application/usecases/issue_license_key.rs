// Use case: issue_license_key.

use crate::application::context::AppContext;
use crate::application::shared::license_key_types::LicenseKeyUseCaseError;
use crate::domain::entities::license_key::{KeyType, LicenseKey};
use crate::domain::services::expiry::ExpiryCalculator;
use crate::domain::services::key_generator::generate_key;
use crate::domain::value_objects::key_name::{KeyName, KeyNameError};
use crate::domain::value_objects::timestamps::Timestamp;
use crate::infrastructure::db::stores::license_key_store::LicenseKeyRepositoryError;
use metrics::counter;
use tracing::{info, warn};

/// Random keys are regenerated this many times on collision before giving up.
const MAX_RANDOM_ATTEMPTS: usize = 3;

/// How the key string is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueMode {
    Random,
    Custom,
}

impl IssueMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "random" => Some(Self::Random),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Input for issuing a key, as received from the admin.
#[derive(Debug, Clone)]
pub struct IssueLicenseKeyCommand {
    pub key_type: String,
    pub mode: String,
    pub custom_name: Option<String>,
    pub days: Option<i64>,
}

/// Issues new license keys (random or custom-named).
pub struct IssueLicenseKeyUseCase;

impl IssueLicenseKeyUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: IssueLicenseKeyCommand,
    ) -> Result<LicenseKey, LicenseKeyUseCaseError> {
        // Step 1: Validate the mode.
        let mode = IssueMode::parse(&cmd.mode)
            .ok_or_else(|| LicenseKeyUseCaseError::Validation("invalid mode".to_string()))?;

        // Step 2: Resolve a custom name up front so bad input fails before any write.
        let custom = match mode {
            IssueMode::Custom => Some(
                KeyName::parse(cmd.custom_name.as_deref().unwrap_or("")).map_err(|e| match e {
                    KeyNameError::Empty => {
                        LicenseKeyUseCaseError::Validation("customName required".to_string())
                    }
                    other => LicenseKeyUseCaseError::Validation(other.to_string()),
                })?,
            ),
            IssueMode::Random => None,
        };

        // Step 3: Resolve the type and its expiry from the injected clock.
        let created_at = ctx.clock.now();
        let (key_type, expires_at) =
            ExpiryCalculator::compute_named(&cmd.key_type, cmd.days, created_at)
                .map_err(|e| LicenseKeyUseCaseError::Validation(e.to_string()))?;

        // Step 4: Persist; the store enforces uniqueness.
        let stored = match custom {
            Some(key) => {
                let license = LicenseKey {
                    key,
                    key_type,
                    created_at,
                    expires_at,
                };
                ctx.repos.license_key.create(&license).await?
            }
            None => Self::insert_random(ctx, key_type, created_at, expires_at).await?,
        };

        // Step 5: Record the issuance.
        counter!("license_keys_issued_total", "type" => key_type.as_str()).increment(1);
        info!(
            key = %stored.key,
            key_type = %stored.key_type,
            expires_at = %stored.expires_at.to_rfc3339(),
            "license_key_issued"
        );

        Ok(stored)
    }

    async fn insert_random(
        ctx: &AppContext,
        key_type: KeyType,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> Result<LicenseKey, LicenseKeyUseCaseError> {
        for attempt in 1..=MAX_RANDOM_ATTEMPTS {
            let raw = generate_key(&ctx.key_prefix);
            let key = KeyName::parse(&raw)
                .map_err(|e| LicenseKeyUseCaseError::Validation(e.to_string()))?;
            let license = LicenseKey {
                key,
                key_type,
                created_at,
                expires_at,
            };
            match ctx.repos.license_key.create(&license).await {
                Ok(stored) => return Ok(stored),
                Err(LicenseKeyRepositoryError::Conflict) => {
                    warn!(attempt, "generated license key collided; regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(LicenseKeyUseCaseError::Conflict)
    }
}
