// Use case: validate_license_key.

use crate::application::context::AppContext;
use crate::application::shared::license_key_types::LicenseKeyUseCaseError;
use crate::domain::entities::license_key::KeyType;
use crate::domain::value_objects::timestamps::Timestamp;
use metrics::counter;
use tracing::debug;

/// Why a candidate was accepted or refused. Only used for metrics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Empty,
    Unknown,
    Expired,
}

impl ValidationOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Empty => "empty",
            Self::Unknown => "unknown",
            Self::Expired => "expired",
        }
    }
}

/// Verdict returned to the caller; metadata is only present for valid keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateLicenseKeyResult {
    pub outcome: ValidationOutcome,
    pub key_type: Option<KeyType>,
    pub expires_at: Option<Timestamp>,
}

impl ValidateLicenseKeyResult {
    fn refused(outcome: ValidationOutcome) -> Self {
        Self {
            outcome,
            key_type: None,
            expires_at: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.outcome == ValidationOutcome::Valid
    }
}

/// Read-only check of whether a key string currently denotes an unexpired record.
pub struct ValidateLicenseKeyUseCase;

impl ValidateLicenseKeyUseCase {
    pub async fn execute(
        ctx: &AppContext,
        candidate: &str,
    ) -> Result<ValidateLicenseKeyResult, LicenseKeyUseCaseError> {
        let result = Self::check(ctx, candidate).await?;
        counter!("license_key_validations_total", "result" => result.outcome.as_str())
            .increment(1);
        debug!(outcome = result.outcome.as_str(), "license_key_validated");
        Ok(result)
    }

    async fn check(
        ctx: &AppContext,
        candidate: &str,
    ) -> Result<ValidateLicenseKeyResult, LicenseKeyUseCaseError> {
        // Step 1: Trim; blank input is never valid.
        let key = candidate.trim();
        if key.is_empty() {
            return Ok(ValidateLicenseKeyResult::refused(ValidationOutcome::Empty));
        }

        // Step 2: Look the key up.
        let Some(license) = ctx.repos.license_key.find(key).await? else {
            return Ok(ValidateLicenseKeyResult::refused(ValidationOutcome::Unknown));
        };

        // Step 3: Compare against the clock; the expiry instant itself is invalid.
        if !license.is_active_at(ctx.clock.now()) {
            return Ok(ValidateLicenseKeyResult::refused(ValidationOutcome::Expired));
        }

        Ok(ValidateLicenseKeyResult {
            outcome: ValidationOutcome::Valid,
            key_type: Some(license.key_type),
            expires_at: Some(license.expires_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ValidateLicenseKeyUseCase, ValidationOutcome};
    use crate::application::context::test_support::test_context;
    use crate::application::usecases::issue_license_key::{
        IssueLicenseKeyCommand, IssueLicenseKeyUseCase,
    };
    use crate::domain::entities::license_key::KeyType;
    use time::Duration;

    async fn issue(ctx: &crate::application::context::AppContext, key_type: &str) -> String {
        IssueLicenseKeyUseCase::execute(
            ctx,
            IssueLicenseKeyCommand {
                key_type: key_type.to_string(),
                mode: "random".to_string(),
                custom_name: None,
                days: None,
            },
        )
        .await
        .unwrap()
        .key
        .to_string()
    }

    #[tokio::test]
    async fn given_fresh_hourly_key_when_validated_should_be_valid_then_expire() {
        let (ctx, clock) = test_context();
        let key = issue(&ctx, "hourly").await;

        let now = ValidateLicenseKeyUseCase::execute(&ctx, &key).await.unwrap();
        assert!(now.is_valid());
        assert_eq!(now.key_type, Some(KeyType::Hourly));

        clock.advance(Duration::minutes(61));
        let later = ValidateLicenseKeyUseCase::execute(&ctx, &key).await.unwrap();
        assert_eq!(later.outcome, ValidationOutcome::Expired);
        assert_eq!(later.key_type, None);
    }

    #[tokio::test]
    async fn given_clock_exactly_at_expiry_when_validated_should_be_invalid() {
        let (ctx, clock) = test_context();
        let key = issue(&ctx, "daily").await;

        clock.advance(Duration::days(1) - Duration::nanoseconds(1));
        assert!(ValidateLicenseKeyUseCase::execute(&ctx, &key).await.unwrap().is_valid());

        clock.advance(Duration::nanoseconds(1));
        let at_boundary = ValidateLicenseKeyUseCase::execute(&ctx, &key).await.unwrap();
        assert_eq!(at_boundary.outcome, ValidationOutcome::Expired);
    }

    #[tokio::test]
    async fn given_padded_candidate_when_validated_should_trim_before_lookup() {
        let (ctx, _clock) = test_context();
        let key = issue(&ctx, "weekly").await;

        let result = ValidateLicenseKeyUseCase::execute(&ctx, &format!("  {key}\t"))
            .await
            .unwrap();

        assert!(result.is_valid());
    }

    #[tokio::test]
    async fn given_blank_or_unknown_candidate_when_validated_should_be_invalid() {
        let (ctx, _clock) = test_context();

        let blank = ValidateLicenseKeyUseCase::execute(&ctx, "   ").await.unwrap();
        let unknown = ValidateLicenseKeyUseCase::execute(&ctx, "URAZ-NOPE").await.unwrap();

        assert_eq!(blank.outcome, ValidationOutcome::Empty);
        assert_eq!(unknown.outcome, ValidationOutcome::Unknown);
    }

    #[tokio::test]
    async fn given_wrong_case_candidate_when_validated_should_be_unknown() {
        let (ctx, _clock) = test_context();
        let key = issue(&ctx, "monthly").await;

        let result = ValidateLicenseKeyUseCase::execute(&ctx, &key.to_lowercase())
            .await
            .unwrap();

        assert_eq!(result.outcome, ValidationOutcome::Unknown);
    }
}
