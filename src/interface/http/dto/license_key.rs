use crate::domain::entities::license_key::{KeyStatus, LicenseKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLicenseKeyRequest {
    #[serde(rename = "type", default)]
    pub key_type: String,
    #[serde(default)]
    pub mode: String,
    pub custom_name: Option<String>,
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseKeyCreatedResponse {
    pub key: String,
    #[serde(rename = "type")]
    pub key_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    pub expires_at: String,
}

impl From<&LicenseKey> for LicenseKeyCreatedResponse {
    fn from(license: &LicenseKey) -> Self {
        Self {
            key: license.key.to_string(),
            key_type: license.key_type.as_str().to_string(),
            days: license.key_type.custom_days(),
            expires_at: license.expires_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListLicenseKeysParams {
    #[serde(rename = "type")]
    pub key_type: Option<String>,
    pub q: Option<String>,
    pub page: Option<String>,
}

impl ListLicenseKeysParams {
    /// Unparsable or missing pages fall back to the first page.
    pub fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1)
    }
}

#[derive(Debug, Serialize)]
pub struct LicenseKeyListItem {
    pub key: String,
    #[serde(rename = "type")]
    pub key_type: String,
    /// Expiry date, `YYYY-MM-DD`.
    pub date: String,
}

impl From<&LicenseKey> for LicenseKeyListItem {
    fn from(license: &LicenseKey) -> Self {
        Self {
            key: license.key.to_string(),
            key_type: license.key_type.as_str().to_string(),
            date: license.expires_at.to_date_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseKeyListResponse {
    pub items: Vec<LicenseKeyListItem>,
    pub page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseKeyDetailsResponse {
    pub key: String,
    #[serde(rename = "type")]
    pub key_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    pub created_at: String,
    pub expires_at: String,
    pub status: &'static str,
}

impl LicenseKeyDetailsResponse {
    pub fn new(license: &LicenseKey, status: KeyStatus) -> Self {
        Self {
            key: license.key.to_string(),
            key_type: license.key_type.as_str().to_string(),
            days: license.key_type.custom_days(),
            created_at: license.created_at.to_rfc3339(),
            expires_at: license.expires_at.to_rfc3339(),
            status: status.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteLicenseKeyResponse {
    pub ok: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct ValidateLicenseKeyRequest {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateLicenseKeyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::license_key::KeyType;
    use crate::domain::value_objects::key_name::KeyName;
    use crate::domain::value_objects::timestamps::Timestamp;
    use time::macros::datetime;

    fn sample(key_type: KeyType) -> LicenseKey {
        LicenseKey {
            key: KeyName::parse("URAZ-1").unwrap(),
            key_type,
            created_at: Timestamp::from(datetime!(2024-01-01 00:00:00 UTC)),
            expires_at: Timestamp::from(datetime!(2024-01-08 00:00:00 UTC)),
        }
    }

    #[test]
    fn given_create_request_json_when_parsed_should_read_camel_case_fields() {
        let req: CreateLicenseKeyRequest = serde_json::from_str(
            r#"{"type":"custom_days","mode":"custom","customName":"VIP","days":5}"#,
        )
        .unwrap();

        assert_eq!(req.key_type, "custom_days");
        assert_eq!(req.custom_name.as_deref(), Some("VIP"));
        assert_eq!(req.days, Some(5));
    }

    #[test]
    fn given_created_key_when_serialized_should_omit_days_for_fixed_types() {
        let json = serde_json::to_value(LicenseKeyCreatedResponse::from(&sample(KeyType::Weekly)))
            .unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "key": "URAZ-1",
                "type": "weekly",
                "expiresAt": "2024-01-08T00:00:00Z"
            })
        );
    }

    #[test]
    fn given_list_item_when_serialized_should_render_expiry_date() {
        let json = serde_json::to_value(LicenseKeyListItem::from(&sample(KeyType::Weekly))).unwrap();
        assert_eq!(json["date"], "2024-01-08");
    }

    #[test]
    fn given_bad_page_values_when_parsed_should_fall_back_to_first_page() {
        let params = |p: &str| ListLicenseKeysParams {
            page: Some(p.to_string()),
            ..Default::default()
        };
        assert_eq!(params("3").page_number(), 3);
        assert_eq!(params("0").page_number(), 1);
        assert_eq!(params("-2").page_number(), 1);
        assert_eq!(params("abc").page_number(), 1);
        assert_eq!(ListLicenseKeysParams::default().page_number(), 1);
    }

    #[test]
    fn given_invalid_verdict_when_serialized_should_only_carry_valid_flag() {
        let json = serde_json::to_value(ValidateLicenseKeyResponse {
            valid: false,
            expires_at: None,
            key_type: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "valid": false }));
    }
}
