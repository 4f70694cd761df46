// Use case: list_license_keys.

use crate::application::context::AppContext;
use crate::application::shared::license_key_types::LicenseKeyUseCaseError;
use crate::domain::entities::license_key::{KeyType, LicenseKey};
use crate::infrastructure::db::stores::license_key_store::{LicenseKeyFilter, PageRequest};

/// Raw listing query; blank strings mean "no filter".
#[derive(Debug, Clone, Default)]
pub struct ListLicenseKeysQuery {
    pub key_type: Option<String>,
    pub query: Option<String>,
    pub page: u32,
}

#[derive(Debug, Clone)]
pub struct ListLicenseKeysResult {
    pub items: Vec<LicenseKey>,
    pub page: u32,
    pub total_pages: u32,
}

/// Paginated, newest-first key listing for the admin panel.
pub struct ListLicenseKeysUseCase;

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ListLicenseKeysUseCase {
    pub async fn execute(
        ctx: &AppContext,
        query: ListLicenseKeysQuery,
    ) -> Result<ListLicenseKeysResult, LicenseKeyUseCaseError> {
        // Step 1: Normalise the filter and reject unknown type names.
        let key_type = non_blank(query.key_type);
        if let Some(name) = key_type.as_deref() {
            if !KeyType::is_known_name(name) {
                return Err(LicenseKeyUseCaseError::Validation(format!(
                    "unknown key type: {name}"
                )));
            }
        }
        let filter = LicenseKeyFilter {
            key_type,
            query: non_blank(query.query),
        };
        let page = PageRequest::new(query.page);

        // Step 2: Fetch the window and compute the page count.
        let listing = ctx.repos.license_key.list(&filter, page).await?;

        Ok(ListLicenseKeysResult {
            items: listing.items,
            page: page.page,
            total_pages: page.total_pages(listing.total),
        })
    }
}
