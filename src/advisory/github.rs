//! GitHub global security advisory adapter
//!
//! API endpoint: https://api.github.com/advisories?ecosystem=npm&affects={package}
//! Anonymous access works but is heavily rate limited; a token lifts it.

use crate::advisory::{AdvisoryConfig, AdvisoryRecord, AdvisorySource, RawAdvisory};
use crate::error::RegistryError;
use crate::registry::{HttpClient, DEFAULT_USER_AGENT};
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

/// GitHub REST API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

const SOURCE_NAME: &str = "GitHub Advisory";

/// Advisory source backed by the GitHub advisory database
pub struct GitHubAdvisorySource {
    client: HttpClient,
    base_url: String,
    page_size: usize,
}

impl GitHubAdvisorySource {
    /// Create a new source; lookups are never retried
    pub fn new(config: &AdvisoryConfig) -> Result<Self, RegistryError> {
        let client = HttpClient::with_config(config.timeout, DEFAULT_USER_AGENT)?
            .with_max_retries(0)
            .with_bearer_token(config.token.clone());

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// Build the advisory query URL for a package
    fn build_url(&self, ecosystem: &str, package: &str) -> Result<Url, RegistryError> {
        let per_page = self.page_size.to_string();
        Url::parse_with_params(
            &format!("{}/advisories", self.base_url),
            &[
                ("ecosystem", ecosystem),
                ("affects", package),
                ("per_page", per_page.as_str()),
            ],
        )
        .map_err(|e| RegistryError::invalid_response(package, SOURCE_NAME, e.to_string()))
    }
}

#[async_trait]
impl AdvisorySource for GitHubAdvisorySource {
    fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch_advisories(
        &self,
        ecosystem: &str,
        package: &str,
    ) -> Result<Vec<AdvisoryRecord>, RegistryError> {
        let url = self.build_url(ecosystem, package)?;
        debug!(package, url = %url, "querying advisories");

        let raw: Vec<RawAdvisory> = self
            .client
            .get_json(url.as_str(), package, SOURCE_NAME)
            .await?;

        Ok(raw
            .into_iter()
            .take(self.page_size)
            .filter_map(|advisory| advisory.into_record(package))
            .collect())
    }
}
