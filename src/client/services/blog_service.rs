use crate::client::config::ClientConfig;
use crate::client::error::FetchError;
use crate::client::services::fetch_service::FetchService;
use crate::common::models::BlogEntry;
use log::warn;
use url::Url;

/// Blog endpoints of the content service. Failures never reach the caller: they are
/// turned into placeholder entries so there is always something to render.
#[derive(Debug, Clone)]
pub struct BlogService {
    fetch: FetchService,
    api_url: Url,
}

impl BlogService {
    pub fn new(api_url: &str) -> Result<Self, FetchError> {
        let parsed = Url::parse(api_url).map_err(|e| FetchError::InvalidUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl {
                url: api_url.to_string(),
                reason: "not a base url".to_string(),
            });
        }
        Ok(Self { fetch: FetchService::new(), api_url: parsed })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, FetchError> {
        Self::new(&config.api_url)
    }

    pub fn with_fetch_service(mut self, fetch: FetchService) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    // base path, with or without trailing slash, followed by one percent-encoded segment per part
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn entry_url(&self, id: &str) -> Url {
        self.endpoint(&["blog", "entry", id])
    }

    pub fn newest_url(&self) -> Url {
        self.endpoint(&["blog", "newest"])
    }

    /// Fetch entry `id`, or a placeholder describing why it could not be fetched.
    pub async fn blog_entry(&self, id: &str) -> BlogEntry {
        let url = self.entry_url(id);
        match self.fetch.fetch_json::<BlogEntry>(url.as_str()).await {
            Ok(entry) => entry,
            Err(error) => {
                warn!("[BLOG] entry {} unavailable: {}", id, error);
                build_error_entry(&error)
            }
        }
    }

    /// Fetch the newest entries, or a one-item placeholder list.
    pub async fn newest(&self) -> Vec<BlogEntry> {
        let url = self.newest_url();
        match self.fetch.fetch_json::<Vec<BlogEntry>>(url.as_str()).await {
            Ok(entries) => entries,
            Err(error) => {
                warn!("[BLOG] newest entries unavailable: {}", error);
                build_error_entries(&error)
            }
        }
    }

    /// Setter form of [`blog_entry`](Self::blog_entry): `setter` always receives something renderable.
    pub async fn retrieve_blog_entry<F>(&self, id: &str, setter: F)
    where
        F: FnOnce(BlogEntry),
    {
        setter(self.blog_entry(id).await)
    }

    pub async fn retrieve_newest<F>(&self, setter: F)
    where
        F: FnOnce(Vec<BlogEntry>),
    {
        setter(self.newest().await)
    }
}

pub fn build_error_entry(error: &FetchError) -> BlogEntry {
    BlogEntry::placeholder(&error.message())
}

/// List-shaped placeholder used where a list of entries is expected.
pub fn build_error_entries(error: &FetchError) -> Vec<BlogEntry> {
    vec![build_error_entry(error)]
}
