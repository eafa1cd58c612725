use crate::error::ServiceError;
use async_trait::async_trait;
use cuid2::CuidConstructor;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};
use url::{form_urlencoded, ParseError, Url};

#[cfg(any(test, feature = "mocks"))]
use mockall::automock;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Key lengths cuid2 can produce exactly.
pub const MIN_SHORT_KEY_LENGTH: u16 = 2;
pub const MAX_SHORT_KEY_LENGTH: u16 = 32;

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait LinkRepository: Debug + Send + Sync {
    /// Stores `link` unless a live record already owns its short key.
    /// Returns `false` when the key is taken.
    async fn insert_if_absent(&self, link: &ShortLink, now: u64) -> Result<bool, ServiceError>;
    /// Increments the counter of a live record and returns it updated.
    async fn resolve_and_increment(
        &self,
        short_key: &str,
        now: u64,
    ) -> Result<Option<ShortLink>, ServiceError>;
}

#[async_trait]
impl<T: LinkRepository + ?Sized> LinkRepository for &T {
    async fn insert_if_absent(&self, link: &ShortLink, now: u64) -> Result<bool, ServiceError> {
        (**self).insert_if_absent(link, now).await
    }

    async fn resolve_and_increment(
        &self,
        short_key: &str,
        now: u64,
    ) -> Result<Option<ShortLink>, ServiceError> {
        (**self).resolve_and_increment(short_key, now).await
    }
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

pub struct CuidGenerator {
    gen: CuidConstructor,
}

impl CuidGenerator {
    /// `length` must lie within `MIN_SHORT_KEY_LENGTH..=MAX_SHORT_KEY_LENGTH`,
    /// cuid2 panics below it. `Configuration::load` enforces the range.
    pub fn new(length: u16) -> Self {
        Self {
            gen: CuidConstructor::new().with_length(length),
        }
    }
}

impl IdGenerator for CuidGenerator {
    fn generate_id(&self) -> String {
        self.gen.create_id()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShortLink {
    pub short_key: String,
    pub url: String,
    pub counter: u64,
    pub expires_at: u64,
}

impl ShortLink {
    pub fn new(short_key: String, url: String, expires_at: u64) -> Self {
        Self {
            short_key,
            url,
            counter: 0,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSettings {
    pub days_to_live: u64,
    pub max_attempts: u32,
}

impl LinkSettings {
    pub fn expires_at(&self, now: u64) -> u64 {
        now.saturating_add(self.days_to_live.saturating_mul(SECONDS_PER_DAY))
    }
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            days_to_live: 2,
            max_attempts: 10,
        }
    }
}

#[derive(Debug)]
pub struct LinkShortener<R: LinkRepository, G: IdGenerator> {
    link_repo: R,
    id_generator: G,
    settings: LinkSettings,
}

impl<R: LinkRepository, G: IdGenerator> LinkShortener<R, G> {
    pub fn new(link_repo: R, id_generator: G, settings: LinkSettings) -> Self {
        Self {
            link_repo,
            id_generator,
            settings,
        }
    }

    pub fn repository(&self) -> &R {
        &self.link_repo
    }

    /// Creates a record for an already normalized `url` under a fresh short key.
    pub async fn shorten(&self, url: &str) -> Result<ShortLink, ServiceError> {
        self.shorten_at(url, epoch_now()).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn shorten_at(&self, url: &str, now: u64) -> Result<ShortLink, ServiceError> {
        for attempt in 1..=self.settings.max_attempts {
            let candidate = ShortLink::new(
                self.id_generator.generate_id(),
                url.to_string(),
                self.settings.expires_at(now),
            );
            if self.link_repo.insert_if_absent(&candidate, now).await? {
                return Ok(candidate);
            }
            tracing::warn!(
                short_key = %candidate.short_key,
                attempt,
                "Short key already taken, retrying"
            );
        }

        Err(ServiceError::CollisionExhausted(self.settings.max_attempts))
    }
}

/// Read side of the shortener: resolves keys and counts visits.
#[derive(Debug)]
pub struct LinkResolver<R: LinkRepository> {
    link_repo: R,
}

impl<R: LinkRepository> LinkResolver<R> {
    pub fn new(link_repo: R) -> Self {
        Self { link_repo }
    }

    pub fn repository(&self) -> &R {
        &self.link_repo
    }

    /// Counts a visit and returns the record to redirect to.
    pub async fn visit(&self, short_key: &str) -> Result<ShortLink, ServiceError> {
        self.visit_at(short_key, epoch_now()).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn visit_at(&self, short_key: &str, now: u64) -> Result<ShortLink, ServiceError> {
        self.link_repo
            .resolve_and_increment(short_key, now)
            .await?
            .ok_or_else(|| ServiceError::RecordNotFound(short_key.to_string()))
    }
}

/// Returns the first non-empty `original_url` value of a form encoded body.
pub fn original_url_from_form(body: &[u8]) -> Result<String, ServiceError> {
    form_urlencoded::parse(body)
        .find(|(key, value)| key == "original_url" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| ServiceError::MissingField("original_url".to_string()))
}

/// Prefixes `http://` when the submitted text has no scheme, so the redirect
/// does not resolve relative to the shortener itself.
///
/// Text with control characters is rejected, it could never be sent back as a
/// `Location` header.
pub fn normalize_url(raw: &str) -> Result<String, ServiceError> {
    if raw.chars().any(char::is_control) {
        return Err(ServiceError::InvalidUrl(raw.to_string()));
    }

    Ok(match Url::parse(raw) {
        Err(ParseError::RelativeUrlWithoutBase) => format!("http://{}", raw),
        _ => raw.to_string(),
    })
}

pub fn epoch_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
