use crate::{
    core::{LinkRepository, ShortLink},
    error::ServiceError,
};
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

/// Link store kept in process memory, with the same insert-if-absent and
/// expiry semantics as the DynamoDB table.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, ShortLink>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_links(links: impl IntoIterator<Item = ShortLink>) -> Self {
        let repo = Self::new();
        for link in links {
            repo.links.insert(link.short_key.clone(), link);
        }
        repo
    }

    pub fn get(&self, short_key: &str) -> Option<ShortLink> {
        self.links.get(short_key).map(|link| link.clone())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert_if_absent(&self, link: &ShortLink, now: u64) -> Result<bool, ServiceError> {
        match self.links.entry(link.short_key.clone()) {
            Entry::Occupied(mut existing) => {
                if !existing.get().is_expired(now) {
                    return Ok(false);
                }
                existing.insert(link.clone());
                Ok(true)
            }
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
                Ok(true)
            }
        }
    }

    async fn resolve_and_increment(
        &self,
        short_key: &str,
        now: u64,
    ) -> Result<Option<ShortLink>, ServiceError> {
        match self.links.get_mut(short_key) {
            Some(mut link) if !link.is_expired(now) => {
                link.counter += 1;
                Ok(Some(link.clone()))
            }
            _ => Ok(None),
        }
    }
}
