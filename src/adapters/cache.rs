use crate::domain::model::CourseCatalogEntry;
use crate::domain::ports::CourseCatalogProvider;
use crate::utils::cache::{Clock, SystemClock, TtlCache};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Duration;
use std::sync::{Arc, Mutex};

type CatalogKey = (String, Option<String>);

/// Catalog decorator that remembers fetches per (department, curriculum) for
/// a configurable TTL. The cache lives inside this object; dropping the
/// decorator drops the cache.
pub struct CachedCatalog<P> {
    inner: P,
    cache: Mutex<TtlCache<CatalogKey, Vec<CourseCatalogEntry>>>,
}

impl<P> CachedCatalog<P> {
    pub fn new(inner: P, ttl_seconds: i64) -> Self {
        Self::with_clock(inner, Duration::seconds(ttl_seconds), Arc::new(SystemClock))
    }

    pub fn with_clock(inner: P, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            cache: Mutex::new(TtlCache::new(ttl, clock)),
        }
    }
}

#[async_trait]
impl<P: CourseCatalogProvider> CourseCatalogProvider for CachedCatalog<P> {
    async fn fetch_courses(
        &self,
        department_id: &str,
        curriculum_id: Option<&str>,
    ) -> Result<Vec<CourseCatalogEntry>> {
        let key = (
            department_id.to_string(),
            curriculum_id.map(str::to_string),
        );

        // Lock is released before awaiting the inner fetch.
        if let Some(hit) = self.cache.lock().expect("catalog cache lock poisoned").get(&key) {
            tracing::debug!("catalog cache hit for department {}", department_id);
            return Ok(hit);
        }

        let fetched = self.inner.fetch_courses(department_id, curriculum_id).await?;
        self.cache
            .lock()
            .expect("catalog cache lock poisoned")
            .insert(key, fetched.clone());
        Ok(fetched)
    }
}
