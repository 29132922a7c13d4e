//! Rendered-view cache keyed by route path.
//!
//! Views are rendered on first access and served from memory until a
//! mutation calls [`RouteCache::revalidate_path`], after which the next
//! access renders again.

use std::collections::HashMap;
use std::future::Future;
use std::sync::RwLock;

use anyhow::Result;
use tracing::{debug, info};

#[derive(Default)]
struct RouteEntry {
    body: Option<String>,
    revision: u64,
}

#[derive(Default)]
pub struct RouteCache {
    routes: RwLock<HashMap<String, RouteEntry>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached body for `path`, rendering and storing it on a miss.
    ///
    /// A render that fails is not cached.
    pub async fn get_or_render<F, Fut>(&self, path: &str, render: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let revision = {
            let routes = self.routes.read().unwrap_or_else(|e| e.into_inner());
            match routes.get(path) {
                Some(RouteEntry { body: Some(body), .. }) => {
                    debug!(path, "serving cached view");
                    return Ok(body.clone());
                }
                Some(entry) => entry.revision,
                None => 0,
            }
        };

        let body = render().await?;

        let mut routes = self.routes.write().unwrap_or_else(|e| e.into_inner());
        let entry = routes.entry(path.to_string()).or_default();
        // A revalidation that landed while rendering wins; the stale body is dropped.
        if entry.revision == revision {
            entry.body = Some(body.clone());
        }
        Ok(body)
    }

    /// Mark the view at `path` stale so the next access renders it again.
    pub fn revalidate_path(&self, path: &str) {
        let mut routes = self.routes.write().unwrap_or_else(|e| e.into_inner());
        let entry = routes.entry(path.to_string()).or_default();
        entry.body = None;
        entry.revision += 1;
        info!(path, revision = entry.revision, "revalidated path");
    }

    /// Number of times `path` has been revalidated
    pub fn revision(&self, path: &str) -> u64 {
        let routes = self.routes.read().unwrap_or_else(|e| e.into_inner());
        routes.get(path).map_or(0, |entry| entry.revision)
    }

    pub fn is_cached(&self, path: &str) -> bool {
        let routes = self.routes.read().unwrap_or_else(|e| e.into_inner());
        routes.get(path).is_some_and(|entry| entry.body.is_some())
    }
}
