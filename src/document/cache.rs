//! Bounded cache of rendered pages.

use std::num::NonZeroUsize;
use std::sync::Arc;

use log::debug;
use lru::LruCache;

use super::{PageImage, PageRenderer};
use crate::error::DoclabelError;
use crate::ir::Zoom;

/// Default number of rendered pages kept per document.
pub const DEFAULT_CAPACITY: usize = 16;

/// `(page index, zoom in tenths)`
type RenderKey = (usize, i64);

/// LRU cache of rendered pages for one document.
///
/// Keys are the page index and the zoom rounded to one decimal. The cache
/// belongs to a single document session and is dropped or cleared when the
/// session switches documents.
pub struct RenderCache {
    entries: LruCache<RenderKey, Arc<PageImage>>,
    hits: u64,
    misses: u64,
}

impl RenderCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached render of `page` at `zoom`, rendering on a miss.
    pub fn get_or_render<R>(
        &mut self,
        renderer: &R,
        page: usize,
        zoom: Zoom,
    ) -> Result<Arc<PageImage>, DoclabelError>
    where
        R: PageRenderer + ?Sized,
    {
        let key = (page, zoom.cache_key());
        if let Some(image) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(Arc::clone(image));
        }

        self.misses += 1;
        debug!("rendering page {} at zoom {:.1}", page, zoom.factor());
        let image = Arc::new(renderer.render(page, zoom)?);
        self.entries.put(key, Arc::clone(&image));
        Ok(image)
    }

    /// Drops every cached page.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
