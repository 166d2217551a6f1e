use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogLoader, ItemListFetcher};
use crate::error::{Error, Result};
use crate::scheduler::SlideshowScheduler;

/// Turns category selections into scheduler sessions.
///
/// A selection only replaces the running session once its items are fetched;
/// an unknown category or a failed fetch leaves the current slideshow playing.
#[derive(Debug)]
pub struct Player<C> {
    client: C,
    scheduler: SlideshowScheduler,
    catalog: Catalog,
    selected: Option<String>,
}

impl<C: CatalogLoader + ItemListFetcher> Player<C> {
    pub fn new(client: C, scheduler: SlideshowScheduler) -> Self {
        Self {
            client,
            scheduler,
            catalog: Catalog::default(),
            selected: None,
        }
    }

    pub async fn load_catalog(&mut self) -> Result<&Catalog> {
        self.catalog = self.client.list_categories().await?;
        info!(breeds = self.catalog.breeds().count(), "catalog loaded");
        Ok(&self.catalog)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scheduler(&self) -> &SlideshowScheduler {
        &self.scheduler
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Fetch `category` and restart the slideshow on it. Returns the number
    /// of items in the new sequence.
    pub async fn select(&mut self, category: &str) -> Result<usize> {
        if !self.catalog.contains(category) {
            warn!(category, "not in catalog, keeping current slideshow");
            return Err(Error::UnknownCategory(category.to_string()));
        }

        let items = match self.client.fetch_items(category).await {
            Ok(items) => items,
            Err(e) => {
                warn!(category, "fetch failed, keeping current slideshow: {e}");
                return Err(e);
            }
        };

        let count = items.len();
        info!(category, items = count, "switching slideshow");
        self.scheduler.start(items);
        self.selected = Some(category.to_string());
        Ok(count)
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.selected = None;
    }
}
