pub mod os_images;
pub mod vm_images;

use std::sync::Arc;

use crate::cloud::{ImageClass, ImageFilter, MachineImage, ResourceStatus};
use crate::context::ProviderContext;
use crate::error::CloudError;
use crate::transport::Transport;

pub use os_images::OsImageCatalog;
pub use vm_images::VmImageCatalog;

/// Unified view over the two provider catalogs.
///
/// Listing order is a published contract: legacy entries first, then current
/// entries, each in provider response order. Some callers index results
/// positionally, so the concatenation must stay stable. Ids are NOT
/// de-duplicated across catalogs; a collision yields two entries that differ
/// in `catalog_kind`.
#[derive(Clone)]
pub struct ImageCatalog {
    os_images: OsImageCatalog,
    vm_images: VmImageCatalog,
}

impl ImageCatalog {
    pub fn new(context: ProviderContext, transport: Arc<dyn Transport>) -> Self {
        Self {
            os_images: OsImageCatalog::new(context.clone(), Arc::clone(&transport)),
            vm_images: VmImageCatalog::new(context, transport),
        }
    }

    /// Merge both catalogs, then apply the filter uniformly so platform and
    /// owner constraints behave identically for catalogs that cannot narrow
    /// server-side.
    pub async fn list(&self, filter: &ImageFilter) -> Result<Vec<MachineImage>, CloudError> {
        let mut images = self.os_images.list(filter).await?;
        images.extend(self.vm_images.list(filter).await?);
        images.retain(|image| filter.matches(image));
        Ok(images)
    }

    /// Merged `(id, state)` projection, same catalog order as [`list`].
    ///
    /// [`list`]: ImageCatalog::list
    pub async fn statuses(&self, _class: ImageClass) -> Result<Vec<ResourceStatus>, CloudError> {
        let mut statuses = self.os_images.list_statuses().await?;
        statuses.extend(self.vm_images.list_statuses().await?);
        Ok(statuses)
    }

    /// Point lookup across the merge. On a cross-catalog id collision the
    /// legacy entry wins, consistent with the merge order.
    pub async fn find(&self, image_id: &str) -> Result<Option<MachineImage>, CloudError> {
        let images = self.list(&ImageFilter::machine()).await?;
        Ok(images.into_iter().find(|image| image.id() == image_id))
    }
}
