mod models;

use std::sync::Arc;

use log::debug;

use crate::cloud::{
    Architecture, CatalogKind, ImageFilter, ImageState, MachineImage, PUBLIC_OWNER, Platform,
    ResourceStatus,
};
use crate::context::ProviderContext;
use crate::error::CloudError;
use crate::transport::{Method, Transport};

use models::{OsImageEntry, OsImageList};

/// Reader for the legacy OS image catalog.
///
/// The endpoint has no server-side filtering at all: one GET returns every
/// image the account can see, and region scoping happens here on the decoded
/// entries. Provider response order is preserved.
#[derive(Clone)]
pub struct OsImageCatalog {
    context: ProviderContext,
    transport: Arc<dyn Transport>,
}

impl OsImageCatalog {
    pub fn new(context: ProviderContext, transport: Arc<dyn Transport>) -> Self {
        Self { context, transport }
    }

    pub async fn list(&self, _filter: &ImageFilter) -> Result<Vec<MachineImage>, CloudError> {
        let entries = self.fetch().await?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.offered_in(self.context.region_id()))
            .map(|entry| self.to_image(entry))
            .collect())
    }

    /// Status projection over the same payload without building full images.
    pub async fn list_statuses(&self) -> Result<Vec<ResourceStatus>, CloudError> {
        let entries = self.fetch().await?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.offered_in(self.context.region_id()))
            .filter_map(|entry| entry.name)
            .map(|id| ResourceStatus::new(id, ImageState::Active))
            .collect())
    }

    async fn fetch(&self) -> Result<Vec<OsImageEntry>, CloudError> {
        let url = format!("{}/services/images", self.context.request_prefix());
        let response = self.transport.execute(Method::Get, &url, None).await?;
        let listing: OsImageList = quick_xml::de::from_str(&response.body)?;
        debug!("legacy catalog returned {} entries", listing.images.len());
        Ok(listing.images)
    }

    fn to_image(&self, entry: OsImageEntry) -> MachineImage {
        let id = entry.name.unwrap_or_default();
        let label = entry.label.unwrap_or_else(|| id.clone());

        // Anything the provider lists under a vendor category is shared with
        // every account; only "User" entries belong to this one.
        let owner = match entry.category.as_deref() {
            Some(category) if category.eq_ignore_ascii_case("user") => {
                self.context.account_number().to_string()
            }
            _ => PUBLIC_OWNER.to_string(),
        };

        let platform = [entry.os.as_deref(), Some(label.as_str()), Some(id.as_str())]
            .into_iter()
            .flatten()
            .map(Platform::guess)
            .find(|p| *p != Platform::Unknown)
            .unwrap_or(Platform::Unknown);

        MachineImage::new(
            owner,
            self.context.region_id().to_string(),
            id.clone(),
            id,
            entry.description.unwrap_or(label),
            Architecture::I64,
            platform,
            ImageState::Active,
            CatalogKind::Legacy,
        )
    }
}
