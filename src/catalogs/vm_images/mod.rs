mod models;

use std::sync::Arc;

use log::debug;
use url::form_urlencoded;

use crate::cloud::{
    Architecture, CatalogKind, ImageFilter, ImageState, MachineImage, PUBLIC_OWNER, Platform,
    ResourceStatus,
};
use crate::context::ProviderContext;
use crate::error::CloudError;
use crate::transport::{Method, Transport};

use models::{VmImageEntry, VmImageList};

/// Reader for the current VM image catalog.
///
/// Unlike the legacy endpoint this one narrows server-side: region and
/// ownership category travel as query parameters, so the filter shapes the
/// request rather than the decoded entries.
#[derive(Clone)]
pub struct VmImageCatalog {
    context: ProviderContext,
    transport: Arc<dyn Transport>,
}

impl VmImageCatalog {
    pub fn new(context: ProviderContext, transport: Arc<dyn Transport>) -> Self {
        Self { context, transport }
    }

    pub async fn list(&self, filter: &ImageFilter) -> Result<Vec<MachineImage>, CloudError> {
        let entries = self.fetch(filter).await?;
        Ok(entries.into_iter().map(|e| self.to_image(e)).collect())
    }

    /// Status projection over the same payload without building full images.
    pub async fn list_statuses(&self) -> Result<Vec<ResourceStatus>, CloudError> {
        let entries = self.fetch(&ImageFilter::machine()).await?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| entry.name)
            .map(|id| ResourceStatus::new(id, ImageState::Active))
            .collect())
    }

    async fn fetch(&self, filter: &ImageFilter) -> Result<Vec<VmImageEntry>, CloudError> {
        // The provider's category parameter only distinguishes "user" images
        // from the shared pool; an empty value asks for the shared pool.
        let category = match filter.owner() {
            Some(PUBLIC_OWNER) => "",
            _ => "user",
        };
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("location", self.context.region_id())
            .append_pair("category", category)
            .finish();
        let url = format!(
            "{}/services/vmimages?{}",
            self.context.request_prefix(),
            query
        );
        let response = self.transport.execute(Method::Get, &url, None).await?;
        let listing: VmImageList = quick_xml::de::from_str(&response.body)?;
        debug!("current catalog returned {} entries", listing.images.len());
        Ok(listing.images)
    }

    fn to_image(&self, entry: VmImageEntry) -> MachineImage {
        let id = entry.name.unwrap_or_default();
        let label = entry.label.unwrap_or_else(|| id.clone());
        let os = entry.os_disk_configuration.and_then(|c| c.os);

        let owner = match entry.category.as_deref() {
            Some(category) if category.eq_ignore_ascii_case("user") => {
                self.context.account_number().to_string()
            }
            _ => PUBLIC_OWNER.to_string(),
        };

        let platform = [os.as_deref(), Some(label.as_str()), Some(id.as_str())]
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
            CatalogKind::Current,
        )
    }
}
