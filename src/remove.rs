use std::sync::Arc;

use log::debug;

use crate::cloud::MachineImage;
use crate::context::ProviderContext;
use crate::error::CloudError;
use crate::transport::{Method, Transport};

/// Deletes an image from whichever catalog it belongs to.
///
/// Deletion is terminal and addressed by the image's `catalog_kind`; exactly
/// one DELETE goes out per call and nothing is retried here. The `comp=media`
/// marker asks the provider to drop the backing media along with the catalog
/// entry.
#[derive(Clone)]
pub struct ImageRemover {
    context: ProviderContext,
    transport: Arc<dyn Transport>,
}

impl ImageRemover {
    pub fn new(context: ProviderContext, transport: Arc<dyn Transport>) -> Self {
        Self { context, transport }
    }

    pub async fn remove(&self, image: &MachineImage) -> Result<(), CloudError> {
        let url = format!(
            "{}/services/{}/{}?comp=media",
            self.context.request_prefix(),
            image.catalog_kind().service_segment(),
            image.id()
        );
        debug!("removing image '{}' ({:?})", image.id(), image.catalog_kind());
        self.transport.execute(Method::Delete, &url, None).await?;
        Ok(())
    }
}
