use std::sync::Arc;

use crate::capture::{CaptureConfig, CaptureOrchestrator, CaptureRequest};
use crate::catalogs::ImageCatalog;
use crate::cloud::{CaptureTask, ImageClass, ImageFilter, ImageHandle, MachineImage, ResourceStatus};
use crate::context::ProviderContext;
use crate::error::CloudError;
use crate::remove::ImageRemover;
use crate::transport::Transport;
use crate::vm::VirtualMachineService;

/// Single entry point for image operations: pure composition of the merged
/// catalog view, the capture orchestrator, and the remover. Holds no state
/// across calls; every operation re-derives what it needs from the provider.
pub struct ImageSupport {
    catalog: ImageCatalog,
    orchestrator: CaptureOrchestrator,
    remover: ImageRemover,
}

impl ImageSupport {
    pub fn new(
        context: ProviderContext,
        transport: Arc<dyn Transport>,
        virtual_machines: Arc<dyn VirtualMachineService>,
    ) -> Self {
        Self::with_capture_config(context, transport, virtual_machines, CaptureConfig::default())
    }

    pub fn with_capture_config(
        context: ProviderContext,
        transport: Arc<dyn Transport>,
        virtual_machines: Arc<dyn VirtualMachineService>,
        capture: CaptureConfig,
    ) -> Self {
        Self {
            catalog: ImageCatalog::new(context.clone(), Arc::clone(&transport)),
            orchestrator: CaptureOrchestrator::new(
                context.clone(),
                Arc::clone(&transport),
                virtual_machines,
                capture,
            ),
            remover: ImageRemover::new(context, transport),
        }
    }

    /// Merged, filtered listing; legacy catalog entries first.
    pub async fn list_images(&self, filter: &ImageFilter) -> Result<Vec<MachineImage>, CloudError> {
        self.catalog.list(filter).await
    }

    /// Convenience over [`list_images`] for the common owner constraint.
    ///
    /// [`list_images`]: ImageSupport::list_images
    pub async fn list_machine_images_owned_by(
        &self,
        owner: &str,
    ) -> Result<Vec<MachineImage>, CloudError> {
        self.catalog
            .list(&ImageFilter::machine().owned_by(owner))
            .await
    }

    /// Merged `(id, state)` projection for pollers.
    pub async fn list_image_status(
        &self,
        class: ImageClass,
    ) -> Result<Vec<ResourceStatus>, CloudError> {
        self.catalog.statuses(class).await
    }

    /// Point lookup across both catalogs.
    pub async fn get_image(&self, image_id: &str) -> Result<Option<MachineImage>, CloudError> {
        self.catalog.find(image_id).await
    }

    /// Capture `request`'s VM into a new catalog entry. See
    /// [`CaptureOrchestrator::capture`] for the workflow and sharing
    /// semantics of the returned handle.
    pub async fn capture(
        &self,
        request: &CaptureRequest,
        task: Option<&CaptureTask>,
    ) -> Result<ImageHandle, CloudError> {
        self.orchestrator.capture(request, task).await
    }

    /// Remove by id: resolves which catalog the image lives in through a
    /// lookup, then issues the single catalog-specific DELETE. An id present
    /// in neither catalog is a [`CloudError::NotFound`].
    pub async fn remove(&self, image_id: &str) -> Result<(), CloudError> {
        let image = self
            .get_image(image_id)
            .await?
            .ok_or_else(|| CloudError::not_found(image_id))?;
        self.remover.remove(&image).await
    }

    /// Remove an image the caller already holds, skipping the resolution
    /// round trip since the handle carries its own catalog discriminator.
    pub async fn remove_image(&self, image: &MachineImage) -> Result<(), CloudError> {
        self.remover.remove(image).await
    }
}
