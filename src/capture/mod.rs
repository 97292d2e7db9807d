use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::debug;
use serde::Serialize;

use crate::catalogs::ImageCatalog;
use crate::cloud::{CaptureTask, ImageHandle, ImageState, MachineImage};
use crate::context::ProviderContext;
use crate::error::CloudError;
use crate::transport::{Method, Transport};
use crate::vm::VirtualMachineService;

const WINDOWS_AZURE_NS: &str = "http://schemas.microsoft.com/windowsazure";

/// What to turn into a new catalog entry.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    virtual_machine_id: String,
    name: String,
    description: String,
}

impl CaptureRequest {
    pub fn new(
        virtual_machine_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            virtual_machine_id: virtual_machine_id.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn virtual_machine_id(&self) -> &str {
        &self.virtual_machine_id
    }

    /// Target image name; the provider also uses it as the new entry's id.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Bound and backoff of the completion poll. The provider gives no
/// completion callback, only eventual visibility in the catalog, so the bound
/// is deployment policy rather than a constant.
#[derive(Debug, Clone, Copy)]
pub struct CaptureConfig {
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            poll_timeout: Duration::from_secs(15 * 60),
        }
    }
}

/// Body of the capture submission POST.
#[derive(Serialize)]
#[serde(rename = "CaptureRoleOperation")]
struct CaptureRoleOperation<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "OperationType")]
    operation_type: &'static str,
    #[serde(rename = "PostCaptureAction")]
    post_capture_action: &'static str,
    #[serde(rename = "TargetImageLabel")]
    target_image_label: &'a str,
    #[serde(rename = "TargetImageName")]
    target_image_name: &'a str,
}

/// Drives the image-creation workflow against a target virtual machine.
///
/// The workflow is strictly sequential on the caller's task: precondition
/// check, stop, capture submission, completion poll. Any failure before the
/// poll is fatal to the call; only the poll timeout is worth retrying (by
/// re-running the whole capture). The orchestrator never attempts
/// compensating cleanup, that guarantee belongs to the provider.
pub struct CaptureOrchestrator {
    context: ProviderContext,
    transport: Arc<dyn Transport>,
    virtual_machines: Arc<dyn VirtualMachineService>,
    catalog: ImageCatalog,
    config: CaptureConfig,
}

impl CaptureOrchestrator {
    pub fn new(
        context: ProviderContext,
        transport: Arc<dyn Transport>,
        virtual_machines: Arc<dyn VirtualMachineService>,
        config: CaptureConfig,
    ) -> Self {
        let catalog = ImageCatalog::new(context.clone(), Arc::clone(&transport));
        Self {
            context,
            transport,
            virtual_machines,
            catalog,
            config,
        }
    }

    /// Run one capture. On success the returned handle and the one delivered
    /// through `task` are the same allocation, so a completion hook's
    /// mutations show up in the synchronous result too.
    pub async fn capture(
        &self,
        request: &CaptureRequest,
        task: Option<&CaptureTask>,
    ) -> Result<ImageHandle, CloudError> {
        let vm = self
            .virtual_machines
            .virtual_machine(request.virtual_machine_id())
            .await?;

        if !vm.current_state().is_stoppable() {
            return Err(CloudError::precondition(format!(
                "virtual machine '{}' cannot be stopped from state {:?}",
                vm.id(),
                vm.current_state()
            )));
        }

        // The capture endpoint hangs off the VM's hosting hierarchy, which
        // the provider only exposes as tags on the VM itself.
        let address = vm.hosting_address()?;

        debug!(
            "stopping service '{}' deployment '{}' before capture",
            address.service(),
            address.deployment()
        );
        self.virtual_machines
            .terminate_service(address.service(), address.deployment())
            .await?;

        let url = format!(
            "{}/services/hostedservices/{}/deployments/{}/roleInstances/{}/Operations",
            self.context.request_prefix(),
            address.service(),
            address.deployment(),
            address.role()
        );
        let body = quick_xml::se::to_string(&CaptureRoleOperation {
            xmlns: WINDOWS_AZURE_NS,
            operation_type: "CaptureRoleOperation",
            post_capture_action: "Delete",
            target_image_label: request.description(),
            target_image_name: request.name(),
        })?;
        self.transport.execute(Method::Post, &url, Some(body)).await?;

        let image = self.await_image(request.name()).await?;

        let handle: ImageHandle = Arc::new(Mutex::new(image));
        if let Some(task) = task {
            task.complete(&handle);
        }
        Ok(handle)
    }

    /// Bounded busy/backoff wait for the new entry to show up active in the
    /// merged catalog. Runs on the calling task; nothing is spawned.
    async fn await_image(&self, name: &str) -> Result<MachineImage, CloudError> {
        let started = Instant::now();
        loop {
            if let Some(image) = self.catalog.find(name).await?
                && image.state() == ImageState::Active
            {
                debug!("capture '{}' became active after {:?}", name, started.elapsed());
                return Ok(image);
            }
            if started.elapsed() >= self.config.poll_timeout {
                return Err(CloudError::Timeout {
                    name: name.to_string(),
                    waited: started.elapsed(),
                });
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
