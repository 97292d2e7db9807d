use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::CloudError;

const SERVICE_TAG: &str = "serviceName";
const DEPLOYMENT_TAG: &str = "deploymentName";
const ROLE_TAG: &str = "roleName";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    Running,
    Paused,
    Pending,
    Stopping,
    Stopped,
    Terminated,
}

impl VmState {
    /// Whether the capture workflow can stop the machine from this state.
    pub fn is_stoppable(&self) -> bool {
        matches!(self, VmState::Running | VmState::Paused | VmState::Stopped)
    }
}

/// The slice of VM metadata the capture workflow needs: current power state
/// plus the hosting tags the capture endpoint is addressed by.
#[derive(Debug, Clone)]
pub struct VirtualMachine {
    id: String,
    current_state: VmState,
    tags: HashMap<String, String>,
}

impl VirtualMachine {
    pub fn new(id: impl Into<String>, current_state: VmState) -> Self {
        Self {
            id: id.into(),
            current_state,
            tags: HashMap::new(),
        }
    }

    pub fn add_tag(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn current_state(&self) -> VmState {
        self.current_state
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Reconstruct the service/deployment/role triple the capture endpoint is
    /// nested under. The provider exposes the triple only as tags on the VM,
    /// not as part of the VM id.
    pub fn hosting_address(&self) -> Result<HostingAddress, CloudError> {
        let lookup = |key: &str| {
            self.tag(key).map(str::to_string).ok_or_else(|| {
                CloudError::precondition(format!(
                    "virtual machine '{}' is missing the '{}' tag",
                    self.id, key
                ))
            })
        };
        Ok(HostingAddress {
            service: lookup(SERVICE_TAG)?,
            deployment: lookup(DEPLOYMENT_TAG)?,
            role: lookup(ROLE_TAG)?,
        })
    }
}

/// Three-part address of a role instance inside its hosted service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingAddress {
    service: String,
    deployment: String,
    role: String,
}

impl HostingAddress {
    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

/// Injected VM lifecycle collaborator. Start/stop/terminate live in a
/// different provider service entirely; the adapter only consumes this
/// contract.
#[async_trait]
pub trait VirtualMachineService: Send + Sync {
    async fn virtual_machine(&self, vm_id: &str) -> Result<VirtualMachine, CloudError>;

    async fn terminate_service(
        &self,
        service_name: &str,
        deployment_name: &str,
    ) -> Result<(), CloudError>;
}
