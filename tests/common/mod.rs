#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use azure_image_adapter::{
    CloudError, Method, ProviderContext, Response, Transport, TransportError, VirtualMachine,
    VirtualMachineService, VmState,
};

pub const ACCOUNT_NUMBER: &str = "TEST_ACCOUNT";
pub const REGION_ID: &str = "TEST_REGION";
pub const ENDPOINT: &str = "TEST_ENDPOINT";
pub const SERVICE_NAME: &str = "TEST_COMPUTE_SERVICE";
pub const DEPLOYMENT_NAME: &str = "TEST_DEPLOYMENT_NAME";
pub const ROLE_NAME: &str = "TEST_ROLE_NAME";
pub const TEST_VM_ID: &str = "TEST_VIRTUAL_MACHINE_ID";

pub fn request_prefix() -> String {
    format!("{ENDPOINT}/{ACCOUNT_NUMBER}")
}

pub fn context() -> ProviderContext {
    ProviderContext::new(ACCOUNT_NUMBER, REGION_ID, ENDPOINT)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A VM carrying the hosting tags the capture endpoint is addressed by.
pub fn tagged_vm(state: VmState) -> VirtualMachine {
    let mut vm = VirtualMachine::new(TEST_VM_ID, state);
    vm.add_tag("serviceName", SERVICE_NAME)
        .add_tag("deploymentName", DEPLOYMENT_NAME)
        .add_tag("roleName", ROLE_NAME);
    vm
}

// ---- canned catalog payloads ----

pub const OS_IMAGES_XML: &str = r#"
<Images xmlns="http://schemas.microsoft.com/windowsazure">
  <OSImage>
    <Category>Microsoft</Category>
    <Label>Windows Server 2012</Label>
    <Location>TEST_REGION;OTHER_REGION</Location>
    <Name>mcft_osimg_1</Name>
    <OS>Windows</OS>
  </OSImage>
  <OSImage>
    <Category>User</Category>
    <Label>RHEL 7</Label>
    <Location>TEST_REGION</Location>
    <Name>rhel_osimg_2</Name>
    <OS>Linux</OS>
  </OSImage>
</Images>"#;

pub const VM_IMAGES_XML: &str = r#"
<VMImages xmlns="http://schemas.microsoft.com/windowsazure">
  <VMImage>
    <Name>vm_img_1</Name>
    <Label>Windows build box</Label>
    <Category>User</Category>
    <OSDiskConfiguration><OS>Windows</OS></OSDiskConfiguration>
    <Location>TEST_REGION</Location>
  </VMImage>
  <VMImage>
    <Name>vm_img_2</Name>
    <Label>RHEL build box</Label>
    <Category>User</Category>
    <OSDiskConfiguration><OS>Linux</OS></OSDiskConfiguration>
    <Location>TEST_REGION</Location>
  </VMImage>
</VMImages>"#;

/// Response to a shared-pool query (`category=`): one provider-shared entry.
pub const VM_IMAGES_PUBLIC_XML: &str = r#"
<VMImages xmlns="http://schemas.microsoft.com/windowsazure">
  <VMImage>
    <Name>vm_img_shared</Name>
    <Label>Ubuntu Server 14.04</Label>
    <Category>Public</Category>
    <OSDiskConfiguration><OS>Linux</OS></OSDiskConfiguration>
    <Location>TEST_REGION</Location>
  </VMImage>
</VMImages>"#;

pub const OS_IMAGES_EMPTY_XML: &str =
    r#"<Images xmlns="http://schemas.microsoft.com/windowsazure"/>"#;

pub const VM_IMAGES_EMPTY_XML: &str =
    r#"<VMImages xmlns="http://schemas.microsoft.com/windowsazure"/>"#;

/// Legacy catalog listing containing the entry a capture is waiting for.
pub fn os_images_with(name: &str) -> String {
    format!(
        r#"
<Images xmlns="http://schemas.microsoft.com/windowsazure">
  <OSImage>
    <Category>User</Category>
    <Label>{name}</Label>
    <Location>TEST_REGION</Location>
    <Name>{name}</Name>
    <OS>Linux</OS>
  </OSImage>
</Images>"#
    )
}

// ---- injected collaborator doubles ----

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

/// Canned-response transport recording every request it sees. A request past
/// the end of the queue fails the test.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Response, u16>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(Response {
            status: 200,
            body: body.to_string(),
        }));
    }

    pub fn push_status(&self, status: u16) {
        self.responses.lock().unwrap().push_back(Err(status));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<Response, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            body,
        });
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {} {}", method.as_str(), url));
        next.map_err(|status| TransportError::Status {
            status,
            url: url.to_string(),
        })
    }
}

/// Lifecycle double returning one fixed VM and optionally failing the stop
/// call.
pub struct MockVmService {
    vm: VirtualMachine,
    terminate_failure: Option<String>,
    terminate_calls: Mutex<Vec<(String, String)>>,
}

impl MockVmService {
    pub fn new(vm: VirtualMachine) -> Arc<Self> {
        Arc::new(Self {
            vm,
            terminate_failure: None,
            terminate_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing_terminate(vm: VirtualMachine, message: &str) -> Arc<Self> {
        Arc::new(Self {
            vm,
            terminate_failure: Some(message.to_string()),
            terminate_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn terminate_calls(&self) -> Vec<(String, String)> {
        self.terminate_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VirtualMachineService for MockVmService {
    async fn virtual_machine(&self, _vm_id: &str) -> Result<VirtualMachine, CloudError> {
        Ok(self.vm.clone())
    }

    async fn terminate_service(
        &self,
        service_name: &str,
        deployment_name: &str,
    ) -> Result<(), CloudError> {
        self.terminate_calls
            .lock()
            .unwrap()
            .push((service_name.to_string(), deployment_name.to_string()));
        match &self.terminate_failure {
            Some(message) => Err(CloudError::precondition(message.clone())),
            None => Ok(()),
        }
    }
}
