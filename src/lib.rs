//! Adapter exposing one uniform machine-image abstraction over a provider
//! whose inventory is split across two differently-shaped catalogs (a legacy
//! OS image catalog and a newer VM image catalog), and whose image creation
//! is a capture workflow nested under the VM hosting hierarchy.
//!
//! The HTTP transport and the VM lifecycle service are injected collaborators
//! ([`Transport`], [`VirtualMachineService`]); everything else composes
//! behind the [`ImageSupport`] facade.

mod capture;
mod catalogs;
mod cloud;
mod context;
mod error;
mod remove;
mod support;
mod transport;
mod vm;

pub use capture::{CaptureConfig, CaptureOrchestrator, CaptureRequest};
pub use catalogs::{ImageCatalog, OsImageCatalog, VmImageCatalog};
pub use cloud::{
    Architecture, CaptureTask, CatalogKind, ImageClass, ImageFilter, ImageHandle, ImageState,
    MachineImage, PUBLIC_OWNER, Platform, ResourceStatus,
};
pub use context::{ContextError, ProviderContext};
pub use error::CloudError;
pub use remove::ImageRemover;
pub use support::ImageSupport;
pub use transport::{HttpTransport, Method, Response, Transport, TransportError};
pub use vm::{HostingAddress, VirtualMachine, VirtualMachineService, VmState};
