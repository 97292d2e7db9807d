mod filter;
mod image;
mod task;

pub use filter::{ImageClass, ImageFilter};
pub use image::{
    Architecture, CatalogKind, ImageState, MachineImage, PUBLIC_OWNER, Platform, ResourceStatus,
};
pub use task::{CaptureTask, ImageHandle};
