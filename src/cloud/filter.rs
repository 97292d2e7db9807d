use super::image::{MachineImage, Platform};

/// Image class requested by a listing call. The adapter only deals in
/// machine images; the variant exists so the signature matches the
/// provider-neutral contract callers program against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageClass {
    #[default]
    Machine,
}

/// Filter applied uniformly across both catalogs after the merge.
///
/// Only one catalog supports any server-side narrowing, so the predicate here
/// is the single source of truth for what a filtered listing returns.
#[derive(Debug, Clone, Default)]
pub struct ImageFilter {
    class: ImageClass,
    platform: Option<Platform>,
    owner: Option<String>,
}

impl ImageFilter {
    pub fn new(class: ImageClass) -> Self {
        Self {
            class,
            platform: None,
            owner: None,
        }
    }

    /// Shorthand for the only class currently supported.
    pub fn machine() -> Self {
        Self::new(ImageClass::Machine)
    }

    pub fn on_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Constrain by owner account, including the `PUBLIC_OWNER` sentinel.
    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn class(&self) -> ImageClass {
        self.class
    }

    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn matches(&self, image: &MachineImage) -> bool {
        if let Some(platform) = self.platform
            && image.platform() != platform
        {
            return false;
        }
        if let Some(owner) = self.owner.as_deref()
            && image.owner_id() != owner
        {
            return false;
        }
        true
    }
}
