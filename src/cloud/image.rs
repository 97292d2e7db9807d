use std::fmt;

/// Owner sentinel the provider uses for images it shares with every account.
pub const PUBLIC_OWNER: &str = "--public--";

/// Which of the two provider catalogs an image lives in.
///
/// The provider keeps the legacy OS image inventory and the newer VM image
/// inventory fully separate; an id is only unique within its own catalog, so
/// the kind travels on every [`MachineImage`] and picks the list and delete
/// endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Legacy,
    Current,
}

impl CatalogKind {
    /// URL path segment of the catalog-specific delete endpoint.
    pub fn service_segment(&self) -> &'static str {
        match self {
            CatalogKind::Legacy => "images",
            CatalogKind::Current => "vmimages",
        }
    }
}

/// Lifecycle state of a catalog entry.
///
/// `Pending` only while a capture is in flight; `Deleted` and `Error` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Pending,
    Active,
    Deleted,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    I32,
    I64,
}

/// OS family tag carried by catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Rhel,
    Centos,
    Suse,
    Ubuntu,
    Debian,
    Unknown,
}

impl Platform {
    /// Sniff the platform out of whatever free-form label the catalog offers
    /// (OS field, image label, or the image name itself).
    pub fn guess(label: &str) -> Platform {
        let label = label.to_ascii_lowercase();
        if label.contains("windows") || label.contains("mcft") {
            Platform::Windows
        } else if label.contains("rhel") || label.contains("red hat") {
            Platform::Rhel
        } else if label.contains("centos") {
            Platform::Centos
        } else if label.contains("suse") || label.contains("sles") {
            Platform::Suse
        } else if label.contains("ubuntu") {
            Platform::Ubuntu
        } else if label.contains("debian") {
            Platform::Debian
        } else {
            Platform::Unknown
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::Rhel => "rhel",
            Platform::Centos => "centos",
            Platform::Suse => "suse",
            Platform::Ubuntu => "ubuntu",
            Platform::Debian => "debian",
            Platform::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Normalised representation of a machine image, regardless of which catalog
/// it came from.
#[derive(Debug, Clone)]
pub struct MachineImage {
    owner_id: String,
    region_id: String,
    id: String,
    name: String,
    description: String,
    architecture: Architecture,
    platform: Platform,
    state: ImageState,
    catalog_kind: CatalogKind,
    software: Option<String>,
    public_share: bool,
}

impl MachineImage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner_id: String,
        region_id: String,
        id: String,
        name: String,
        description: String,
        architecture: Architecture,
        platform: Platform,
        state: ImageState,
        catalog_kind: CatalogKind,
    ) -> Self {
        Self {
            owner_id,
            region_id,
            id,
            name,
            description,
            architecture,
            platform,
            state,
            catalog_kind,
            software: None,
            public_share: false,
        }
    }

    // Borrowing getters (no clones).
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    /// Provider id, unique only within the image's own catalog.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn state(&self) -> ImageState {
        self.state
    }

    pub fn catalog_kind(&self) -> CatalogKind {
        self.catalog_kind
    }

    pub fn software(&self) -> Option<&str> {
        self.software.as_deref()
    }

    pub fn is_public(&self) -> bool {
        self.public_share || self.owner_id == PUBLIC_OWNER
    }

    /// Record the software bundled into the image. Applied after capture
    /// completes, typically from a completion hook.
    pub fn with_software(&mut self, software: impl Into<String>) -> &mut Self {
        self.software = Some(software.into());
        self
    }

    /// Flip the share flag so the image reads as publicly visible.
    pub fn share_with_public(&mut self) -> &mut Self {
        self.public_share = true;
        self
    }
}

/// Lightweight `(id, state)` projection used by status polling so callers do
/// not pay for full image bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceStatus {
    id: String,
    state: ImageState,
}

impl ResourceStatus {
    pub fn new(id: impl Into<String>, state: ImageState) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> ImageState {
        self.state
    }
}
