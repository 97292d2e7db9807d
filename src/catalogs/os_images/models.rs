use serde::Deserialize;

/// Wire model for the legacy catalog listing (`<Images>` document); serde is
/// confined to this module.
#[derive(Debug, Deserialize)]
pub struct OsImageList {
    #[serde(rename = "OSImage", default)]
    pub images: Vec<OsImageEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OsImageEntry {
    pub name: Option<String>,
    pub label: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "OS")]
    pub os: Option<String>,
    /// Semicolon-separated list of regions the image is offered in.
    pub location: Option<String>,
    pub media_link: Option<String>,
    #[serde(rename = "LogicalSizeInGB")]
    pub logical_size_in_gb: Option<String>,
}

impl OsImageEntry {
    pub fn offered_in(&self, region_id: &str) -> bool {
        match self.location.as_deref() {
            None | Some("") => true,
            Some(locations) => locations.split(';').any(|l| l.trim() == region_id),
        }
    }
}
