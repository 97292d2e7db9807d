use serde::Deserialize;

/// Wire model for the current catalog listing (`<VMImages>` document).
#[derive(Debug, Deserialize)]
pub struct VmImageList {
    #[serde(rename = "VMImage", default)]
    pub images: Vec<VmImageEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct VmImageEntry {
    pub name: Option<String>,
    pub label: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "OSDiskConfiguration")]
    pub os_disk_configuration: Option<OsDiskConfiguration>,
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OsDiskConfiguration {
    #[serde(rename = "OS")]
    pub os: Option<String>,
}
