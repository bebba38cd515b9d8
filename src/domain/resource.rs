//! Resource catalog types
//!
//! A backup run walks an immutable, ordered catalog of [`ResourceSpec`]s.
//! The catalog is fixed at process start; insertion order defines export
//! order so runs are reproducible.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Graph API surface a resource is served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiVersion {
    /// Stable surface (`/v1.0`)
    #[serde(rename = "v1.0")]
    V1,
    /// Pre-release surface (`/beta`)
    #[serde(rename = "beta")]
    Beta,
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVersion::V1 => write!(f, "v1.0"),
            ApiVersion::Beta => write!(f, "beta"),
        }
    }
}

/// One entry of the backup catalog
///
/// `name` doubles as the storage category (the second segment of every
/// object key written for this resource). `path` is appended to the
/// version-qualified base URL; an absolute URL passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Category name, e.g. `Entra_Users`
    pub name: String,

    /// Path template relative to the API base, e.g. `/users?$top=100`
    pub path: String,

    /// Which API surface to query
    pub api_version: ApiVersion,
}

impl ResourceSpec {
    /// Create a new resource spec
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        api_version: ApiVersion,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            api_version,
        }
    }
}

/// The built-in catalog of tenant configuration resources
///
/// Covers the Entra identity objects and the Intune device-management
/// policy families. Used when the configuration file doesn't define its
/// own `[[backup.resources]]` entries.
pub fn default_catalog() -> Vec<ResourceSpec> {
    vec![
        ResourceSpec::new("Entra_Users", "/users?$top=100", ApiVersion::V1),
        ResourceSpec::new("Entra_Groups", "/groups?$top=100", ApiVersion::V1),
        ResourceSpec::new("Entra_Applications", "/applications?$top=100", ApiVersion::V1),
        ResourceSpec::new(
            "Entra_ConditionalAccess",
            "/identity/conditionalAccess/policies",
            ApiVersion::V1,
        ),
        ResourceSpec::new(
            "Intune_DeviceConfigs_Legacy",
            "/deviceManagement/deviceConfigurations?$top=100",
            ApiVersion::Beta,
        ),
        ResourceSpec::new(
            "Intune_SettingsCatalog",
            "/deviceManagement/configurationPolicies?$top=100",
            ApiVersion::Beta,
        ),
        ResourceSpec::new(
            "Intune_AdminTemplates",
            "/deviceManagement/groupPolicyConfigurations?$expand=definitionValues&$top=100",
            ApiVersion::Beta,
        ),
        ResourceSpec::new(
            "Intune_EndpointSecurity_Intents",
            "/deviceManagement/intents?$expand=settings&$top=100",
            ApiVersion::Beta,
        ),
        ResourceSpec::new(
            "Intune_WindowsUpdateRings",
            "/deviceManagement/deviceConfigurations?$filter=contains(bitAnd(prop_id, 1), 1)&$top=100",
            ApiVersion::Beta,
        ),
        ResourceSpec::new(
            "Intune_CompliancePolicies",
            "/deviceManagement/deviceCompliancePolicies?$top=100",
            ApiVersion::V1,
        ),
        ResourceSpec::new(
            "Intune_WindowsAutopilot",
            "/deviceManagement/windowsAutopilotDeviceIdentities?$top=100",
            ApiVersion::V1,
        ),
        ResourceSpec::new(
            "Intune_MobileApps",
            "/deviceAppManagement/mobileApps?$top=100",
            ApiVersion::V1,
        ),
        ResourceSpec::new(
            "Intune_Scripts",
            "/deviceManagement/deviceManagementScripts?$top=100",
            ApiVersion::Beta,
        ),
        ResourceSpec::new(
            "Intune_ShellScripts",
            "/deviceManagement/deviceShellScripts?$top=100",
            ApiVersion::Beta,
        ),
    ]
}
