//! Plugin metadata the host CLI uses to register this plugin's commands.

use serde::Serialize;

use crate::commands::CommandRegistry;
use crate::consts::{PLUGIN_NAME, version_parts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl PluginVersion {
    /// Version of this crate.
    pub fn current() -> Self {
        let (major, minor, build) = version_parts(env!("CARGO_PKG_VERSION"));
        Self {
            major,
            minor,
            build,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageDetails {
    pub usage: String,
}

/// One command as announced to the host. The host supports a single alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alias: String,
    pub help_text: String,
    pub usage_details: UsageDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginMetadata {
    pub name: String,
    pub version: PluginVersion,
    pub commands: Vec<CommandMetadata>,
}

impl PluginMetadata {
    /// Metadata for every command in `registry`.
    pub fn from_registry(registry: &CommandRegistry) -> Self {
        let commands = registry
            .commands()
            .iter()
            .map(|c| CommandMetadata {
                name: c.name().to_string(),
                alias: c
                    .aliases()
                    .first()
                    .map(|a| a.to_string())
                    .unwrap_or_default(),
                help_text: c.description().to_string(),
                usage_details: UsageDetails {
                    usage: c.usage().to_string(),
                },
            })
            .collect();

        Self {
            name: PLUGIN_NAME.to_string(),
            version: PluginVersion::current(),
            commands,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_whoami_with_alias() {
        let meta = PluginMetadata::from_registry(&CommandRegistry::new());
        assert_eq!(meta.name, "whoami-plugin");
        let whoami = meta.commands.iter().find(|c| c.name == "whoami").unwrap();
        assert_eq!(whoami.alias, "who");
        assert_eq!(whoami.usage_details.usage, "cf whoami");
    }

    #[test]
    fn version_matches_crate() {
        let v = PluginVersion::current();
        let expected = version_parts(env!("CARGO_PKG_VERSION"));
        assert_eq!((v.major, v.minor, v.build), expected);
    }

    #[test]
    fn json_uses_host_field_names() {
        let meta = PluginMetadata::from_registry(&CommandRegistry::new());
        let json: serde_json::Value = serde_json::from_str(&meta.to_json().unwrap()).unwrap();
        assert_eq!(json["Name"], "whoami-plugin");
        assert!(json["Version"]["Major"].is_u64());
        assert_eq!(json["Commands"][0]["Name"], "whoami");
        assert_eq!(json["Commands"][0]["Alias"], "who");
        assert_eq!(json["Commands"][0]["UsageDetails"]["Usage"], "cf whoami");
    }
}
