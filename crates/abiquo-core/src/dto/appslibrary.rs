//! Apps library resources: virtual machine templates and their conversions

use super::{Collection, RestLink};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineTemplateDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_format_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_file_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_required: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_required: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd_required: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub links: Vec<RestLink>,
}

pub type VirtualMachineTemplatesDto = Collection<VirtualMachineTemplateDto>;

/// A V2V conversion of a template into another disk format
///
/// Conversions have no numeric id; they are identified by their target
/// disk format within a template.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
    /// `ENQUEUED`, `FINISHED` or `FAILED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_size_in_bytes: Option<i64>,
    #[serde(default)]
    pub links: Vec<RestLink>,
}

pub type ConversionsDto = Collection<ConversionDto>;

/// Request to create a template in a datacenter repository
///
/// Either downloads a template definition (link `templateDefinition`) or
/// promotes an existing template instance (link `virtualmachinetemplate`
/// plus `promotedName`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineTemplateRequestDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted_name: Option<String>,
    #[serde(default)]
    pub links: Vec<RestLink>,
}

impl VirtualMachineTemplateRequestDto {
    /// Download the template definition at `href` into the repository
    pub fn download(template_definition_href: impl Into<String>) -> Self {
        Self {
            promoted_name: None,
            links: vec![RestLink::new("templateDefinition", template_definition_href)],
        }
    }

    /// Promote the template instance at `href` to a master template
    pub fn promote(template_href: impl Into<String>, promoted_name: impl Into<String>) -> Self {
        Self {
            promoted_name: Some(promoted_name.into()),
            links: vec![RestLink::new("virtualmachinetemplate", template_href)],
        }
    }
}

/// Options to create a persistent template from another template
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineTemplatePersistentDto {
    pub persistent_template_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_volume_name: Option<String>,
    /// Links to the `virtualdatacenter`, the source `virtualmachinetemplate`
    /// and either a `tier` or a `volume`
    #[serde(default)]
    pub links: Vec<RestLink>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::HasLinks;

    #[test]
    fn test_template_request_variants() {
        let download = VirtualMachineTemplateRequestDto::download("http://abiquo/am/erepos/1/templates/3");
        assert!(download.promoted_name.is_none());
        assert!(download.search_link("templateDefinition").is_some());

        let promote = VirtualMachineTemplateRequestDto::promote("/admin/vmt/5", "golden");
        let json = serde_json::to_value(&promote).unwrap();
        assert_eq!(json["promotedName"], "golden");
        assert_eq!(json["links"][0]["rel"], "virtualmachinetemplate");
    }

    #[test]
    fn test_conversion_without_id() {
        let json = r#"{
            "sourceFormat": "VMDK_STREAM_OPTIMIZED",
            "targetFormat": "QCOW2_SPARSE",
            "state": "FINISHED"
        }"#;
        let conversion: ConversionDto = serde_json::from_str(json).unwrap();
        assert_eq!(conversion.target_format.as_deref(), Some("QCOW2_SPARSE"));
        assert_eq!(conversion.state.as_deref(), Some("FINISHED"));
    }
}
