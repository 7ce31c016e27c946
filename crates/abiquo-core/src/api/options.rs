//! Query options narrowing server-side listings
//!
//! Options are immutable values serialized into URL query parameters. Only
//! the fields that are set end up in the query string.
//!
//! # Example
//!
//! ```
//! use abiquo_core::api::{encode_query, VirtualDatacenterOptions};
//!
//! let options = VirtualDatacenterOptions::new().with_enterprise(42);
//! assert_eq!(encode_query(&options).unwrap(), "enterprise=42");
//! ```

use serde::Serialize;

/// Serialize options into a query string (without the leading `?`)
pub fn encode_query<T: Serialize>(options: &T) -> Result<String, serde_urlencoded::ser::Error> {
    serde_urlencoded::to_string(options)
}

/// Scoping for the virtual datacenter listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VirtualDatacenterOptions {
    /// Only datacenters of this enterprise
    #[serde(rename = "enterprise", skip_serializing_if = "Option::is_none")]
    pub enterprise_id: Option<i32>,
    /// Only datacenters in this physical datacenter
    #[serde(rename = "datacenter", skip_serializing_if = "Option::is_none")]
    pub datacenter_id: Option<i32>,
    /// Index of the first result
    #[serde(rename = "startwith", skip_serializing_if = "Option::is_none")]
    pub start_with: Option<u32>,
    /// Maximum number of results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl VirtualDatacenterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_enterprise(mut self, enterprise_id: i32) -> Self {
        self.enterprise_id = Some(enterprise_id);
        self
    }

    #[must_use]
    pub fn with_datacenter(mut self, datacenter_id: i32) -> Self {
        self.datacenter_id = Some(datacenter_id);
        self
    }

    #[must_use]
    pub fn with_start_with(mut self, start_with: u32) -> Self {
        self.start_with = Some(start_with);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Filters for the template listing of a datacenter repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VirtualMachineTemplateOptions {
    /// Only templates compatible with this hypervisor type (e.g. `KVM`)
    #[serde(rename = "hypervisorTypeName", skip_serializing_if = "Option::is_none")]
    pub hypervisor_type: Option<String>,
    #[serde(rename = "categoryName", skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Only instances of this master template
    #[serde(rename = "idTemplate", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i32>,
    #[serde(rename = "startwith", skip_serializing_if = "Option::is_none")]
    pub start_with: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl VirtualMachineTemplateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hypervisor_type(mut self, hypervisor_type: impl Into<String>) -> Self {
        self.hypervisor_type = Some(hypervisor_type.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category_name: impl Into<String>) -> Self {
        self.category_name = Some(category_name.into());
        self
    }

    #[must_use]
    pub fn with_template(mut self, template_id: i32) -> Self {
        self.template_id = Some(template_id);
        self
    }

    #[must_use]
    pub fn with_start_with(mut self, start_with: u32) -> Self {
        self.start_with = Some(start_with);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Filters for the conversions of a template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionOptions {
    /// Only conversions compatible with this hypervisor type
    #[serde(rename = "hypervisor", skip_serializing_if = "Option::is_none")]
    pub hypervisor_type: Option<String>,
    /// Only conversions in this state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl ConversionOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hypervisor_type(mut self, hypervisor_type: impl Into<String>) -> Self {
        self.hypervisor_type = Some(hypervisor_type.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_encode_to_empty_query() {
        assert_eq!(encode_query(&VirtualDatacenterOptions::new()).unwrap(), "");
        assert_eq!(encode_query(&ConversionOptions::new()).unwrap(), "");
    }

    #[test]
    fn test_virtual_datacenter_options_query() {
        let options = VirtualDatacenterOptions::new()
            .with_enterprise(42)
            .with_datacenter(3)
            .with_start_with(20)
            .with_limit(10);

        assert_eq!(
            encode_query(&options).unwrap(),
            "enterprise=42&datacenter=3&startwith=20&limit=10"
        );
    }

    #[test]
    fn test_template_options_query() {
        let options = VirtualMachineTemplateOptions::new()
            .with_hypervisor_type("KVM")
            .with_category("Linux distros");

        assert_eq!(
            encode_query(&options).unwrap(),
            "hypervisorTypeName=KVM&categoryName=Linux+distros"
        );
    }

    #[test]
    fn test_conversion_options_query() {
        let options = ConversionOptions::new()
            .with_hypervisor_type("VMX_04")
            .with_state("FINISHED");
        assert_eq!(
            encode_query(&options).unwrap(),
            "hypervisor=VMX_04&state=FINISHED"
        );
    }
}
