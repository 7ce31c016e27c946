//! Abiquo vendor media types

/// API version sent with every media type
pub const API_VERSION: &str = "2.6";

pub const ENTERPRISE: &str = "application/vnd.abiquo.enterprise+json";
pub const VIRTUAL_DATACENTER: &str = "application/vnd.abiquo.virtualdatacenter+json";
pub const VIRTUAL_DATACENTERS: &str = "application/vnd.abiquo.virtualdatacenters+json";
pub const VIRTUAL_APPLIANCE: &str = "application/vnd.abiquo.virtualappliance+json";
pub const VIRTUAL_APPLIANCES: &str = "application/vnd.abiquo.virtualappliances+json";
pub const VIRTUAL_MACHINES: &str = "application/vnd.abiquo.virtualmachines+json";
pub const VIRTUAL_MACHINES_WITH_NODE_EXTENDED: &str =
    "application/vnd.abiquo.virtualmachineswithnodeextended+json";
pub const VIRTUAL_MACHINE_TEMPLATE: &str = "application/vnd.abiquo.virtualmachinetemplate+json";
pub const VIRTUAL_MACHINE_TEMPLATES: &str = "application/vnd.abiquo.virtualmachinetemplates+json";
pub const VIRTUAL_MACHINE_TEMPLATE_REQUEST: &str =
    "application/vnd.abiquo.virtualmachinetemplaterequest+json";
pub const VIRTUAL_MACHINE_TEMPLATE_PERSISTENT: &str =
    "application/vnd.abiquo.virtualmachinetemplatepersistent+json";
pub const CONVERSION: &str = "application/vnd.abiquo.conversion+json";
pub const CONVERSIONS: &str = "application/vnd.abiquo.conversions+json";
pub const ACCEPTED_REQUEST: &str = "application/vnd.abiquo.acceptedrequest+json";

/// Append the API version parameter to a media type
pub fn versioned(media_type: &str) -> String {
    format!("{}; version={}", media_type, API_VERSION)
}
