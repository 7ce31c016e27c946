//! Cloud resources: virtual datacenters, appliances and machines

use super::{Collection, RestLink};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDatacenterDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypervisor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_count_soft_limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_count_hard_limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_soft_limit_in_mb: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_hard_limit_in_mb: Option<i32>,
    #[serde(default)]
    pub links: Vec<RestLink>,
}

pub type VirtualDatacentersDto = Collection<VirtualDatacenterDto>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualApplianceDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    /// Deployment state, e.g. `DEPLOYED` or `NOT_DEPLOYED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_disponibility: Option<i32>,
    #[serde(default)]
    pub links: Vec<RestLink>,
}

pub type VirtualAppliancesDto = Collection<VirtualApplianceDto>;

/// A virtual machine
///
/// The global listing returns the node-extended representation, which adds
/// the appliance node fields; they are absent everywhere else.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd_in_bytes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "vdrpIP", default, skip_serializing_if = "Option::is_none")]
    pub vdrp_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vdrp_port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(default)]
    pub links: Vec<RestLink>,
}

pub type VirtualMachinesDto = Collection<VirtualMachineDto>;
