use super::{Collection, RestLink};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reservation_restricted: Option<bool>,
    #[serde(default)]
    pub links: Vec<RestLink>,
}

pub type EnterprisesDto = Collection<EnterpriseDto>;
