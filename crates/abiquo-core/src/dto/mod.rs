//! Transfer objects exchanged with the Abiquo API
//!
//! DTOs are flat serde records mirroring server-side resources. They are
//! treated as opaque by everything above the API client: the domain layer
//! only reads their identity and links.

pub mod appslibrary;
pub mod cloud;
pub mod enterprise;

pub use appslibrary::*;
pub use cloud::*;
pub use enterprise::*;

use serde::{Deserialize, Serialize};

/// A hypermedia link attached to every Abiquo resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestLink {
    pub rel: String,
    pub href: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RestLink {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            media_type: None,
            title: None,
        }
    }

    /// Numeric id in the last path segment of the href
    ///
    /// ```
    /// use abiquo_core::dto::RestLink;
    ///
    /// let link = RestLink::new("enterprise", "http://abiquo/api/admin/enterprises/42");
    /// assert_eq!(link.id(), Some(42));
    /// ```
    pub fn id(&self) -> Option<i32> {
        self.href
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }

    /// Numeric id following the given collection segment in the href
    ///
    /// For `/cloud/virtualdatacenters/3/virtualappliances/7`,
    /// `id_after("virtualdatacenters")` is `Some(3)`.
    pub fn id_after(&self, collection: &str) -> Option<i32> {
        let mut segments = self.href.split('/');
        segments.find(|segment| *segment == collection)?;
        segments.next().and_then(|segment| segment.parse().ok())
    }
}

/// Access to the links of a transfer object
pub trait HasLinks {
    fn links(&self) -> &[RestLink];

    /// First link with the given relation
    fn search_link(&self, rel: &str) -> Option<&RestLink> {
        self.links().iter().find(|link| link.rel == rel)
    }

    /// The `edit` link, present on every persisted resource
    fn edit_link(&self) -> Option<&RestLink> {
        self.search_link("edit")
    }
}

macro_rules! impl_has_links {
    ($($dto:ty),* $(,)?) => {
        $(
            impl HasLinks for $dto {
                fn links(&self) -> &[RestLink] {
                    &self.links
                }
            }
        )*
    };
}

impl_has_links!(
    EnterpriseDto,
    VirtualDatacenterDto,
    VirtualApplianceDto,
    VirtualMachineDto,
    VirtualMachineTemplateDto,
    ConversionDto,
    AcceptedRequestDto,
    VirtualMachineTemplateRequestDto,
    VirtualMachineTemplatePersistentDto,
);

/// A collection resource: `{ "collection": [...], "links": [...], "totalSize": n }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub collection: Vec<T>,
    #[serde(default)]
    pub links: Vec<RestLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u32>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            collection: Vec::new(),
            links: Vec::new(),
            total_size: None,
        }
    }
}

impl<T> Collection<T> {
    pub fn new(collection: Vec<T>) -> Self {
        let total_size = u32::try_from(collection.len()).ok();
        Self {
            collection,
            links: Vec::new(),
            total_size,
        }
    }
}

/// Response of a long-running operation accepted by the server
///
/// The `status` link points to the task tracking the operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AcceptedRequestDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default)]
    pub links: Vec<RestLink>,
}

/// A single server-side error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub code: String,
    pub message: String,
}

/// Error body returned by the API on non-2xx responses
pub type ErrorsDto = Collection<ErrorDto>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_id_from_href() {
        let link = RestLink::new("edit", "http://localhost/api/cloud/virtualdatacenters/12");
        assert_eq!(link.id(), Some(12));

        let trailing = RestLink::new("edit", "/cloud/virtualdatacenters/12/");
        assert_eq!(trailing.id(), Some(12));

        let no_id = RestLink::new("conversions", "/admin/enterprises/1/conversions");
        assert_eq!(no_id.id(), None);
    }

    #[test]
    fn test_link_id_after_segment() {
        let link = RestLink::new(
            "virtualappliance",
            "http://localhost/api/cloud/virtualdatacenters/3/virtualappliances/7",
        );
        assert_eq!(link.id_after("virtualdatacenters"), Some(3));
        assert_eq!(link.id_after("virtualappliances"), Some(7));
        assert_eq!(link.id_after("enterprises"), None);
    }

    #[test]
    fn test_collection_deserializes_with_missing_fields() {
        let json = r#"{"collection": [{"code": "VDC-4", "message": "Not found"}]}"#;
        let errors: ErrorsDto = serde_json::from_str(json).unwrap();

        assert_eq!(errors.collection.len(), 1);
        assert_eq!(errors.collection[0].code, "VDC-4");
        assert!(errors.links.is_empty());
        assert!(errors.total_size.is_none());

        let empty: ErrorsDto = serde_json::from_str("{}").unwrap();
        assert!(empty.collection.is_empty());
    }

    #[test]
    fn test_link_media_type_rename() {
        let json = r#"{"rel": "edit", "href": "/x/1", "type": "application/vnd.abiquo.x+json"}"#;
        let link: RestLink = serde_json::from_str(json).unwrap();
        assert_eq!(
            link.media_type.as_deref(),
            Some("application/vnd.abiquo.x+json")
        );

        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["type"], "application/vnd.abiquo.x+json");
        assert!(value.get("title").is_none());
    }
}
