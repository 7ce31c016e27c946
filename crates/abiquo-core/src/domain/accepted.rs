//! Acknowledgements of asynchronous server-side work

use crate::dto::{AcceptedRequestDto, HasLinks, RestLink};

/// The server accepted a long-running request
///
/// Carries the `status` link where progress can be followed. Nothing here
/// polls it.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedRequest {
    dto: AcceptedRequestDto,
}

impl AcceptedRequest {
    pub fn status_link(&self) -> Option<&str> {
        self.dto.search_link("status").map(|link| link.href.as_str())
    }

    /// Tracking entity reported by the server, if any
    pub fn entity(&self) -> Option<&str> {
        self.dto.entity.as_deref()
    }

    pub fn links(&self) -> &[RestLink] {
        self.dto.links()
    }

    pub fn dto(&self) -> &AcceptedRequestDto {
        &self.dto
    }
}

impl From<AcceptedRequestDto> for AcceptedRequest {
    fn from(dto: AcceptedRequestDto) -> Self {
        Self { dto }
    }
}
