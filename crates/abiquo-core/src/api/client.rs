//! reqwest-backed implementation of [`AbiquoApi`]

use super::error::{ApiError, ApiResult};
use super::media_types::{self, versioned};
use super::options::{
    ConversionOptions, VirtualDatacenterOptions, VirtualMachineTemplateOptions, encode_query,
};
use super::AbiquoApi;
use crate::dto::{
    AcceptedRequestDto, ConversionDto, ConversionsDto, EnterpriseDto, ErrorsDto, HasLinks,
    VirtualApplianceDto, VirtualAppliancesDto, VirtualDatacenterDto, VirtualDatacentersDto,
    VirtualMachineTemplateDto, VirtualMachineTemplatePersistentDto,
    VirtualMachineTemplateRequestDto, VirtualMachineTemplatesDto, VirtualMachinesDto,
};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// User agent string for HTTP requests
const USER_AGENT: &str = concat!("abiquo-core/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the Abiquo API
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AbiquoClient {
    http: reqwest::Client,
    /// API root without trailing slash, e.g. `https://abiquo.example.com/api`
    endpoint: String,
    username: String,
    password: String,
}

/// Builder for [`AbiquoClient`]
#[derive(Debug, Clone)]
pub struct AbiquoClientBuilder {
    endpoint: String,
    username: String,
    password: String,
    insecure: bool,
    timeout: Duration,
}

impl AbiquoClientBuilder {
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Accept self-signed certificates
    #[must_use]
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> ApiResult<AbiquoClient> {
        // Validate early so malformed endpoints fail at construction
        Url::parse(&self.endpoint)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout);
        if self.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(AbiquoClient {
            http: builder.build()?,
            endpoint: self.endpoint.trim_end_matches('/').to_string(),
            username: self.username,
            password: self.password,
        })
    }
}

impl AbiquoClient {
    /// Start building a client for the API rooted at `endpoint`
    pub fn builder(endpoint: impl Into<String>) -> AbiquoClientBuilder {
        AbiquoClientBuilder {
            endpoint: endpoint.into(),
            username: String::new(),
            password: String::new(),
            insecure: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolve a path relative to the endpoint, or pass absolute hrefs through
    fn url(&self, path_or_href: &str) -> ApiResult<Url> {
        if path_or_href.starts_with("http://") || path_or_href.starts_with("https://") {
            Ok(Url::parse(path_or_href)?)
        } else {
            Ok(Url::parse(&format!("{}{}", self.endpoint, path_or_href))?)
        }
    }

    fn url_with_query<T: Serialize>(&self, path: &str, options: &T) -> ApiResult<Url> {
        let mut url = self.url(path)?;
        let query = encode_query(options)?;
        if !query.is_empty() {
            url.set_query(Some(&query));
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, accept: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, versioned(accept))
    }

    fn with_body<B: Serialize>(
        request: RequestBuilder,
        content_type: &str,
        body: &B,
    ) -> ApiResult<RequestBuilder> {
        let payload = serde_json::to_vec(body)?;
        trace!("Request body: {} bytes", payload.len());
        Ok(request
            .header(CONTENT_TYPE, versioned(content_type))
            .body(payload))
    }

    async fn get<T: DeserializeOwned>(&self, url: Url, accept: &str) -> ApiResult<T> {
        let response = self.request(Method::GET, url, accept).send().await?;
        Self::decode(response).await
    }

    /// GET that maps 404 to `None`
    async fn find<T: DeserializeOwned>(&self, url: Url, accept: &str) -> ApiResult<Option<T>> {
        match self.get(url, accept).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => {
                debug!("Resource not found, returning None");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        trace!("Response body: {} bytes", body.len());
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_status(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::http(status.as_u16(), error_message(status, &body)))
    }

    fn edit_href(template: &VirtualMachineTemplateDto) -> ApiResult<&str> {
        template
            .edit_link()
            .map(|link| link.href.as_str())
            .ok_or_else(|| ApiError::MissingLink {
                rel: "edit".to_string(),
            })
    }

    /// The `conversions` link, falling back to `{edit}/conversions`
    fn conversions_href(template: &VirtualMachineTemplateDto) -> ApiResult<String> {
        if let Some(link) = template.search_link("conversions") {
            return Ok(link.href.clone());
        }
        Ok(format!("{}/conversions", Self::edit_href(template)?))
    }

    fn templates_path(enterprise_id: i32, datacenter_repository_id: i32) -> String {
        format!(
            "/admin/enterprises/{}/datacenterrepositories/{}/virtualmachinetemplates",
            enterprise_id, datacenter_repository_id
        )
    }
}

/// Build a readable message from an Abiquo error body
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(errors) = serde_json::from_str::<ErrorsDto>(body)
        && !errors.collection.is_empty()
    {
        return errors
            .collection
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("; ");
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.trim().to_string()
    }
}

#[async_trait]
impl AbiquoApi for AbiquoClient {
    async fn list_virtual_datacenters(
        &self,
        options: &VirtualDatacenterOptions,
    ) -> ApiResult<VirtualDatacentersDto> {
        let url = self.url_with_query("/cloud/virtualdatacenters", options)?;
        self.get(url, media_types::VIRTUAL_DATACENTERS).await
    }

    async fn get_virtual_datacenter(&self, id: i32) -> ApiResult<Option<VirtualDatacenterDto>> {
        let url = self.url(&format!("/cloud/virtualdatacenters/{}", id))?;
        self.find(url, media_types::VIRTUAL_DATACENTER).await
    }

    async fn list_virtual_appliances(
        &self,
        virtual_datacenter_id: i32,
    ) -> ApiResult<VirtualAppliancesDto> {
        let url = self.url(&format!(
            "/cloud/virtualdatacenters/{}/virtualappliances",
            virtual_datacenter_id
        ))?;
        self.get(url, media_types::VIRTUAL_APPLIANCES).await
    }

    async fn get_virtual_appliance(
        &self,
        virtual_datacenter_id: i32,
        id: i32,
    ) -> ApiResult<Option<VirtualApplianceDto>> {
        let url = self.url(&format!(
            "/cloud/virtualdatacenters/{}/virtualappliances/{}",
            virtual_datacenter_id, id
        ))?;
        self.find(url, media_types::VIRTUAL_APPLIANCE).await
    }

    async fn list_all_virtual_machines(&self) -> ApiResult<VirtualMachinesDto> {
        let url = self.url("/cloud/virtualmachines")?;
        self.get(url, media_types::VIRTUAL_MACHINES_WITH_NODE_EXTENDED)
            .await
    }

    async fn list_virtual_machines(
        &self,
        virtual_datacenter_id: i32,
        virtual_appliance_id: i32,
    ) -> ApiResult<VirtualMachinesDto> {
        let url = self.url(&format!(
            "/cloud/virtualdatacenters/{}/virtualappliances/{}/virtualmachines",
            virtual_datacenter_id, virtual_appliance_id
        ))?;
        self.get(url, media_types::VIRTUAL_MACHINES).await
    }

    async fn get_enterprise(&self, id: i32) -> ApiResult<Option<EnterpriseDto>> {
        let url = self.url(&format!("/admin/enterprises/{}", id))?;
        self.find(url, media_types::ENTERPRISE).await
    }

    async fn list_virtual_machine_templates(
        &self,
        enterprise_id: i32,
        datacenter_repository_id: i32,
        options: &VirtualMachineTemplateOptions,
    ) -> ApiResult<VirtualMachineTemplatesDto> {
        let url = self.url_with_query(
            &Self::templates_path(enterprise_id, datacenter_repository_id),
            options,
        )?;
        self.get(url, media_types::VIRTUAL_MACHINE_TEMPLATES).await
    }

    async fn get_virtual_machine_template(
        &self,
        enterprise_id: i32,
        datacenter_repository_id: i32,
        id: i32,
    ) -> ApiResult<Option<VirtualMachineTemplateDto>> {
        let url = self.url(&format!(
            "{}/{}",
            Self::templates_path(enterprise_id, datacenter_repository_id),
            id
        ))?;
        self.find(url, media_types::VIRTUAL_MACHINE_TEMPLATE).await
    }

    async fn update_virtual_machine_template(
        &self,
        template: &VirtualMachineTemplateDto,
    ) -> ApiResult<VirtualMachineTemplateDto> {
        let url = self.url(Self::edit_href(template)?)?;
        let request = self.request(Method::PUT, url, media_types::VIRTUAL_MACHINE_TEMPLATE);
        let request =
            Self::with_body(request, media_types::VIRTUAL_MACHINE_TEMPLATE, template)?;
        Self::decode(request.send().await?).await
    }

    async fn delete_virtual_machine_template(
        &self,
        template: &VirtualMachineTemplateDto,
    ) -> ApiResult<()> {
        let url = self.url(Self::edit_href(template)?)?;
        let response = self
            .request(Method::DELETE, url, media_types::VIRTUAL_MACHINE_TEMPLATE)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn create_virtual_machine_template(
        &self,
        enterprise_id: i32,
        datacenter_repository_id: i32,
        request: &VirtualMachineTemplateRequestDto,
    ) -> ApiResult<AcceptedRequestDto> {
        let url = self.url(&Self::templates_path(enterprise_id, datacenter_repository_id))?;
        let builder = self.request(Method::POST, url, media_types::ACCEPTED_REQUEST);
        let builder = Self::with_body(
            builder,
            media_types::VIRTUAL_MACHINE_TEMPLATE_REQUEST,
            request,
        )?;
        Self::decode(builder.send().await?).await
    }

    async fn create_persistent_virtual_machine_template(
        &self,
        enterprise_id: i32,
        datacenter_repository_id: i32,
        persistent: &VirtualMachineTemplatePersistentDto,
    ) -> ApiResult<AcceptedRequestDto> {
        let url = self.url(&Self::templates_path(enterprise_id, datacenter_repository_id))?;
        let builder = self.request(Method::POST, url, media_types::ACCEPTED_REQUEST);
        let builder = Self::with_body(
            builder,
            media_types::VIRTUAL_MACHINE_TEMPLATE_PERSISTENT,
            persistent,
        )?;
        Self::decode(builder.send().await?).await
    }

    async fn list_conversions(
        &self,
        template: &VirtualMachineTemplateDto,
        options: &ConversionOptions,
    ) -> ApiResult<ConversionsDto> {
        let url = self.url_with_query(&Self::conversions_href(template)?, options)?;
        self.get(url, media_types::CONVERSIONS).await
    }

    async fn get_conversion(
        &self,
        template: &VirtualMachineTemplateDto,
        target_format: &str,
    ) -> ApiResult<Option<ConversionDto>> {
        let url = self.url(&format!(
            "{}/{}",
            Self::conversions_href(template)?,
            target_format
        ))?;
        self.find(url, media_types::CONVERSION).await
    }

    async fn request_conversion(
        &self,
        template: &VirtualMachineTemplateDto,
        target_format: &str,
        conversion: &ConversionDto,
    ) -> ApiResult<AcceptedRequestDto> {
        let url = self.url(&format!(
            "{}/{}",
            Self::conversions_href(template)?,
            target_format
        ))?;
        let builder = self.request(Method::PUT, url, media_types::ACCEPTED_REQUEST);
        let builder = Self::with_body(builder, media_types::CONVERSION, conversion)?;
        Self::decode(builder.send().await?).await
    }
}
