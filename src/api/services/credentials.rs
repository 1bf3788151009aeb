use crate::api::client::{Client, Response};
use crate::api::models::{CreateCredential, Credential, CredentialInquiry, CredentialInquiryResponse};
use crate::api::options::apply_list_options;
use crate::api::transport::Method;
use crate::core::error::{Error, ErrorKind};
use crate::core::paginate::{ListOptions, Page};
use serde::Serialize;

type ApiResult<T> = Result<T, Error>;

#[derive(Clone, Copy, Debug)]
pub struct CredentialService<'a> {
    client: &'a Client,
}

impl<'a> CredentialService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn list_credential_inquiries(
        &self,
        program_id: &str,
        options: &ListOptions,
    ) -> ApiResult<(Vec<CredentialInquiry>, Response)> {
        let mut url = self
            .client
            .endpoint_segments(&["programs", program_id, "credential_inquiries"])?;
        apply_list_options(&mut url, options);
        let request = self.client.request_for_url::<()>(Method::Get, url, None)?;
        self.client.fetch_list(&request)
    }

    pub fn list_all_credential_inquiries(&self, program_id: &str) -> ApiResult<Vec<CredentialInquiry>> {
        self.client.paginator().fetch_all(|cursor| {
            let (items, response) = self.list_credential_inquiries(program_id, &cursor)?;
            Ok(Page::new(items, response.links))
        })
    }

    pub fn list_credential_inquiry_responses(
        &self,
        program_id: &str,
        inquiry_id: &str,
        options: &ListOptions,
    ) -> ApiResult<(Vec<CredentialInquiryResponse>, Response)> {
        let mut url = self.client.endpoint_segments(&[
            "programs",
            program_id,
            "credential_inquiries",
            inquiry_id,
            "credential_inquiry_responses",
        ])?;
        apply_list_options(&mut url, options);
        let request = self.client.request_for_url::<()>(Method::Get, url, None)?;
        self.client.fetch_list(&request)
    }

    pub fn list_all_credential_inquiry_responses(
        &self,
        program_id: &str,
        inquiry_id: &str,
    ) -> ApiResult<Vec<CredentialInquiryResponse>> {
        self.client.paginator().fetch_all(|cursor| {
            let (items, response) =
                self.list_credential_inquiry_responses(program_id, inquiry_id, &cursor)?;
            Ok(Page::new(items, response.links))
        })
    }

    /// Create a credential for a structured scope. `credentials` is sent as its JSON text.
    pub fn create_credential<C>(
        &self,
        structured_scope_id: &str,
        credentials: &C,
        assignee: &str,
    ) -> ApiResult<(Credential, Response)>
    where
        C: Serialize + ?Sized,
    {
        let credentials = serde_json::to_string(credentials).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("credentials are not serializable as json")
                .with_source(err)
        })?;
        let body = CreateCredential {
            structured_scope_id: structured_scope_id.to_string(),
            credentials,
            assignee: assignee.to_string(),
        };
        let request = self
            .client
            .request_at(Method::Post, &["credentials"], Some(&body))?;
        self.client.fetch(&request)
    }

    pub fn delete_credential(&self, id: &str) -> ApiResult<Response> {
        let request = self
            .client
            .request_at::<()>(Method::Delete, &["credentials", id], None)?;
        self.client.send(&request)
    }
}
