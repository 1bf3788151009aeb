use crate::api::client::{Client, Response};
use crate::api::options::apply_list_options;
use crate::api::transport::Method;
use crate::api::models::{Program, StructuredScope};
use crate::core::error::Error;
use crate::core::paginate::{ListOptions, Page};

type ApiResult<T> = Result<T, Error>;

#[derive(Clone, Copy, Debug)]
pub struct ProgramService<'a> {
    client: &'a Client,
}

impl<'a> ProgramService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Programs the authenticated identity belongs to.
    pub fn me(&self) -> ApiResult<(Vec<Program>, Response)> {
        let request = self.client.request_at::<()>(Method::Get, &["me", "programs"], None)?;
        self.client.fetch_list(&request)
    }

    pub fn get(&self, id: &str) -> ApiResult<(Program, Response)> {
        let request = self
            .client
            .request_at::<()>(Method::Get, &["programs", id], None)?;
        self.client.fetch(&request)
    }

    pub fn list_structured_scopes(
        &self,
        program_id: &str,
        options: &ListOptions,
    ) -> ApiResult<(Vec<StructuredScope>, Response)> {
        let mut url = self
            .client
            .endpoint_segments(&["programs", program_id, "structured_scopes"])?;
        apply_list_options(&mut url, options);
        let request = self.client.request_for_url::<()>(Method::Get, url, None)?;
        self.client.fetch_list(&request)
    }

    pub fn list_all_structured_scopes(&self, program_id: &str) -> ApiResult<Vec<StructuredScope>> {
        self.client.paginator().fetch_all(|cursor| {
            let (items, response) = self.list_structured_scopes(program_id, &cursor)?;
            Ok(Page::new(items, response.links))
        })
    }
}
