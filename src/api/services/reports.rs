use crate::api::client::{Client, Response};
use crate::api::models::{Activity, CreateComment, Report, StateChange};
use crate::api::options::{ReportListFilter, apply_list_options};
use crate::api::transport::Method;
use crate::core::error::{Error, ErrorKind};
use crate::core::paginate::{ListOptions, Page};

type ApiResult<T> = Result<T, Error>;

#[derive(Clone, Copy, Debug)]
pub struct ReportService<'a> {
    client: &'a Client,
}

impl<'a> ReportService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn get(&self, id: &str) -> ApiResult<(Report, Response)> {
        let request = self
            .client
            .request_at::<()>(Method::Get, &["reports", id], None)?;
        self.client.fetch(&request)
    }

    /// Move a report to `state`. `original_id` names the original when marking a duplicate.
    pub fn change_state(
        &self,
        id: &str,
        message: &str,
        state: &str,
        original_id: Option<&str>,
    ) -> ApiResult<(Report, Response)> {
        let body = StateChange {
            message: message.to_string(),
            state: state.to_string(),
            original_report_id: original_id.map(str::to_string),
        };
        let request =
            self.client
                .request_at(Method::Post, &["reports", id, "state_changes"], Some(&body))?;
        self.client.fetch(&request)
    }

    pub fn create_comment(
        &self,
        id: &str,
        message: &str,
        internal: bool,
    ) -> ApiResult<(Activity, Response)> {
        let body = CreateComment {
            message: message.to_string(),
            internal,
        };
        let request =
            self.client
                .request_at(Method::Post, &["reports", id, "activities"], Some(&body))?;
        self.client.fetch(&request)
    }

    /// Location of the report under the configured base URL.
    pub fn url(&self, id: &str) -> ApiResult<String> {
        self.client
            .endpoint_segments(&["reports", id])
            .map(String::from)
    }

    pub fn list(
        &self,
        filter: &ReportListFilter,
        options: &ListOptions,
    ) -> ApiResult<(Vec<Report>, Response)> {
        if filter.program.is_empty() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("report listing needs at least one program handle"));
        }
        let mut url = self.client.endpoint_segments(&["reports"])?;
        filter.apply(&mut url);
        apply_list_options(&mut url, options);
        let request = self.client.request_for_url::<()>(Method::Get, url, None)?;
        self.client.fetch_list(&request)
    }

    pub fn list_all(&self, filter: &ReportListFilter) -> ApiResult<Vec<Report>> {
        self.client.paginator().fetch_all(|cursor| {
            let (items, response) = self.list(filter, &cursor)?;
            Ok(Page::new(items, response.links))
        })
    }
}
