//! Purpose: Model the `links` object of a listing response.
//! Exports: `PageLinks`.
//! Role: Sole source of the continuation signal used by the paginator.
//! Invariants: A missing or empty `next` means the listing is exhausted.
//! Invariants: Page numbers come only from the `page[number]` query parameter of `next`.
use super::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use url::Url;

type ApiResult<T> = Result<T, Error>;

const PAGE_NUMBER_PARAM: &str = "page[number]";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PageLinks {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl PageLinks {
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref().filter(|link| !link.is_empty())
    }

    pub fn has_next(&self) -> bool {
        self.next().is_some()
    }

    /// Page number carried by the `next` link, or `None` when there is no next page.
    pub fn next_page_number(&self) -> ApiResult<Option<u32>> {
        let Some(next) = self.next() else {
            return Ok(None);
        };
        page_number_from_link(next).map(Some)
    }
}

fn page_number_from_link(link: &str) -> ApiResult<u32> {
    let url = parse_link(link)?;
    let raw = url
        .query_pairs()
        .find(|(key, _)| key == PAGE_NUMBER_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            Error::new(ErrorKind::Pagination)
                .with_message("next link has no page[number] parameter")
                .with_url(link)
        })?;
    let page = raw.parse::<u32>().map_err(|err| {
        Error::new(ErrorKind::Pagination)
            .with_message(format!("next link has invalid page number {raw:?}"))
            .with_url(link)
            .with_source(err)
    })?;
    if page == 0 {
        return Err(Error::new(ErrorKind::Pagination)
            .with_message("next link points at page 0")
            .with_url(link));
    }
    Ok(page)
}

// Relative links are resolved against a placeholder origin; only the query matters.
fn parse_link(link: &str) -> ApiResult<Url> {
    let placeholder = Url::parse("http://localhost/").map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("placeholder url failed to parse")
            .with_source(err)
    })?;
    Url::options()
        .base_url(Some(&placeholder))
        .parse(link)
        .map_err(|err| {
            Error::new(ErrorKind::Pagination)
                .with_message("next link is not a valid url")
                .with_url(link)
                .with_source(err)
        })
}

#[cfg(test)]
mod tests {
    use super::PageLinks;
    use crate::core::error::ErrorKind;

    fn with_next(next: &str) -> PageLinks {
        PageLinks {
            next: Some(next.to_string()),
            ..PageLinks::default()
        }
    }

    #[test]
    fn next_page_number_reads_bracketed_param() {
        let links = with_next(
            "https://api.hackerone.com/v1/reports?page%5Bnumber%5D=3&page%5Bsize%5D=100",
        );
        assert_eq!(links.next_page_number().expect("page"), Some(3));
    }

    #[test]
    fn next_page_number_accepts_unencoded_brackets_and_relative_links() {
        let links = with_next("/v1/programs/1/structured_scopes?page[size]=25&page[number]=12");
        assert_eq!(links.next_page_number().expect("page"), Some(12));
    }

    #[test]
    fn missing_or_empty_next_means_exhausted() {
        assert_eq!(PageLinks::default().next_page_number().expect("page"), None);
        let links = with_next("");
        assert!(!links.has_next());
        assert_eq!(links.next_page_number().expect("page"), None);
    }

    #[test]
    fn next_without_page_number_is_pagination_error() {
        let err = with_next("https://api.hackerone.com/v1/reports?page%5Bsize%5D=100")
            .next_page_number()
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Pagination);

        let err = with_next("https://api.hackerone.com/v1/reports?page%5Bnumber%5D=two")
            .next_page_number()
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Pagination);
    }

    #[test]
    fn links_deserialize_self_member() {
        let links: PageLinks = serde_json::from_str(
            r#"{"self":"https://x/reports?page%5Bnumber%5D=1","next":"https://x/reports?page%5Bnumber%5D=2"}"#,
        )
        .expect("links");
        assert_eq!(
            links.self_link.as_deref(),
            Some("https://x/reports?page%5Bnumber%5D=1")
        );
        assert_eq!(links.next_page_number().expect("page"), Some(2));
    }
}
