//! Purpose: Walk a paginated listing by following `next` links until exhausted.
//! Exports: `ListOptions`, `Page`, `Paginator`, `fetch_all`, page size constants.
//! Role: Shared by every `list_all_*` service operation.
//! Invariants: Pages are fetched strictly in sequence; page N+1 only after page N completes.
//! Invariants: Items keep server order, page by page.
//! Invariants: Any page failure discards accumulated items and returns only the error.
//! Invariants: Revisiting a page number or exceeding `max_pages` fails with `ErrorKind::Pagination`.
use super::error::{Error, ErrorKind};
use super::links::PageLinks;
use std::collections::HashSet;

type ApiResult<T> = Result<T, Error>;

pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// Listing cursor: which page to request and how many items per page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ListOptions {
    pub page: u32,
    pub page_size: u32,
}

impl ListOptions {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn first_page(page_size: u32) -> Self {
        Self::new(1, page_size)
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::first_page(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub links: PageLinks,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, links: PageLinks) -> Self {
        Self { items, links }
    }

    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, PageLinks::default())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Paginator {
    page_size: u32,
    max_pages: u32,
}

impl Paginator {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Fetch every page starting at page 1 and concatenate the items.
    pub fn fetch_all<T, F>(&self, mut fetch: F) -> ApiResult<Vec<T>>
    where
        F: FnMut(ListOptions) -> ApiResult<Page<T>>,
    {
        let mut cursor = ListOptions::first_page(self.page_size);
        let mut visited = HashSet::new();
        let mut items = Vec::new();
        let mut fetched: u32 = 0;

        loop {
            visited.insert(cursor.page);
            let page = fetch(cursor)?;
            fetched += 1;
            tracing::debug!(
                page = cursor.page,
                page_size = cursor.page_size,
                items = page.items.len(),
                has_next = page.links.has_next(),
                "fetched page"
            );
            items.extend(page.items);

            let Some(next) = page.links.next_page_number()? else {
                return Ok(items);
            };
            if visited.contains(&next) {
                return Err(Error::new(ErrorKind::Pagination)
                    .with_message(format!("next link revisits page {next}"))
                    .with_hint("the server returned a cyclic next link"));
            }
            if fetched >= self.max_pages {
                return Err(Error::new(ErrorKind::Pagination).with_message(format!(
                    "listing exceeded {} pages",
                    self.max_pages
                )));
            }
            cursor.page = next;
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

pub fn fetch_all<T, F>(page_size: u32, fetch: F) -> ApiResult<Vec<T>>
where
    F: FnMut(ListOptions) -> ApiResult<Page<T>>,
{
    Paginator::new(page_size).fetch_all(fetch)
}

#[cfg(test)]
mod tests {
    use super::{ListOptions, Page, Paginator, fetch_all};
    use crate::core::error::{Error, ErrorKind};
    use crate::core::links::PageLinks;

    fn next_link(page: u32) -> PageLinks {
        PageLinks {
            next: Some(format!(
                "https://api.hackerone.com/v1/reports?page%5Bnumber%5D={page}&page%5Bsize%5D=2"
            )),
            ..PageLinks::default()
        }
    }

    #[test]
    fn list_options_clamp_page_and_size() {
        assert_eq!(ListOptions::new(0, 0), ListOptions::new(1, 1));
        assert_eq!(ListOptions::new(3, 500).page_size, 100);
        assert_eq!(ListOptions::default(), ListOptions::new(1, 100));
    }

    #[test]
    fn fetch_all_concatenates_pages_in_order() {
        let mut calls = Vec::new();
        let items = fetch_all(2, |cursor| {
            calls.push(cursor);
            Ok(match cursor.page {
                1 => Page::new(vec![1, 2], next_link(2)),
                2 => Page::new(vec![3, 4], next_link(3)),
                3 => Page::last(vec![5]),
                other => panic!("unexpected page {other}"),
            })
        })
        .expect("items");
        assert_eq!(items, [1, 2, 3, 4, 5]);
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|cursor| cursor.page_size == 2));
        assert_eq!(
            calls.iter().map(|cursor| cursor.page).collect::<Vec<_>>(),
            [1, 2, 3]
        );
    }

    #[test]
    fn fetch_all_follows_page_number_from_link() {
        let mut pages = Vec::new();
        let items = fetch_all(10, |cursor| {
            pages.push(cursor.page);
            Ok(match cursor.page {
                1 => Page::new(vec!["a"], next_link(5)),
                5 => Page::last(vec!["b"]),
                other => panic!("unexpected page {other}"),
            })
        })
        .expect("items");
        assert_eq!(items, ["a", "b"]);
        assert_eq!(pages, [1, 5]);
    }

    #[test]
    fn fetch_error_discards_accumulated_items() {
        let mut calls = 0;
        let result: Result<Vec<u32>, Error> = fetch_all(2, |cursor| {
            calls += 1;
            match cursor.page {
                1 => Ok(Page::new(vec![1, 2], next_link(2))),
                2 => Err(Error::new(ErrorKind::Transport).with_message("connection reset")),
                _ => Ok(Page::last(vec![5])),
            }
        });
        let err = result.expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(calls, 2);
    }

    #[test]
    fn empty_first_page_without_next_yields_nothing() {
        let items: Vec<u32> = fetch_all(2, |_| Ok(Page::last(Vec::new()))).expect("items");
        assert!(items.is_empty());
    }

    #[test]
    fn cyclic_next_link_is_detected() {
        let mut calls = 0;
        let err = fetch_all(2, |cursor| {
            calls += 1;
            Ok(match cursor.page {
                1 => Page::new(vec![1], next_link(2)),
                _ => Page::new(vec![2], next_link(1)),
            })
        })
        .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Pagination);
        assert_eq!(calls, 2);
    }

    #[test]
    fn self_referencing_next_link_is_detected() {
        let err = fetch_all(2, |_| Ok(Page::new(vec![1], next_link(1)))).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Pagination);
    }

    #[test]
    fn max_pages_bounds_the_walk() {
        let mut calls = 0;
        let err = Paginator::new(1)
            .with_max_pages(3)
            .fetch_all(|cursor| {
                calls += 1;
                Ok(Page::new(vec![cursor.page], next_link(cursor.page + 1)))
            })
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Pagination);
        assert_eq!(calls, 3);
    }

    #[test]
    fn unparsable_next_link_is_pagination_error() {
        let links = PageLinks {
            next: Some("https://api.hackerone.com/v1/reports?cursor=abc".to_string()),
            ..PageLinks::default()
        };
        let err = fetch_all(2, |_| Ok(Page::new(vec![1], links.clone()))).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Pagination);
    }
}
