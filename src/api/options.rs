//! Purpose: Encode listing cursors and report filters as query parameters.
//! Exports: `ReportListFilter`, `apply_list_options`.
//! Role: Keeps the bracketed wire names (`page[number]`, `filter[state][]`) in one place.
//! Invariants: Unset filters are omitted entirely; boolean filters appear only when true.
//! Invariants: Timestamps are rendered as RFC 3339.
use crate::core::paginate::ListOptions;
use crate::core::timestamp::Timestamp;
use url::Url;

pub fn apply_list_options(url: &mut Url, options: &ListOptions) {
    url.query_pairs_mut()
        .append_pair("page[number]", &options.page.to_string())
        .append_pair("page[size]", &options.page_size.to_string());
}

/// Optional parameters for report listings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportListFilter {
    /// Program handles; the platform requires at least one.
    pub program: Vec<String>,
    pub state: Vec<String>,
    pub id: Vec<u64>,
    pub created_at_greater_than: Option<Timestamp>,
    pub created_at_less_than: Option<Timestamp>,
    pub triaged_at_greater_than: Option<Timestamp>,
    pub triaged_at_less_than: Option<Timestamp>,
    pub triaged_at_null: bool,
    pub closed_at_greater_than: Option<Timestamp>,
    pub closed_at_less_than: Option<Timestamp>,
    pub closed_at_null: bool,
    pub disclosed_at_greater_than: Option<Timestamp>,
    pub disclosed_at_less_than: Option<Timestamp>,
    pub disclosed_at_null: bool,
    pub bounty_awarded_at_greater_than: Option<Timestamp>,
    pub bounty_awarded_at_less_than: Option<Timestamp>,
    pub bounty_awarded_at_null: bool,
    pub swag_at_greater_than: Option<Timestamp>,
    pub swag_at_less_than: Option<Timestamp>,
    pub swag_at_null: bool,
    pub last_reporter_activity_at_greater_than: Option<Timestamp>,
    pub last_reporter_activity_at_less_than: Option<Timestamp>,
    pub last_reporter_activity_at_null: bool,
    pub first_program_activity_at_greater_than: Option<Timestamp>,
    pub first_program_activity_at_less_than: Option<Timestamp>,
    pub first_program_activity_at_null: bool,
    pub last_program_activity_at_greater_than: Option<Timestamp>,
    pub last_program_activity_at_less_than: Option<Timestamp>,
    pub last_activity_at_greater_than: Option<Timestamp>,
    pub last_activity_at_less_than: Option<Timestamp>,
}

impl ReportListFilter {
    pub fn for_programs<I, S>(handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: handles.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        for handle in &self.program {
            pairs.append_pair("filter[program][]", handle);
        }
        for state in &self.state {
            pairs.append_pair("filter[state][]", state);
        }
        for id in &self.id {
            pairs.append_pair("filter[id][]", &id.to_string());
        }

        let ranges = [
            ("created_at__gt", self.created_at_greater_than),
            ("created_at__lt", self.created_at_less_than),
            ("triaged_at__gt", self.triaged_at_greater_than),
            ("triaged_at__lt", self.triaged_at_less_than),
            ("closed_at__gt", self.closed_at_greater_than),
            ("closed_at__lt", self.closed_at_less_than),
            ("disclosed_at__gt", self.disclosed_at_greater_than),
            ("disclosed_at__lt", self.disclosed_at_less_than),
            ("bounty_awarded_at__gt", self.bounty_awarded_at_greater_than),
            ("bounty_awarded_at__lt", self.bounty_awarded_at_less_than),
            ("swag_at__gt", self.swag_at_greater_than),
            ("swag_at__lt", self.swag_at_less_than),
            (
                "last_reporter_activity_at__gt",
                self.last_reporter_activity_at_greater_than,
            ),
            (
                "last_reporter_activity_at__lt",
                self.last_reporter_activity_at_less_than,
            ),
            (
                "first_program_activity_at__gt",
                self.first_program_activity_at_greater_than,
            ),
            (
                "first_program_activity_at__lt",
                self.first_program_activity_at_less_than,
            ),
            (
                "last_program_activity_at__gt",
                self.last_program_activity_at_greater_than,
            ),
            (
                "last_program_activity_at__lt",
                self.last_program_activity_at_less_than,
            ),
            ("last_activity_at__gt", self.last_activity_at_greater_than),
            ("last_activity_at__lt", self.last_activity_at_less_than),
        ];
        for (name, value) in ranges {
            if let Some(text) = value.and_then(|ts| ts.to_rfc3339()) {
                pairs.append_pair(&format!("filter[{name}]"), &text);
            }
        }

        let nulls = [
            ("triaged_at__null", self.triaged_at_null),
            ("closed_at__null", self.closed_at_null),
            ("disclosed_at__null", self.disclosed_at_null),
            ("bounty_awarded_at__null", self.bounty_awarded_at_null),
            ("swag_at__null", self.swag_at_null),
            (
                "last_reporter_activity_at__null",
                self.last_reporter_activity_at_null,
            ),
            (
                "first_program_activity_at__null",
                self.first_program_activity_at_null,
            ),
        ];
        for (name, set) in nulls {
            if set {
                pairs.append_pair(&format!("filter[{name}]"), "true");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportListFilter, apply_list_options};
    use crate::core::paginate::ListOptions;
    use crate::core::timestamp::Timestamp;
    use time::macros::datetime;
    use url::Url;

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    #[test]
    fn list_options_use_bracketed_page_params() {
        let mut url = Url::parse("https://api.hackerone.com/v1/me/programs").expect("url");
        apply_list_options(&mut url, &ListOptions::new(3, 25));
        assert_eq!(
            pairs(&url),
            [
                ("page[number]".to_string(), "3".to_string()),
                ("page[size]".to_string(), "25".to_string()),
            ]
        );
        assert!(url.as_str().contains("page%5Bnumber%5D=3"));
    }

    #[test]
    fn empty_filter_only_lists_programs() {
        let mut url = Url::parse("https://api.hackerone.com/v1/reports").expect("url");
        ReportListFilter::for_programs(["security"]).apply(&mut url);
        assert_eq!(
            pairs(&url),
            [("filter[program][]".to_string(), "security".to_string())]
        );
    }

    #[test]
    fn filter_encodes_lists_ranges_and_null_flags() {
        let mut filter =
            ReportListFilter::for_programs(["a", "b"]).with_states(["new", "triaged"]);
        filter.id = vec![7];
        filter.created_at_greater_than = Some(Timestamp::new(datetime!(2017-01-01 00:00:00 UTC)));
        filter.closed_at_null = true;

        let mut url = Url::parse("https://api.hackerone.com/v1/reports").expect("url");
        filter.apply(&mut url);
        assert_eq!(
            pairs(&url),
            [
                ("filter[program][]".to_string(), "a".to_string()),
                ("filter[program][]".to_string(), "b".to_string()),
                ("filter[state][]".to_string(), "new".to_string()),
                ("filter[state][]".to_string(), "triaged".to_string()),
                ("filter[id][]".to_string(), "7".to_string()),
                (
                    "filter[created_at__gt]".to_string(),
                    "2017-01-01T00:00:00Z".to_string()
                ),
                ("filter[closed_at__null]".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn swag_filters_use_swag_at_keys() {
        let mut filter = ReportListFilter::for_programs(["security"]);
        filter.swag_at_greater_than = Some(Timestamp::new(datetime!(2018-06-01 12:00:00 UTC)));
        filter.swag_at_null = true;

        let mut url = Url::parse("https://api.hackerone.com/v1/reports").expect("url");
        filter.apply(&mut url);
        assert_eq!(
            pairs(&url),
            [
                ("filter[program][]".to_string(), "security".to_string()),
                (
                    "filter[swag_at__gt]".to_string(),
                    "2018-06-01T12:00:00Z".to_string()
                ),
                ("filter[swag_at__null]".to_string(), "true".to_string()),
            ]
        );
    }
}
