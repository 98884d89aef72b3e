//! Search/filter/sort query building.
//!
//! The table reports its raw state as a [`QueryFragment`]: the search form
//! values, the pagination cursor, every sort directive and every column
//! filter selection. [`QueryBuilder`] turns that into the canonical
//! [`SearchQuery`] sent to `GET /products` and remembers the result so the
//! export can reuse the same filters.

use serde::Serialize;

use crate::config::DEFAULT_PAGE_SIZE;

/// Column filter keys understood by the backend.
pub const CATEGORY_FILTER: &str = "category";
pub const STATUS_FILTER: &str = "status";

// =============================================================================
// Sorting
// =============================================================================

/// Direction reported by a sortable column header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascend,
    Descend,
}

impl SortOrder {
    /// Suffix used in the `sorter` parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Ascend => "asc",
            SortOrder::Descend => "desc",
        }
    }

    /// Next state when a header is clicked: none, asc, desc, none.
    pub fn cycle(current: Option<SortOrder>) -> Option<SortOrder> {
        match current {
            None => Some(SortOrder::Ascend),
            Some(SortOrder::Ascend) => Some(SortOrder::Descend),
            Some(SortOrder::Descend) => None,
        }
    }

    /// Arrow shown next to the header label.
    pub fn indicator(order: Option<SortOrder>) -> &'static str {
        match order {
            Some(SortOrder::Ascend) => " ▲",
            Some(SortOrder::Descend) => " ▼",
            None => " ⇅",
        }
    }
}

/// Formats the first sort directive as `"<field>,<asc|desc>"`.
///
/// Only one sort column is supported; later directives are ignored.
pub fn sorter_param(sort: &[(String, SortOrder)]) -> Option<String> {
    sort.first()
        .map(|(field, order)| format!("{},{}", field, order.as_param()))
}

// =============================================================================
// Raw table state
// =============================================================================

/// Everything the table knows about its current view.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryFragment {
    pub keyword: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// 1-based page number
    pub current: Option<u32>,
    pub page_size: Option<u32>,
    /// Active sort directives, in the order the widget reports them
    pub sort: Vec<(String, SortOrder)>,
    /// Selected values per filterable column
    pub filters: Vec<(String, Vec<String>)>,
}

impl Default for QueryFragment {
    fn default() -> Self {
        Self {
            keyword: None,
            price_min: None,
            price_max: None,
            current: Some(1),
            page_size: Some(DEFAULT_PAGE_SIZE),
            sort: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl QueryFragment {
    /// Replaces the selection of one filter column and goes back to page 1.
    pub fn set_filter(&mut self, column: &str, values: Vec<String>) {
        self.filters.retain(|(key, _)| key != column);
        if !values.is_empty() {
            self.filters.push((column.to_string(), values));
        }
        self.current = Some(1);
    }

    /// Selected values of one filter column.
    pub fn filter(&self, column: &str) -> &[String] {
        self.filters
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Applies a header click on `field`.
    ///
    /// Clicking the active column cycles its direction; clicking another
    /// column makes it the only sorted one.
    pub fn toggle_sort(&mut self, field: &str) {
        let current = self
            .sort
            .first()
            .filter(|(active, _)| active == field)
            .map(|(_, order)| *order);
        self.sort.clear();
        if let Some(order) = SortOrder::cycle(current) {
            self.sort.push((field.to_string(), order));
        }
    }

    /// Direction of `field` if it is the active sort column.
    pub fn sort_order(&self, field: &str) -> Option<SortOrder> {
        self.sort
            .first()
            .filter(|(active, _)| active == field)
            .map(|(_, order)| *order)
    }

    /// Applies the search form and goes back to page 1.
    pub fn apply_search(&mut self, keyword: Option<String>, price_min: Option<f64>, price_max: Option<f64>) {
        self.keyword = keyword;
        self.price_min = price_min;
        self.price_max = price_max;
        self.current = Some(1);
    }

    /// Clears the search form and every column filter.
    pub fn reset_search(&mut self) {
        self.keyword = None;
        self.price_min = None;
        self.price_max = None;
        self.filters.clear();
        self.current = Some(1);
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.current = Some(page.max(1));
    }

    /// Changes the page size and goes back to page 1.
    pub fn set_page_size(&mut self, size: u32) {
        self.page_size = Some(size.max(1));
        self.current = Some(1);
    }
}

// =============================================================================
// Canonical queries
// =============================================================================

/// Canonical parameter set for `GET /products`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorter: Option<String>,
}

/// Parameter set for `GET /products/export`.
///
/// Same filters as [`SearchQuery`] but no pagination: the export always
/// covers the whole filtered set.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorter: Option<String>,
}

impl SearchQuery {
    /// Query parameters in wire order, absent fields skipped.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = filter_pairs(
            &self.keyword,
            &self.category,
            &self.status,
            self.price_min,
            self.price_max,
        );
        if let Some(current) = self.current {
            pairs.push(("current", current.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize", page_size.to_string()));
        }
        if let Some(sorter) = &self.sorter {
            pairs.push(("sorter", sorter.clone()));
        }
        pairs
    }

    /// Drops `current` and `pageSize`.
    pub fn without_pagination(&self) -> ExportQuery {
        ExportQuery {
            keyword: self.keyword.clone(),
            category: self.category.clone(),
            status: self.status.clone(),
            price_min: self.price_min,
            price_max: self.price_max,
            sorter: self.sorter.clone(),
        }
    }
}

impl ExportQuery {
    /// Query parameters in wire order, absent fields skipped.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = filter_pairs(
            &self.keyword,
            &self.category,
            &self.status,
            self.price_min,
            self.price_max,
        );
        if let Some(sorter) = &self.sorter {
            pairs.push(("sorter", sorter.clone()));
        }
        pairs
    }
}

fn filter_pairs(
    keyword: &Option<String>,
    category: &Option<String>,
    status: &Option<String>,
    price_min: Option<f64>,
    price_max: Option<f64>,
) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(keyword) = keyword {
        pairs.push(("keyword", keyword.clone()));
    }
    if let Some(category) = category {
        pairs.push(("category", category.clone()));
    }
    if let Some(status) = status {
        pairs.push(("status", status.clone()));
    }
    if let Some(min) = price_min {
        pairs.push(("priceMin", min.to_string()));
    }
    if let Some(max) = price_max {
        pairs.push(("priceMax", max.to_string()));
    }
    pairs
}

// =============================================================================
// Builder
// =============================================================================

/// Builds canonical queries and retains the last one.
///
/// Owned by the table controller, which is the only writer; the export
/// path reads the retained query through [`QueryBuilder::export_query`].
#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    last: Option<SearchQuery>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates `fragment` and remembers the result.
    pub fn build(&mut self, fragment: &QueryFragment) -> SearchQuery {
        let query = translate(fragment);
        self.last = Some(query.clone());
        query
    }

    /// The most recently built query, if any.
    pub fn last(&self) -> Option<&SearchQuery> {
        self.last.as_ref()
    }

    /// Filters of the last query, pagination stripped.
    pub fn export_query(&self) -> ExportQuery {
        self.last
            .as_ref()
            .map(SearchQuery::without_pagination)
            .unwrap_or_default()
    }
}

/// Pure translation from table state to the wire query.
pub fn translate(fragment: &QueryFragment) -> SearchQuery {
    SearchQuery {
        keyword: fragment
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string),
        category: first_selected(fragment, CATEGORY_FILTER),
        status: first_selected(fragment, STATUS_FILTER),
        price_min: fragment.price_min,
        price_max: fragment.price_max,
        current: fragment.current,
        page_size: fragment.page_size,
        sorter: sorter_param(&fragment.sort),
    }
}

/// Single-value semantics: only the first selected value is forwarded.
fn first_selected(fragment: &QueryFragment, column: &str) -> Option<String> {
    fragment.filter(column).first().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
        list.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_no_sort_means_no_sorter() {
        let query = translate(&QueryFragment::default());
        assert_eq!(query.sorter, None);
        assert!(query.query_pairs().iter().all(|(k, _)| *k != "sorter"));
    }

    #[test]
    fn test_first_sort_directive_wins() {
        let fragment = QueryFragment {
            sort: vec![
                ("price".to_string(), SortOrder::Descend),
                ("productName".to_string(), SortOrder::Ascend),
            ],
            ..QueryFragment::default()
        };
        assert_eq!(translate(&fragment).sorter.as_deref(), Some("price,desc"));
    }

    #[test]
    fn test_only_first_filter_value_forwarded() {
        let mut fragment = QueryFragment::default();
        fragment.set_filter(
            CATEGORY_FILTER,
            vec!["Electronics".to_string(), "Books".to_string(), "Toys".to_string()],
        );
        fragment.set_filter(STATUS_FILTER, vec!["INACTIVE".to_string(), "ACTIVE".to_string()]);

        let query = translate(&fragment);
        assert_eq!(query.category.as_deref(), Some("Electronics"));
        assert_eq!(query.status.as_deref(), Some("INACTIVE"));
    }

    #[test]
    fn test_widget_scenario() {
        let fragment = QueryFragment {
            keyword: Some("widget".to_string()),
            current: Some(2),
            page_size: Some(20),
            sort: vec![("price".to_string(), SortOrder::Descend)],
            filters: vec![("category".to_string(), vec!["Electronics".to_string()])],
            ..QueryFragment::default()
        };

        let query = QueryBuilder::new().build(&fragment);
        assert_eq!(
            query.query_pairs(),
            pairs(&[
                ("keyword", "widget"),
                ("category", "Electronics"),
                ("current", "2"),
                ("pageSize", "20"),
                ("sorter", "price,desc"),
            ])
        );
    }

    #[test]
    fn test_blank_keyword_is_absent() {
        let fragment = QueryFragment {
            keyword: Some("   ".to_string()),
            ..QueryFragment::default()
        };
        assert_eq!(translate(&fragment).keyword, None);
    }

    #[test]
    fn test_export_query_omits_pagination() {
        let mut builder = QueryBuilder::new();
        let fragment = QueryFragment {
            keyword: Some("widget".to_string()),
            price_min: Some(100.0),
            price_max: Some(2500.5),
            current: Some(7),
            page_size: Some(50),
            ..QueryFragment::default()
        };
        builder.build(&fragment);

        let export = builder.export_query();
        let keys: Vec<_> = export.query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["keyword", "priceMin", "priceMax"]);
        assert_eq!(export.price_min, Some(100.0));

        let json = serde_json::to_value(&export).unwrap();
        assert!(json.get("current").is_none());
        assert!(json.get("pageSize").is_none());
    }

    #[test]
    fn test_export_before_any_search_is_unfiltered() {
        let builder = QueryBuilder::new();
        assert!(builder.last().is_none());
        assert!(builder.export_query().query_pairs().is_empty());
    }

    #[test]
    fn test_builder_retains_last_query() {
        let mut builder = QueryBuilder::new();
        builder.build(&QueryFragment::default());
        let second = QueryFragment {
            keyword: Some("lamp".to_string()),
            ..QueryFragment::default()
        };
        let built = builder.build(&second);
        assert_eq!(builder.last(), Some(&built));
    }

    #[test]
    fn test_price_params_format() {
        let query = translate(&QueryFragment {
            price_min: Some(100.0),
            price_max: Some(99.5),
            ..QueryFragment::default()
        });
        let pairs = query.query_pairs();
        assert!(pairs.contains(&("priceMin", "100".to_string())));
        assert!(pairs.contains(&("priceMax", "99.5".to_string())));
    }

    #[test]
    fn test_toggle_sort_cycles_and_replaces() {
        let mut fragment = QueryFragment::default();
        fragment.toggle_sort("price");
        assert_eq!(fragment.sort_order("price"), Some(SortOrder::Ascend));
        fragment.toggle_sort("price");
        assert_eq!(fragment.sort_order("price"), Some(SortOrder::Descend));
        fragment.toggle_sort("productName");
        assert_eq!(fragment.sort_order("price"), None);
        assert_eq!(fragment.sort_order("productName"), Some(SortOrder::Ascend));
        fragment.toggle_sort("productName");
        fragment.toggle_sort("productName");
        assert!(fragment.sort.is_empty());
    }

    #[test]
    fn test_filter_and_search_reset_page() {
        let mut fragment = QueryFragment::default();
        fragment.go_to_page(4);
        fragment.set_filter(STATUS_FILTER, vec!["ACTIVE".to_string()]);
        assert_eq!(fragment.current, Some(1));

        fragment.go_to_page(3);
        fragment.apply_search(Some("desk".to_string()), None, Some(500.0));
        assert_eq!(fragment.current, Some(1));

        fragment.go_to_page(2);
        fragment.set_page_size(50);
        assert_eq!(fragment.current, Some(1));
        assert_eq!(fragment.page_size, Some(50));

        fragment.reset_search();
        assert!(fragment.filters.is_empty());
        assert_eq!(fragment.keyword, None);
    }

    #[test]
    fn test_clearing_a_filter_removes_it() {
        let mut fragment = QueryFragment::default();
        fragment.set_filter(CATEGORY_FILTER, vec!["Books".to_string()]);
        fragment.set_filter(CATEGORY_FILTER, Vec::new());
        assert!(fragment.filter(CATEGORY_FILTER).is_empty());
        assert_eq!(translate(&fragment).category, None);
    }
}
