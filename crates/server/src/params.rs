//! Translation of list query strings into pagination, filters and sort.
//!
//! `page`, `pageSize`, `sortBy` and `sortOrder` (or their snake_case forms)
//! are reserved. Every other key is a filter: `field=value` compares for
//! equality, `field__like=value` matches a substring and `field__in=a,b`
//! matches any listed value.

use std::collections::HashMap;

use service::{Filter, FilterOp, Pagination, ServiceError, SortDirection, SortSpec};

const PAGE: &[&str] = &["page"];
const PAGE_SIZE: &[&str] = &["pageSize", "page_size"];
const SORT_BY: &[&str] = &["sortBy", "sort_by"];
const SORT_ORDER: &[&str] = &["sortOrder", "sort_order"];

#[derive(Debug, Default)]
pub struct ListParams {
    pub page: Pagination,
    pub filters: Vec<Filter>,
    pub sort: Option<SortSpec>,
}

fn first<'a>(params: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| params.get(*k)).map(String::as_str)
}

fn is_reserved(key: &str) -> bool {
    [PAGE, PAGE_SIZE, SORT_BY, SORT_ORDER].iter().any(|group| group.contains(&key))
}

impl ListParams {
    /// Malformed paging clamps to defaults; an unknown filter operator suffix
    /// is a validation error.
    pub fn parse(params: &HashMap<String, String>) -> Result<Self, ServiceError> {
        let page = Pagination::from_raw(first(params, PAGE), first(params, PAGE_SIZE));

        let sort = first(params, SORT_BY)
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|field| {
                let dir = first(params, SORT_ORDER).map(SortDirection::parse_lenient).unwrap_or_default();
                SortSpec::new(field, dir)
            });

        let mut keys: Vec<&String> = params.keys().filter(|k| !is_reserved(k)).collect();
        keys.sort();
        let mut filters = Vec::with_capacity(keys.len());
        for key in keys {
            let (field, op) = match key.rsplit_once("__") {
                Some((field, op)) => (field, op.parse::<FilterOp>()?),
                None => (key.as_str(), FilterOp::Eq),
            };
            filters.push(Filter::new(field, op, params[key].as_str()));
        }

        Ok(Self { page, filters, sort })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn camel_and_snake_keys_are_reserved() {
        let p = ListParams::parse(&map(&[("page", "2"), ("page_size", "5"), ("sortBy", "name"), ("sort_order", "desc")])).unwrap();
        assert_eq!(p.page, Pagination::new(2, 5));
        assert!(p.filters.is_empty());
        let sort = p.sort.unwrap();
        assert_eq!(sort.field, "name");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn suffixes_select_the_operator() {
        let p = ListParams::parse(&map(&[("name__like", "shirt"), ("status__in", "paid,shipped"), ("is_active", "true")])).unwrap();
        let ops: Vec<_> = p.filters.iter().map(|f| (f.field.as_str(), f.op)).collect();
        assert_eq!(ops, vec![("is_active", FilterOp::Eq), ("name", FilterOp::Like), ("status", FilterOp::In)]);
    }

    #[test]
    fn garbage_paging_uses_defaults() {
        let p = ListParams::parse(&map(&[("page", "abc"), ("pageSize", "-4")])).unwrap();
        assert_eq!(p.page.page, 1);
        assert!(p.page.page_size >= 1);
        assert!(p.sort.is_none());
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let err = ListParams::parse(&map(&[("name__regex", "x")])).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
