//! Filtered, sorted, paginated reads over any SeaORM entity.
//!
//! Callers never name columns directly: every filterable and sortable key is
//! declared in a [`QuerySchema`] that maps the public key to a column. Filters
//! on undeclared keys are rejected, sorts on undeclared keys fall back to the
//! schema default.

use std::collections::HashMap;
use std::str::FromStr;

use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, Iterable, Order, PaginatorTrait,
    PrimaryKeyToColumn, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::debug;

use crate::errors::ServiceError;
use crate::pagination::{PageResult, Pagination};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Like,
    In,
}

impl FromStr for FilterOp {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Ok(Self::Eq),
            "like" => Ok(Self::Like),
            "in" => Ok(Self::In),
            other => Err(ServiceError::Validation(format!("unsupported filter operator '{other}'"))),
        }
    }
}

/// `field <op> value`; a list of filters is combined with AND.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    #[serde(alias = "operator")]
    pub op: FilterOp,
    #[serde(default)]
    pub value: Json,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Json>) -> Self {
        Self { field: field.into(), op, value: value.into() }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Json>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    pub fn like(field: impl Into<String>, value: impl Into<Json>) -> Self {
        Self::new(field, FilterOp::Like, value)
    }

    pub fn any_of(field: impl Into<String>, values: Vec<Json>) -> Self {
        Self::new(field, FilterOp::In, Json::Array(values))
    }

    /// Null, blank strings and empty lists mean "no constraint".
    fn is_blank(&self) -> bool {
        match &self.value {
            Json::Null => true,
            Json::String(s) => s.trim().is_empty(),
            Json::Array(a) => a.is_empty(),
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case selects descending; everything else is ascending.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") { Self::Desc } else { Self::Asc }
    }
}

impl From<SortDirection> for Order {
    fn from(d: SortDirection) -> Self {
        match d {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self { field: field.into(), direction }
    }
}

/// Declared type of a filterable column, used to coerce JSON values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Bool,
}

/// Allow-list of filterable and sortable keys for one entity.
pub struct QuerySchema<E: EntityTrait> {
    filters: HashMap<&'static str, (E::Column, FieldKind)>,
    sorts: HashMap<&'static str, E::Column>,
    default_sort: (E::Column, SortDirection),
}

impl<E: EntityTrait> QuerySchema<E> {
    pub fn new(default_column: E::Column, default_direction: SortDirection) -> Self {
        Self {
            filters: HashMap::new(),
            sorts: HashMap::new(),
            default_sort: (default_column, default_direction),
        }
    }

    pub fn filter(mut self, key: &'static str, column: E::Column, kind: FieldKind) -> Self {
        self.filters.insert(key, (column, kind));
        self
    }

    pub fn sort(mut self, key: &'static str, column: E::Column) -> Self {
        self.sorts.insert(key, column);
        self
    }

    /// Column and direction to order by; unknown or missing keys use the default.
    pub fn resolve_sort(&self, sort: Option<&SortSpec>) -> (E::Column, SortDirection) {
        match sort {
            Some(s) => match self.sorts.get(s.field.as_str()) {
                Some(col) => (*col, s.direction),
                None => {
                    debug!(field = %s.field, "sort key not allowed; using default");
                    self.default_sort
                }
            },
            None => self.default_sort,
        }
    }

    /// AND of every non-blank filter.
    pub fn condition(&self, filters: &[Filter]) -> Result<Condition, ServiceError> {
        let mut cond = Condition::all();
        for f in filters.iter().filter(|f| !f.is_blank()) {
            let (col, kind) = self
                .filters
                .get(f.field.as_str())
                .copied()
                .ok_or_else(|| ServiceError::Validation(format!("unknown filter field '{}'", f.field)))?;
            let expr = match f.op {
                FilterOp::Eq => col.eq(coerce(kind, &f.field, &f.value)?),
                FilterOp::Like => {
                    if kind != FieldKind::Text {
                        return Err(ServiceError::Validation(format!("'like' is only valid on text fields, not '{}'", f.field)));
                    }
                    let needle = match &f.value {
                        Json::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    Expr::col((E::default(), col))
                        .like(LikeExpr::new(format!("%{}%", escape_like(&needle))).escape('\\'))
                }
                FilterOp::In => {
                    let values = split_list(&f.value)
                        .iter()
                        .map(|v| coerce(kind, &f.field, v))
                        .collect::<Result<Vec<_>, _>>()?;
                    col.is_in(values)
                }
            };
            cond = cond.add(expr);
        }
        Ok(cond)
    }
}

/// Escape `\`, `%` and `_` so the needle matches literally under `ESCAPE '\'`.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Accept a JSON array or a comma separated string for `in`.
fn split_list(v: &Json) -> Vec<Json> {
    match v {
        Json::Array(items) => items.clone(),
        Json::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| Json::String(p.to_string()))
            .collect(),
        other => vec![other.clone()],
    }
}

fn coerce(kind: FieldKind, field: &str, v: &Json) -> Result<sea_orm::Value, ServiceError> {
    let bad = || ServiceError::Validation(format!("invalid value for filter '{field}': {v}"));
    Ok(match kind {
        FieldKind::Text => match v {
            Json::String(s) => s.clone().into(),
            Json::Number(n) => n.to_string().into(),
            Json::Bool(b) => b.to_string().into(),
            _ => return Err(bad()),
        },
        FieldKind::Integer => match v {
            Json::Number(n) => n.as_i64().ok_or_else(bad)?.into(),
            Json::String(s) => s.trim().parse::<i64>().map_err(|_| bad())?.into(),
            _ => return Err(bad()),
        },
        FieldKind::Bool => match v {
            Json::Bool(b) => (*b).into(),
            Json::Number(n) if n.as_i64() == Some(0) => false.into(),
            Json::Number(n) if n.as_i64() == Some(1) => true.into(),
            Json::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true.into(),
                "false" | "0" => false.into(),
                _ => return Err(bad()),
            },
            _ => return Err(bad()),
        },
    })
}

/// Run one paginated read: the row window and the `COUNT(*)` under the same
/// WHERE clause are issued concurrently as two independent queries.
pub async fn query<E, C>(
    db: &C,
    schema: &QuerySchema<E>,
    filters: &[Filter],
    sort: Option<&SortSpec>,
    page: Pagination,
) -> Result<PageResult<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let page = page.normalize();
    let cond = schema.condition(filters)?;
    let (sort_col, direction) = schema.resolve_sort(sort);

    let base = E::find().filter(cond);
    let mut window = base.clone().order_by(sort_col, direction.into());
    // primary key as tie-breaker keeps pages stable when the sort key repeats
    for pk in E::PrimaryKey::iter() {
        window = window.order_by(pk.into_column(), Order::Asc);
    }
    let window = window.offset(page.offset()).limit(page.page_size);

    let (items, total) = tokio::try_join!(window.all(db), base.count(db))?;
    debug!(total, page = page.page, page_size = page.page_size, returned = items.len(), "paginated query");
    Ok(PageResult::new(items, total, page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::product;
    use sea_orm::{DbBackend, QueryTrait};
    use serde_json::json;

    fn schema() -> QuerySchema<product::Entity> {
        QuerySchema::new(product::Column::Id, SortDirection::Desc)
            .filter("name", product::Column::Name, FieldKind::Text)
            .filter("category_id", product::Column::CategoryId, FieldKind::Integer)
            .filter("is_active", product::Column::IsActive, FieldKind::Bool)
            .sort("price_cents", product::Column::PriceCents)
    }

    fn sql(filters: &[Filter]) -> String {
        let cond = schema().condition(filters).unwrap();
        product::Entity::find().filter(cond).build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn blank_filters_are_skipped() {
        let cond = schema()
            .condition(&[Filter::eq("name", ""), Filter::any_of("category_id", vec![]), Filter::eq("is_active", Json::Null)])
            .unwrap();
        assert!(cond.is_empty());
    }

    #[test]
    fn like_is_substring_match() {
        let s = sql(&[Filter::like("name", "shirt")]);
        assert!(s.contains(r#""product"."name" LIKE '%shirt%'"#), "{s}");
    }

    #[test]
    fn like_wildcards_in_input_are_escaped() {
        assert_eq!(escape_like("t_shirt"), r"t\_shirt");
        assert_eq!(escape_like("50%"), r"50\%");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("shirt"), "shirt");
    }

    #[test]
    fn filters_are_anded_and_coerced() {
        let s = sql(&[Filter::eq("category_id", "3"), Filter::eq("is_active", "true"), Filter::any_of("category_id", vec![json!(1), json!("2")])]);
        assert!(s.contains(r#""product"."category_id" = 3"#), "{s}");
        assert!(s.contains(r#""product"."is_active" = TRUE"#), "{s}");
        assert!(s.contains(r#""product"."category_id" IN (1, 2)"#), "{s}");
        assert_eq!(s.matches(" AND ").count(), 2, "{s}");
    }

    #[test]
    fn in_accepts_comma_separated_text() {
        let s = sql(&[Filter::new("category_id", FilterOp::In, "4, 5,,6")]);
        assert!(s.contains("IN (4, 5, 6)"), "{s}");
    }

    #[test]
    fn unknown_filter_field_is_rejected() {
        let err = schema().condition(&[Filter::eq("password_hash", "x")]).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn like_on_non_text_is_rejected() {
        let err = schema().condition(&[Filter::like("category_id", "1")]).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn bad_integer_is_rejected() {
        let err = schema().condition(&[Filter::eq("category_id", "abc")]).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn unknown_sort_falls_back_to_default() {
        let s = schema();
        let (col, dir) = s.resolve_sort(Some(&SortSpec::new("password_hash", SortDirection::Asc)));
        assert!(matches!(col, product::Column::Id));
        assert_eq!(dir, SortDirection::Desc);
        let (col, dir) = s.resolve_sort(Some(&SortSpec::new("price_cents", SortDirection::Asc)));
        assert!(matches!(col, product::Column::PriceCents));
        assert_eq!(dir, SortDirection::Asc);
    }

    #[test]
    fn operator_parsing() {
        assert_eq!("LIKE".parse::<FilterOp>().unwrap(), FilterOp::Like);
        assert!("between".parse::<FilterOp>().is_err());
        assert_eq!(SortDirection::parse_lenient("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient("sideways"), SortDirection::Asc);
    }

    #[test]
    fn filter_deserializes_with_operator_alias() {
        let f: Filter = serde_json::from_value(json!({"field": "name", "operator": "like", "value": "shirt"})).unwrap();
        assert_eq!(f, Filter::like("name", "shirt"));
    }
}
