//! 查询描述：过滤条件、排序与投影。
//!
//! 过滤词汇与远端 REST 接口一致：
//! - `eq` / `neq`：等值 / 不等
//! - `ilike`：大小写不敏感的子串匹配（`*value*`）
//! - `in`：取值属于给定集合（精确匹配）
//! - `is.null` / `not.is.null`：空值判断

use domain::{RawRecord, value_to_string};

/// 过滤操作。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOp {
    Eq(String),
    Neq(String),
    Contains(String),
    In(Vec<String>),
    IsNull,
    NotNull,
}

/// 单列过滤条件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Eq(value.into()),
        }
    }

    pub fn neq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Neq(value.into()),
        }
    }

    /// 大小写不敏感的子串匹配。
    pub fn contains(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Contains(value.into()),
        }
    }

    /// 取值属于给定集合。
    pub fn one_of<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            op: FilterOp::In(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::IsNull,
        }
    }

    pub fn not_null(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::NotNull,
        }
    }

    /// 远端查询参数值，例如 `eq.ONLINE`、`ilike.*crew*`。
    pub fn to_param(&self) -> String {
        match &self.op {
            FilterOp::Eq(value) => format!("eq.{}", quote_value(value)),
            FilterOp::Neq(value) => format!("neq.{}", quote_value(value)),
            FilterOp::Contains(value) => format!("ilike.*{}*", value.replace('*', "")),
            FilterOp::In(values) => {
                let values: Vec<String> = values.iter().map(|value| quote_value(value)).collect();
                format!("in.({})", values.join(","))
            }
            FilterOp::IsNull => "is.null".to_string(),
            FilterOp::NotNull => "not.is.null".to_string(),
        }
    }

    /// 在本地行上求值（内存存储与全量扫描使用）。
    pub fn matches(&self, row: &RawRecord) -> bool {
        let value = row.get(&self.column).and_then(value_to_string);
        match (&self.op, value) {
            (FilterOp::IsNull, value) => value.is_none(),
            (FilterOp::NotNull, value) => value.is_some(),
            (FilterOp::Eq(expected), Some(value)) => &value == expected,
            (FilterOp::Neq(expected), Some(value)) => &value != expected,
            (FilterOp::Contains(needle), Some(value)) => value
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            (FilterOp::In(values), Some(value)) => values.contains(&value),
            (_, None) => false,
        }
    }
}

// 含保留字符的值需加双引号。
fn quote_value(value: &str) -> String {
    if value.contains([',', '(', ')', '"', ':']) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// 排序（空值总是排在最后）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

impl Order {
    pub fn to_param(&self) -> String {
        let direction = if self.descending { "desc" } else { "asc" };
        format!("{}.{}.nullslast", self.column, direction)
    }
}

/// 行查询。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery {
    pub table: String,
    pub columns: Option<Vec<String>>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl RowQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            filters: Vec::new(),
            order: None,
        }
    }

    /// 列投影。
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, descending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            descending,
        });
        self
    }

    /// `select` 参数值。
    pub fn select_param(&self) -> String {
        match &self.columns {
            Some(columns) if !columns.is_empty() => columns.join(","),
            _ => "*".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> RawRecord {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn params_follow_rest_vocabulary() {
        assert_eq!(Filter::eq("online", "ONLINE").to_param(), "eq.ONLINE");
        assert_eq!(Filter::contains("user", "crew").to_param(), "ilike.*crew*");
        assert_eq!(Filter::eq("cabin", "a,b").to_param(), "eq.\"a,b\"");
        assert_eq!(Filter::not_null("cabin").to_param(), "not.is.null");
        assert_eq!(
            Filter::one_of("inside_cabin", ["true", "Yes", "a,b"]).to_param(),
            "in.(true,Yes,\"a,b\")"
        );
        let order = Order {
            column: "updated_at".to_string(),
            descending: true,
        };
        assert_eq!(order.to_param(), "updated_at.desc.nullslast");
    }

    #[test]
    fn filters_evaluate_locally() {
        let record = row(json!({ "user": "Crew Lounge", "inside_cabin": true, "mac": null }));
        assert!(Filter::contains("user", "CREW").matches(&record));
        assert!(Filter::eq("inside_cabin", "true").matches(&record));
        assert!(!Filter::neq("inside_cabin", "true").matches(&record));
        assert!(Filter::is_null("mac").matches(&record));
        assert!(Filter::is_null("absent").matches(&record));
        assert!(!Filter::eq("absent", "x").matches(&record));
        assert!(Filter::one_of("inside_cabin", ["yes", "true"]).matches(&record));
        assert!(!Filter::one_of("inside_cabin", ["TRUE"]).matches(&record));
        assert!(!Filter::one_of("mac", ["true"]).matches(&record));
    }
}
