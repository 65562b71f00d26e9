//! Reporting gateway
//!
//! Every report is a [`ReportDef`]: source table, joins, output columns,
//! grouping, filters and sort order. One builder turns a definition plus its
//! request parameters into a `SELECT`, and every parameter travels as a bound
//! value, never as SQL text.

pub mod catalog;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::sea_query::{
    Alias, BinOper, Expr, Func, JoinType, Order, Query, SelectStatement, SimpleExpr,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryResult, Value};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::{AppError, AppResult};

pub use catalog::CATALOG;

/// A qualified column
#[derive(Clone, Copy, Debug)]
pub struct Col {
    pub table: &'static str,
    pub column: &'static str,
}

impl Col {
    fn expr(self) -> SimpleExpr {
        Expr::col((Alias::new(self.table), Alias::new(self.column))).into()
    }
}

/// A computed value: a raw column, an aggregate, or a difference of two
#[derive(Clone, Copy, Debug)]
pub enum Measure {
    Field(Col),
    Count(Col),
    /// Sum that reads 0 when the group has no rows
    Sum(Col),
    Avg(Col),
    Min(Col),
    Max(Col),
    Minus(&'static Measure, &'static Measure),
}

impl Measure {
    fn expr(&self) -> SimpleExpr {
        match *self {
            Measure::Field(col) => col.expr(),
            Measure::Count(col) => Func::count(col.expr()).into(),
            Measure::Sum(col) => {
                Func::coalesce([SimpleExpr::from(Func::sum(col.expr())), Expr::val(0).into()]).into()
            }
            Measure::Avg(col) => Func::avg(col.expr()).into(),
            Measure::Min(col) => Func::min(col.expr()).into(),
            Measure::Max(col) => Func::max(col.expr()).into(),
            Measure::Minus(left, right) => {
                SimpleExpr::Binary(Box::new(left.expr()), BinOper::Sub, Box::new(right.expr()))
            }
        }
    }

    /// Aggregates filter in HAVING, plain fields in WHERE
    fn is_aggregate(&self) -> bool {
        match self {
            Measure::Field(_) => false,
            Measure::Minus(left, right) => left.is_aggregate() || right.is_aggregate(),
            _ => true,
        }
    }
}

/// How an output column is read back from a row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Int,
    Text,
    Date,
    Decimal,
}

#[derive(Clone, Copy, Debug)]
pub struct Output {
    pub alias: &'static str,
    pub kind: Kind,
    pub measure: Measure,
}

#[derive(Clone, Copy, Debug)]
pub enum JoinKind {
    Inner,
    Left,
}

#[derive(Clone, Copy, Debug)]
pub struct Join {
    pub kind: JoinKind,
    pub table: &'static str,
    pub left: Col,
    pub right: Col,
}

/// Request parameter types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    Text,
    Date,
    Decimal,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Int => "an integer",
            ParamKind::Text => "non-empty text",
            ParamKind::Date => "a date (YYYY-MM-DD)",
            ParamKind::Decimal => "a decimal number",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Compare {
    Eq,
    AtLeast,
    AtMost,
}

/// A parameter-driven predicate
#[derive(Clone, Copy, Debug)]
pub struct Filter {
    pub param: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub target: Measure,
    pub compare: Compare,
}

#[derive(Clone, Copy, Debug)]
pub struct Sort {
    pub alias: &'static str,
    pub descending: bool,
}

/// Row cap read from a request parameter
#[derive(Clone, Copy, Debug)]
pub struct Limit {
    pub param: &'static str,
    pub default: u64,
    pub max: u64,
}

/// One named report
#[derive(Clone, Copy, Debug)]
pub struct ReportDef {
    pub number: u16,
    pub title: &'static str,
    pub from: &'static str,
    pub joins: &'static [Join],
    pub outputs: &'static [Output],
    pub filters: &'static [Filter],
    pub group_by: &'static [Col],
    pub sort: &'static [Sort],
    pub limit: Option<Limit>,
}

/// Catalog entry describing one accepted parameter
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParamInfo {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub required: bool,
}

/// Parameters parsed against a definition
#[derive(Debug, Default)]
pub struct Args {
    values: HashMap<&'static str, Value>,
    limit: Option<u64>,
}

impl ReportDef {
    pub fn name(&self) -> String {
        format!("Query{}", self.number)
    }

    pub fn path(&self) -> String {
        format!("/{}/", self.name())
    }

    pub fn parameters(&self) -> Vec<ParamInfo> {
        let mut params: Vec<ParamInfo> = Vec::new();
        for filter in self.filters {
            if params.iter().all(|p| p.name != filter.param) {
                params.push(ParamInfo {
                    name: filter.param,
                    kind: filter.kind,
                    required: filter.required,
                });
            }
        }
        if let Some(limit) = self.limit {
            params.push(ParamInfo {
                name: limit.param,
                kind: ParamKind::Int,
                required: false,
            });
        }
        params
    }

    /// Parse raw query-string values into typed, bindable arguments.
    ///
    /// Keys the definition does not name are ignored.
    pub fn bind(&self, raw: &HashMap<String, String>) -> AppResult<Args> {
        let mut args = Args::default();

        for filter in self.filters {
            if args.values.contains_key(filter.param) {
                continue;
            }
            match raw.get(filter.param) {
                Some(text) => {
                    let value = parse_param(filter.param, filter.kind, text)?;
                    args.values.insert(filter.param, value);
                }
                None if filter.required => {
                    return Err(AppError::Validation(format!(
                        "missing required parameter: {}",
                        filter.param
                    )));
                }
                None => {}
            }
        }

        if let Some(limit) = self.limit {
            let n = match raw.get(limit.param) {
                Some(text) => text.trim().parse::<u64>().ok().filter(|n| *n > 0).ok_or_else(|| {
                    AppError::Validation(format!("{}: expected a positive integer", limit.param))
                })?,
                None => limit.default,
            };
            args.limit = Some(n.min(limit.max));
        }

        Ok(args)
    }

    /// Build the SELECT for this definition
    pub fn build(&self, args: &Args) -> SelectStatement {
        let mut select = Query::select();
        select.from(Alias::new(self.from));

        for join in self.joins {
            let kind = match join.kind {
                JoinKind::Inner => JoinType::InnerJoin,
                JoinKind::Left => JoinType::LeftJoin,
            };
            select.join(
                kind,
                Alias::new(join.table),
                Expr::expr(join.left.expr()).equals((Alias::new(join.right.table), Alias::new(join.right.column))),
            );
        }

        for output in self.outputs {
            select.expr_as(output.measure.expr(), Alias::new(output.alias));
        }

        for filter in self.filters {
            let Some(value) = args.values.get(filter.param) else {
                continue;
            };
            let target = Expr::expr(filter.target.expr());
            let condition = match filter.compare {
                Compare::Eq => target.eq(value.clone()),
                Compare::AtLeast => target.gte(value.clone()),
                Compare::AtMost => target.lte(value.clone()),
            };
            if filter.target.is_aggregate() {
                select.and_having(condition);
            } else {
                select.and_where(condition);
            }
        }

        if !self.group_by.is_empty() {
            select.add_group_by(self.group_by.iter().map(|col| col.expr()));
        }

        for sort in self.sort {
            let order = if sort.descending { Order::Desc } else { Order::Asc };
            select.order_by(Alias::new(sort.alias), order);
        }

        if let Some(n) = args.limit {
            select.limit(n);
        }

        select
    }

    /// Run against the store, returning one JSON object per row
    pub async fn run(
        &self,
        db: &DatabaseConnection,
        raw: &HashMap<String, String>,
    ) -> AppResult<Vec<JsonValue>> {
        let args = self.bind(raw)?;
        let backend = db.get_database_backend();
        let stmt = backend.build(&self.build(&args));

        tracing::debug!("Running {}: {}", self.name(), stmt.sql);

        let rows = db.query_all(stmt).await?;
        rows.iter().map(|row| self.decode(row)).collect()
    }

    fn decode(&self, row: &QueryResult) -> AppResult<JsonValue> {
        let mut object = Map::new();
        for output in self.outputs {
            object.insert(output.alias.to_string(), read_column(row, output)?);
        }
        Ok(JsonValue::Object(object))
    }
}

/// Find a report by number
pub fn find(number: u16) -> Option<&'static ReportDef> {
    CATALOG.iter().find(|def| def.number == number)
}

fn parse_param(name: &str, kind: ParamKind, text: &str) -> AppResult<Value> {
    let trimmed = text.trim();
    let parsed = match kind {
        ParamKind::Int => trimmed.parse::<i32>().ok().map(Value::from),
        ParamKind::Text => (!trimmed.is_empty()).then(|| Value::from(text.to_string())),
        ParamKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok().map(Value::from),
        // Bound as double precision so the same threshold compares against
        // Postgres numeric and SQLite real columns. Beyond ~15 significant
        // digits the comparison is approximate.
        ParamKind::Decimal => Decimal::from_str(trimmed)
            .ok()
            .and_then(|d| d.to_f64())
            .map(Value::from),
    };
    parsed.ok_or_else(|| AppError::Validation(format!("{}: expected {}", name, kind)))
}

/// Read one output column, tolerating driver differences in numeric types
fn read_column(row: &QueryResult, output: &Output) -> AppResult<JsonValue> {
    let col = output.alias;
    let value = match output.kind {
        Kind::Int => {
            let n = row
                .try_get::<Option<i32>>("", col)
                .map(|v| v.map(i64::from))
                .or_else(|_| row.try_get::<Option<i64>>("", col))?;
            JsonValue::from(n)
        }
        Kind::Text => JsonValue::from(row.try_get::<Option<String>>("", col)?),
        Kind::Date => match row.try_get::<Option<NaiveDate>>("", col)? {
            Some(date) => JsonValue::from(date.format("%Y-%m-%d").to_string()),
            None => JsonValue::Null,
        },
        Kind::Decimal => {
            let d = row
                .try_get::<Option<Decimal>>("", col)
                .or_else(|_| {
                    row.try_get::<Option<f64>>("", col)
                        .map(|v| v.and_then(|f| Decimal::try_from(f).ok()))
                })
                .or_else(|_| row.try_get::<Option<i64>>("", col).map(|v| v.map(Decimal::from)))?;
            match d {
                Some(d) => JsonValue::from(d.round_dp(2).normalize().to_string()),
                None => JsonValue::Null,
            }
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::PostgresQueryBuilder;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_catalog_numbers_are_unique() {
        let mut numbers: Vec<u16> = CATALOG.iter().map(|d| d.number).collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), CATALOG.len());
        assert!(find(4).is_some());
        assert!(find(999).is_none());
    }

    #[test]
    fn test_every_sort_names_an_output() {
        for def in CATALOG {
            for sort in def.sort {
                assert!(
                    def.outputs.iter().any(|o| o.alias == sort.alias),
                    "{} sorts by unknown column {}",
                    def.name(),
                    sort.alias
                );
            }
        }
    }

    #[test]
    fn test_missing_required_parameter() {
        let def = find(5).unwrap();
        let err = def.bind(&raw(&[])).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "missing required parameter: department_id"));
    }

    #[test]
    fn test_ill_typed_parameter() {
        let def = find(12).unwrap();
        let err = def
            .bind(&raw(&[("start_date", "yesterday"), ("end_date", "2024-01-31")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.starts_with("start_date: expected a date")));
    }

    #[test]
    fn test_unknown_parameters_are_ignored() {
        let def = find(6).unwrap();
        assert!(def.bind(&raw(&[("page", "3")])).is_ok());
    }

    #[test]
    fn test_limit_defaults_and_caps() {
        let def = find(7).unwrap();
        let limit = def.limit.unwrap();
        assert_eq!(def.bind(&raw(&[])).unwrap().limit, Some(limit.default));
        assert_eq!(def.bind(&raw(&[("limit", "1000000")])).unwrap().limit, Some(limit.max));
        assert!(def.bind(&raw(&[("limit", "0")])).is_err());
        assert!(def.bind(&raw(&[("limit", "-2")])).is_err());
    }

    #[test]
    fn test_text_parameter_is_bound_not_inlined() {
        let def = find(1).unwrap();
        let args = def.bind(&raw(&[("name", "x' OR 1=1 --")])).unwrap();
        let (sql, values) = def.build(&args).build(PostgresQueryBuilder);
        assert!(!sql.contains("OR 1=1"), "{}", sql);
        assert!(sql.contains("\"customers\".\"customer_name\" = $1"), "{}", sql);
        assert_eq!(values.0, vec![Value::from("x' OR 1=1 --".to_string())]);
    }

    #[test]
    fn test_aggregate_filters_go_to_having() {
        let def = find(4).unwrap();
        let args = def
            .bind(&raw(&[("min_revenue", "100"), ("project_id", "3")]))
            .unwrap();
        let (sql, _) = def.build(&args).build(PostgresQueryBuilder);
        let where_at = sql.find("WHERE").unwrap();
        let having_at = sql.find("HAVING").unwrap();
        assert!(where_at < having_at);
        assert!(sql[where_at..having_at].contains("\"projects\".\"project_id\""));
        assert!(sql[having_at..].contains("COALESCE(SUM("));
    }

    #[test]
    fn test_parameters_listing() {
        let def = find(12).unwrap();
        let names: Vec<&str> = def.parameters().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["start_date", "end_date"]);
        assert!(def.parameters().iter().all(|p| p.required));
    }
}
