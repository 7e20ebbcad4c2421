//! The shared list-query pattern behind every browsable resource.
//!
//! One builder, seven instantiations. Each resource is described by a static
//! `ResourceSpec` (table, selected columns, searchable columns, allowed
//! equality filters, ordering); the descriptor strings are compile-time
//! constants, so the generated SQL text never contains user input. Every
//! dynamic value (search pattern, filter values, limit, offset) is bound as
//! a query parameter.

use axum::extract::{Query, State};
use axum::Json;
use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Bool, Text};
use diesel::RunQueryDsl;
use std::collections::HashMap;
use std::sync::Arc;

use crate::shared::envelope::{ApiError, ListEnvelope};
use crate::shared::models::{
    MacroRow, OrganizationRow, TicketRow, TriggerCategoryRow, TriggerRow, UserRow, ViewRow,
};
use crate::shared::state::AppState;

pub const DEFAULT_LIMIT: i64 = 100;
/// Single system-wide ceiling for all list endpoints.
pub const MAX_LIMIT: i64 = 500;

pub struct ResourceSpec {
    pub table: &'static str,
    pub columns: &'static str,
    pub search_columns: &'static [&'static str],
    pub filters: &'static [FilterSpec],
    pub order_by: &'static str,
    /// Whether the resource accepts `offset` (and echoes it in the envelope).
    pub paginated: bool,
}

#[derive(Debug)]
pub struct FilterSpec {
    pub param: &'static str,
    pub column: &'static str,
    pub kind: FilterKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Bool,
    BigInt,
    Text,
}

impl FilterKind {
    /// Parse a raw query-string value. An unparseable value means "filter
    /// not applied", never an error.
    fn parse(self, raw: &str) -> Option<BoundValue> {
        match self {
            FilterKind::Bool => match raw {
                "true" => Some(BoundValue::Bool(true)),
                "false" => Some(BoundValue::Bool(false)),
                _ => None,
            },
            FilterKind::BigInt => raw.trim().parse().ok().map(BoundValue::BigInt),
            FilterKind::Text => {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| BoundValue::Text(trimmed.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Bool(bool),
    BigInt(i64),
    Text(String),
}

#[derive(Debug)]
pub struct ListParams {
    pub q: Option<String>,
    pub filters: Vec<(&'static FilterSpec, BoundValue)>,
    pub limit: i64,
    pub offset: i64,
}

impl ListParams {
    pub fn parse(spec: &'static ResourceSpec, raw: &HashMap<String, String>) -> Self {
        // An empty search term is the same as omitting it.
        let q = raw
            .get("q")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let mut filters = Vec::new();
        for filter in spec.filters {
            if let Some(value) = raw.get(filter.param).and_then(|v| filter.kind.parse(v)) {
                filters.push((filter, value));
            }
        }

        let limit = raw
            .get("limit")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);

        let offset = if spec.paginated {
            raw.get("offset")
                .and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(0)
                .max(0)
        } else {
            0
        };

        Self {
            q,
            filters,
            limit,
            offset,
        }
    }
}

/// Render the statement text. Only descriptor constants end up in the string;
/// placeholders are numbered in the order the values are later bound.
fn build_sql(spec: &ResourceSpec, params: &ListParams) -> String {
    let mut sql = format!("SELECT {} FROM {}", spec.columns, spec.table);
    let mut conditions: Vec<String> = Vec::new();
    let mut placeholder = 1;

    if params.q.is_some() {
        let matches: Vec<String> = spec
            .search_columns
            .iter()
            .map(|column| format!("{column} ILIKE ${placeholder}"))
            .collect();
        conditions.push(format!("({})", matches.join(" OR ")));
        placeholder += 1;
    }

    for (filter, _) in &params.filters {
        conditions.push(format!("{} = ${placeholder}", filter.column));
        placeholder += 1;
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(&format!(" ORDER BY {} LIMIT ${placeholder}", spec.order_by));
    if spec.paginated {
        placeholder += 1;
        sql.push_str(&format!(" OFFSET ${placeholder}"));
    }
    sql
}

/// Build the fully bound query for a resource. Callers pick the row type at
/// the `load` site.
pub fn list_query(
    spec: &'static ResourceSpec,
    params: &ListParams,
) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
    let mut query = diesel::sql_query(build_sql(spec, params)).into_boxed::<Pg>();

    if let Some(q) = &params.q {
        query = query.bind::<Text, _>(format!("%{q}%"));
    }
    for (_, value) in &params.filters {
        query = match value {
            BoundValue::Bool(v) => query.bind::<Bool, _>(*v),
            BoundValue::BigInt(v) => query.bind::<BigInt, _>(*v),
            BoundValue::Text(v) => query.bind::<Text, _>(v.clone()),
        };
    }
    query = query.bind::<BigInt, _>(params.limit);
    if spec.paginated {
        query = query.bind::<BigInt, _>(params.offset);
    }
    query
}

fn envelope<T>(spec: &ResourceSpec, params: &ListParams, rows: Vec<T>) -> ListEnvelope<T> {
    ListEnvelope {
        rows,
        limit: params.limit,
        offset: spec.paginated.then_some(params.offset),
    }
}

pub static TICKETS: ResourceSpec = ResourceSpec {
    table: "tickets",
    columns: "id, subject, description, status, priority, type AS ticket_type, \
              requester_id, assignee_id, organization_id, created_at, updated_at, due_at",
    search_columns: &["subject", "description"],
    filters: &[],
    order_by: "updated_at DESC NULLS LAST, id DESC",
    paginated: false,
};

pub static USERS: ResourceSpec = ResourceSpec {
    table: "users",
    columns: "id, name, email, role, active, created_at, updated_at",
    search_columns: &["name", "email"],
    filters: &[],
    order_by: "updated_at DESC NULLS LAST",
    paginated: false,
};

pub static ORGANIZATIONS: ResourceSpec = ResourceSpec {
    table: "organizations",
    columns: "id, name, external_id, created_at, updated_at",
    search_columns: &["name"],
    filters: &[],
    order_by: "updated_at DESC NULLS LAST",
    paginated: true,
};

pub static VIEWS: ResourceSpec = ResourceSpec {
    table: "views",
    columns: "id, title, description, active, position, default_view, created_at, updated_at",
    search_columns: &["title"],
    filters: &[],
    order_by: "position ASC NULLS LAST, updated_at DESC NULLS LAST",
    paginated: true,
};

pub static TRIGGERS: ResourceSpec = ResourceSpec {
    table: "triggers",
    columns: "id, title, description, active, position, category_id, default_trigger, \
              created_at, updated_at",
    search_columns: &["title"],
    filters: &[
        FilterSpec {
            param: "category_id",
            column: "category_id",
            kind: FilterKind::Text,
        },
        FilterSpec {
            param: "active",
            column: "active",
            kind: FilterKind::Bool,
        },
    ],
    order_by: "position ASC NULLS LAST, updated_at DESC NULLS LAST",
    paginated: true,
};

pub static TRIGGER_CATEGORIES: ResourceSpec = ResourceSpec {
    table: "trigger_categories",
    columns: "id, name, position, created_at, updated_at",
    search_columns: &["name"],
    filters: &[],
    order_by: "position ASC NULLS LAST, updated_at DESC NULLS LAST",
    paginated: true,
};

pub static MACROS: ResourceSpec = ResourceSpec {
    table: "macros",
    columns: "id, title, description, active, position, default_macro, created_at, updated_at",
    search_columns: &["title"],
    filters: &[FilterSpec {
        param: "active",
        column: "active",
        kind: FilterKind::Bool,
    }],
    order_by: "position ASC NULLS LAST, updated_at DESC NULLS LAST",
    paginated: true,
};

pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ListEnvelope<TicketRow>>, ApiError> {
    let params = ListParams::parse(&TICKETS, &raw);
    let mut conn = state.conn.get()?;
    let rows = list_query(&TICKETS, &params).load::<TicketRow>(&mut conn)?;
    Ok(Json(envelope(&TICKETS, &params, rows)))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ListEnvelope<UserRow>>, ApiError> {
    let params = ListParams::parse(&USERS, &raw);
    let mut conn = state.conn.get()?;
    let rows = list_query(&USERS, &params).load::<UserRow>(&mut conn)?;
    Ok(Json(envelope(&USERS, &params, rows)))
}

pub async fn list_organizations(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ListEnvelope<OrganizationRow>>, ApiError> {
    let params = ListParams::parse(&ORGANIZATIONS, &raw);
    let mut conn = state.conn.get()?;
    let rows = list_query(&ORGANIZATIONS, &params).load::<OrganizationRow>(&mut conn)?;
    Ok(Json(envelope(&ORGANIZATIONS, &params, rows)))
}

pub async fn list_views(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ListEnvelope<ViewRow>>, ApiError> {
    let params = ListParams::parse(&VIEWS, &raw);
    let mut conn = state.conn.get()?;
    let rows = list_query(&VIEWS, &params).load::<ViewRow>(&mut conn)?;
    Ok(Json(envelope(&VIEWS, &params, rows)))
}

pub async fn list_triggers(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ListEnvelope<TriggerRow>>, ApiError> {
    let params = ListParams::parse(&TRIGGERS, &raw);
    let mut conn = state.conn.get()?;
    let rows = list_query(&TRIGGERS, &params).load::<TriggerRow>(&mut conn)?;
    Ok(Json(envelope(&TRIGGERS, &params, rows)))
}

pub async fn list_trigger_categories(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ListEnvelope<TriggerCategoryRow>>, ApiError> {
    let params = ListParams::parse(&TRIGGER_CATEGORIES, &raw);
    let mut conn = state.conn.get()?;
    let rows = list_query(&TRIGGER_CATEGORIES, &params).load::<TriggerCategoryRow>(&mut conn)?;
    Ok(Json(envelope(&TRIGGER_CATEGORIES, &params, rows)))
}

pub async fn list_macros(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ListEnvelope<MacroRow>>, ApiError> {
    let params = ListParams::parse(&MACROS, &raw);
    let mut conn = state.conn.get()?;
    let rows = list_query(&MACROS, &params).load::<MacroRow>(&mut conn)?;
    Ok(Json(envelope(&MACROS, &params, rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn limit_defaults_and_clamps() {
        let cases = [
            (raw(&[]), DEFAULT_LIMIT),
            (raw(&[("limit", "abc")]), DEFAULT_LIMIT),
            (raw(&[("limit", "9999")]), MAX_LIMIT),
            (raw(&[("limit", "-5")]), 1),
            (raw(&[("limit", "0")]), 1),
            (raw(&[("limit", "250")]), 250),
        ];
        for (input, expected) in cases {
            let params = ListParams::parse(&USERS, &input);
            assert_eq!(params.limit, expected, "input: {input:?}");
            assert!(params.limit >= 1 && params.limit <= MAX_LIMIT);
        }
    }

    #[test]
    fn offset_floors_at_zero_and_only_applies_when_paginated() {
        let params = ListParams::parse(&ORGANIZATIONS, &raw(&[("offset", "-10")]));
        assert_eq!(params.offset, 0);
        let params = ListParams::parse(&ORGANIZATIONS, &raw(&[("offset", "40")]));
        assert_eq!(params.offset, 40);
        // Tickets never accept offset.
        let params = ListParams::parse(&TICKETS, &raw(&[("offset", "40")]));
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn empty_search_term_is_the_same_as_no_search_term() {
        let with_empty = ListParams::parse(&USERS, &raw(&[("q", "")]));
        let with_blank = ListParams::parse(&USERS, &raw(&[("q", "   ")]));
        let without = ListParams::parse(&USERS, &raw(&[]));
        assert_eq!(with_empty.q, None);
        assert_eq!(with_blank.q, None);
        assert_eq!(build_sql(&USERS, &with_empty), build_sql(&USERS, &without));
    }

    #[test]
    fn boolean_filters_only_accept_literal_true_false() {
        let applied = ListParams::parse(&MACROS, &raw(&[("active", "true")]));
        assert_eq!(applied.filters.len(), 1);
        assert_eq!(applied.filters[0].1, BoundValue::Bool(true));

        for junk in ["TRUE", "1", "yes", ""] {
            let skipped = ListParams::parse(&MACROS, &raw(&[("active", junk)]));
            assert!(skipped.filters.is_empty(), "{junk:?} should be skipped");
        }
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let params = ListParams::parse(&USERS, &raw(&[("role", "admin"), ("q", "ann")]));
        assert!(params.filters.is_empty());
        assert_eq!(params.q.as_deref(), Some("ann"));
    }

    #[test]
    fn sql_shape_for_search_and_filters() {
        let params = ListParams::parse(
            &TRIGGERS,
            &raw(&[("q", "notify"), ("category_id", "abc123"), ("active", "true")]),
        );
        let sql = build_sql(&TRIGGERS, &params);
        assert_eq!(
            sql,
            "SELECT id, title, description, active, position, category_id, default_trigger, \
             created_at, updated_at FROM triggers \
             WHERE (title ILIKE $1) AND category_id = $2 AND active = $3 \
             ORDER BY position ASC NULLS LAST, updated_at DESC NULLS LAST LIMIT $4 OFFSET $5"
        );
        // The user-supplied term itself never appears in the statement text.
        assert!(!sql.contains("notify"));
        assert!(!sql.contains("abc123"));
    }

    #[test]
    fn sql_shape_for_unpaginated_multi_column_search() {
        let params = ListParams::parse(&TICKETS, &raw(&[("q", "printer")]));
        let sql = build_sql(&TICKETS, &params);
        assert_eq!(
            sql,
            "SELECT id, subject, description, status, priority, type AS ticket_type, \
             requester_id, assignee_id, organization_id, created_at, updated_at, due_at \
             FROM tickets WHERE (subject ILIKE $1 OR description ILIKE $1) \
             ORDER BY updated_at DESC NULLS LAST, id DESC LIMIT $2"
        );
        assert!(!sql.contains("OFFSET"));
    }

    #[test]
    fn sql_shape_without_any_parameters() {
        let params = ListParams::parse(&TRIGGER_CATEGORIES, &raw(&[]));
        let sql = build_sql(&TRIGGER_CATEGORIES, &params);
        assert_eq!(
            sql,
            "SELECT id, name, position, created_at, updated_at FROM trigger_categories \
             ORDER BY position ASC NULLS LAST, updated_at DESC NULLS LAST LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn search_uses_case_insensitive_match() {
        let lower = ListParams::parse(&VIEWS, &raw(&[("q", "widget")]));
        let upper = ListParams::parse(&VIEWS, &raw(&[("q", "WIDGET")]));
        // Same statement either way; ILIKE makes the bound pattern
        // case-insensitive at the store.
        assert_eq!(build_sql(&VIEWS, &lower), build_sql(&VIEWS, &upper));
        assert!(build_sql(&VIEWS, &lower).contains("title ILIKE $1"));
    }
}
