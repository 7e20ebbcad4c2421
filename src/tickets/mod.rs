//! Ticket detail aggregation: one ticket joined with its requester, assignee
//! and organization display fields, plus the full comment thread and the
//! ticket's attachments.
//!
//! The response carries flat `comments` and `attachments` arrays; both are
//! keyed by the requested ticket and ordered oldest-first with an id
//! tie-break, so rendering the thread is a single pass. `group_by_comment`
//! is the canonical grouping the rendering layer derives from the flat
//! attachment array.

use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::shared::envelope::{ApiError, Rows};
use crate::shared::models::{Attachment, TicketComment, TicketDetailRow};
use crate::shared::schema::{attachments, ticket_comments};
use crate::shared::state::AppState;

const DETAIL_SQL: &str = "SELECT t.id, t.subject, t.description, t.status, t.priority, \
     t.type AS ticket_type, t.requester_id, t.assignee_id, t.organization_id, \
     t.created_at, t.updated_at, t.due_at, \
     ru.name AS requester_name, ru.email AS requester_email, \
     au.name AS assignee_name, au.email AS assignee_email, \
     o.name AS organization_name \
     FROM tickets t \
     LEFT JOIN users ru ON ru.id = t.requester_id \
     LEFT JOIN users au ON au.id = t.assignee_id \
     LEFT JOIN organizations o ON o.id = t.organization_id \
     WHERE t.id = $1";

#[derive(Debug, Serialize)]
pub struct TicketDetail {
    pub ticket: TicketDetailRow,
    pub comments: Vec<TicketComment>,
    pub attachments: Vec<Attachment>,
}

/// The path id must be a plain integer; anything else fails fast before any
/// query runs.
fn parse_ticket_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn comments_for(conn: &mut PgConnection, id: i64) -> QueryResult<Vec<TicketComment>> {
    ticket_comments::table
        .filter(ticket_comments::ticket_id.eq(id))
        .order((ticket_comments::created_at.asc(), ticket_comments::id.asc()))
        .select(TicketComment::as_select())
        .load(conn)
}

fn attachments_for(conn: &mut PgConnection, id: i64) -> QueryResult<Vec<Attachment>> {
    attachments::table
        .filter(attachments::ticket_id.eq(id))
        .order((attachments::created_at.asc(), attachments::id.asc()))
        .select(Attachment::as_select())
        .load(conn)
}

pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TicketDetail>, ApiError> {
    let ticket_id = parse_ticket_id(&id).ok_or(ApiError::BadTicketId)?;
    let mut conn = state.conn.get()?;

    let ticket = diesel::sql_query(DETAIL_SQL)
        .bind::<BigInt, _>(ticket_id)
        .get_result::<TicketDetailRow>(&mut conn)
        .optional()?
        .ok_or(ApiError::TicketNotFound)?;

    let comments = comments_for(&mut conn, ticket_id)?;
    let attachments = attachments_for(&mut conn, ticket_id)?;

    Ok(Json(TicketDetail {
        ticket,
        comments,
        attachments,
    }))
}

/// Narrower companion endpoint: just the ticket's attachments, same ordering
/// guarantee as the full aggregate.
pub async fn list_ticket_attachments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Rows<Attachment>>, ApiError> {
    let ticket_id = parse_ticket_id(&id).ok_or(ApiError::BadTicketId)?;
    let mut conn = state.conn.get()?;
    let rows = attachments_for(&mut conn, ticket_id)?;
    Ok(Json(Rows { rows }))
}

/// Group a ticket's attachments by owning comment. Attachments with no
/// comment association (null or 0) are ticket-level: they belong to no
/// per-comment group but stay in the flat listing. Input order is preserved
/// within each group.
pub fn group_by_comment(
    attachments: &[Attachment],
) -> (BTreeMap<i64, Vec<&Attachment>>, Vec<&Attachment>) {
    let mut groups: BTreeMap<i64, Vec<&Attachment>> = BTreeMap::new();
    let mut ticket_level = Vec::new();
    for attachment in attachments {
        match attachment.comment_id {
            Some(comment_id) if comment_id != 0 => {
                groups.entry(comment_id).or_default().push(attachment);
            }
            _ => ticket_level.push(attachment),
        }
    }
    (groups, ticket_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn ticket_id_parsing() {
        assert_eq!(parse_ticket_id("42"), Some(42));
        assert_eq!(parse_ticket_id(" 42 "), Some(42));
        assert_eq!(parse_ticket_id("abc"), None);
        assert_eq!(parse_ticket_id("4.5"), None);
        assert_eq!(parse_ticket_id(""), None);
    }

    fn attachment(id: i64, comment_id: Option<i64>, minute: u32) -> Attachment {
        Attachment {
            id,
            ticket_id: Some(1),
            comment_id,
            file_name: Some(format!("file-{id}.png")),
            content_url: None,
            local_path: None,
            content_type: Some("image/png".to_string()),
            size: Some(1024),
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()),
        }
    }

    #[test]
    fn grouping_splits_comment_owned_from_ticket_level() {
        // a1, a2 belong to comment 10; a3 has no comment association.
        let all = vec![
            attachment(1, Some(10), 0),
            attachment(2, Some(10), 1),
            attachment(3, None, 2),
        ];
        let (groups, ticket_level) = group_by_comment(&all);

        let c1: Vec<i64> = groups[&10].iter().map(|a| a.id).collect();
        assert_eq!(c1, vec![1, 2]);
        assert_eq!(groups.len(), 1);
        let loose: Vec<i64> = ticket_level.iter().map(|a| a.id).collect();
        assert_eq!(loose, vec![3]);
        // The flat listing still contains everything.
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn zero_comment_id_means_ticket_level() {
        let all = vec![attachment(7, Some(0), 0)];
        let (groups, ticket_level) = group_by_comment(&all);
        assert!(groups.is_empty());
        assert_eq!(ticket_level.len(), 1);
    }

    #[test]
    fn grouping_preserves_creation_order_within_a_comment() {
        let all = vec![
            attachment(5, Some(3), 0),
            attachment(9, Some(3), 1),
            attachment(6, Some(3), 2),
        ];
        let (groups, _) = group_by_comment(&all);
        let ids: Vec<i64> = groups[&3].iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![5, 9, 6]);
    }
}
