//! 行为日志存储操作
//!
//! 日志只追加，不提供修改或删除。

use super::{SeaOrmStorage, now};
use crate::entity::useinfo::{ActiveModel, Column, Entity as Useinfo};
use crate::errors::{BookServerError, Result};
use crate::models::{
    PaginationInfo,
    common::normalize_page,
    events::{
        entities::EventLogEntry,
        requests::{EventListQuery, LogEventRequest},
        responses::EventListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 记录一条行为日志
    pub async fn log_event_impl(&self, req: LogEventRequest) -> Result<EventLogEntry> {
        if req.sid.trim().is_empty() || req.event.trim().is_empty() {
            return Err(BookServerError::validation("sid 和 event 不能为空"));
        }

        let model = ActiveModel {
            timestamp: Set(Some(req.timestamp.unwrap_or_else(now))),
            sid: Set(Some(req.sid)),
            event: Set(Some(req.event)),
            act: Set(req.act),
            div_id: Set(req.div_id),
            course_id: Set(Some(req.course_name)),
            chapter: Set(req.chapter),
            sub_chapter: Set(req.sub_chapter),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("记录行为日志失败: {e}")))?;

        Ok(result.into_event())
    }

    /// 分页列出学生在课程中的行为日志，最新的在前
    pub async fn list_events_impl(&self, query: EventListQuery) -> Result<EventListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 20);

        let mut select = Useinfo::find()
            .filter(Column::Sid.eq(query.sid.as_str()))
            .filter(Column::CourseId.eq(query.course_name.as_str()));

        // 事件类型筛选
        if let Some(ref event) = query.event {
            select = select.filter(Column::Event.eq(event.as_str()));
        }

        select = select
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| BookServerError::database_operation(format!("查询日志总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| BookServerError::database_operation(format!("查询日志页数失败: {e}")))?;

        let events = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| BookServerError::database_operation(format!("查询日志列表失败: {e}")))?;

        Ok(EventListResponse {
            items: events.into_iter().map(|m| m.into_event()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 统计课程中的行为日志条数
    pub async fn count_events_impl(&self, course_name: &str) -> Result<u64> {
        Useinfo::find()
            .filter(Column::CourseId.eq(course_name))
            .count(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("统计行为日志失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_course};
    use super::*;
    use chrono::NaiveDate;

    fn event(sid: &str, event: &str, minute: u32) -> LogEventRequest {
        LogEventRequest {
            sid: sid.into(),
            event: event.into(),
            act: Some("answer:1:correct".into()),
            div_id: Some("q1".into()),
            course_name: "py4e".into(),
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 1)
                .and_then(|d| d.and_hms_opt(12, minute, 0)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_events_paginated_newest_first() {
        let storage = memory_storage().await;
        seed_course(&storage, "py4e").await;

        for minute in 0..5 {
            storage
                .log_event_impl(event("alice", "mChoice", minute))
                .await
                .unwrap();
        }
        storage
            .log_event_impl(event("alice", "page", 10))
            .await
            .unwrap();
        storage
            .log_event_impl(event("bob", "mChoice", 11))
            .await
            .unwrap();

        let first = storage
            .list_events_impl(EventListQuery {
                sid: "alice".into(),
                course_name: "py4e".into(),
                event: Some("mChoice".into()),
                page: Some(1),
                size: Some(2),
            })
            .await
            .unwrap();

        assert_eq!(first.pagination.total, 5);
        assert_eq!(first.pagination.total_pages, 3);
        assert_eq!(first.items.len(), 2);
        assert!(first.items[0].timestamp > first.items[1].timestamp);

        let last = storage
            .list_events_impl(EventListQuery {
                sid: "alice".into(),
                course_name: "py4e".into(),
                event: Some("mChoice".into()),
                page: Some(3),
                size: Some(2),
            })
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);

        assert_eq!(storage.count_events_impl("py4e").await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_event_requires_existing_course() {
        let storage = memory_storage().await;
        let result = storage.log_event_impl(event("alice", "page", 0)).await;
        assert!(matches!(result, Err(BookServerError::DatabaseOperation(_))));
    }
}
