use super::entities::EventLogEntry;
use crate::models::PaginatedResponse;

// 行为日志列表响应
pub type EventListResponse = PaginatedResponse<EventLogEntry>;
