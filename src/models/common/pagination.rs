use serde::{Deserialize, Serialize};

// 分页响应信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

/// 规范化分页参数：页码从 1 开始，每页 1 到 100 条
pub fn normalize_page(page: Option<i64>, size: Option<i64>, default_size: i64) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1) as u64;
    let size = size.unwrap_or(default_size).clamp(1, 100) as u64;
    (page, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_page() {
        assert_eq!(normalize_page(None, None, 20), (1, 20));
        assert_eq!(normalize_page(Some(0), Some(500), 20), (1, 100));
        assert_eq!(normalize_page(Some(3), Some(0), 20), (3, 1));
    }
}
