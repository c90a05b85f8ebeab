pub mod pagination;

pub use pagination::{PaginatedResponse, PaginationInfo, normalize_page};
