//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_bookserver_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum BookServerError {
            $($variant(String),)*
        }

        impl BookServerError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(BookServerError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(BookServerError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(BookServerError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl BookServerError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        BookServerError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_bookserver_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Serialization("E006", "Serialization Error"),
    CorruptEncoding("E007", "Corrupt Encoding Error"),
    DuplicateRegistration("E008", "Duplicate Registration Error"),
}

impl BookServerError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for BookServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for BookServerError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for BookServerError {
    fn from(err: sea_orm::DbErr) -> Self {
        BookServerError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for BookServerError {
    fn from(err: serde_json::Error) -> Self {
        BookServerError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BookServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(BookServerError::database_config("test").code(), "E001");
        assert_eq!(BookServerError::validation("test").code(), "E004");
        assert_eq!(BookServerError::corrupt_encoding("test").code(), "E007");
        assert_eq!(
            BookServerError::duplicate_registration("test").code(),
            "E008"
        );
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            BookServerError::corrupt_encoding("test").error_type(),
            "Corrupt Encoding Error"
        );
        assert_eq!(
            BookServerError::duplicate_registration("test").error_type(),
            "Duplicate Registration Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = BookServerError::not_found("course missing");
        assert_eq!(err.message(), "course missing");
    }

    #[test]
    fn test_format_simple() {
        let err = BookServerError::corrupt_encoding("stored flag 'X'");
        let formatted = err.format_simple();
        assert!(formatted.contains("Corrupt Encoding Error"));
        assert!(formatted.contains("stored flag 'X'"));
    }

    #[test]
    fn test_from_db_err() {
        let err: BookServerError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("boom"));
    }
}
