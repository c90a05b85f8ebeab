//! 旧版单字符布尔编码
//!
//! 历史数据库用 `CHAR(1)` 存储布尔标志：`T` 表示真，`F` 表示假，NULL 表示未设置。
//! 所有标志列都是三态的，这里统一负责 `Option<bool>` 与存储字符之间的转换。

use crate::errors::{BookServerError, Result};

pub const TRUE_FLAG: char = 'T';
pub const FALSE_FLAG: char = 'F';

/// 编码为存储字符，未设置时不写入任何值
pub fn encode(value: Option<bool>) -> Option<char> {
    match value {
        Some(true) => Some(TRUE_FLAG),
        Some(false) => Some(FALSE_FLAG),
        None => None,
    }
}

/// 从存储字符还原三态值
///
/// `T`/`F` 以外的字符说明存储已损坏或编码不一致，返回 `CorruptEncoding`，绝不静默转换。
pub fn decode(stored: Option<char>) -> Result<Option<bool>> {
    match stored {
        Some(TRUE_FLAG) => Ok(Some(true)),
        Some(FALSE_FLAG) => Ok(Some(false)),
        None => Ok(None),
        Some(other) => Err(BookServerError::corrupt_encoding(format!(
            "无效的布尔标志字符: {other:?}"
        ))),
    }
}

/// 编码为列值（`CHAR(1)` 列在实体中映射为 `Option<String>`）
pub fn encode_column(value: Option<bool>) -> Option<String> {
    encode(value).map(String::from)
}

/// 从列值解码，列值必须恰好是一个字符
pub fn decode_column(stored: Option<&str>) -> Result<Option<bool>> {
    let Some(raw) = stored else {
        return Ok(None);
    };

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(flag), None) => decode(Some(flag)),
        _ => Err(BookServerError::corrupt_encoding(format!(
            "布尔标志列必须为单个字符: {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for value in [Some(true), Some(false), None] {
            assert_eq!(decode(encode(value)).unwrap(), value);
            assert_eq!(
                decode_column(encode_column(value).as_deref()).unwrap(),
                value
            );
        }
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(Some(true)), Some('T'));
        assert_eq!(encode(Some(false)), Some('F'));
        assert_eq!(encode(None), None);
        assert_eq!(encode_column(Some(true)).as_deref(), Some("T"));
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(Some('T')).unwrap(), Some(true));
        assert_eq!(decode(Some('F')).unwrap(), Some(false));
        assert_eq!(decode(None).unwrap(), None);
    }

    #[test]
    fn test_decode_rejects_other_chars() {
        for flag in ['t', 'f', 'Y', '1', ' '] {
            let err = decode(Some(flag)).unwrap_err();
            assert_eq!(err.code(), "E007");
        }
    }

    #[test]
    fn test_decode_column_rejects_bad_width() {
        assert!(matches!(
            decode_column(Some("")),
            Err(BookServerError::CorruptEncoding(_))
        ));
        assert!(matches!(
            decode_column(Some("TF")),
            Err(BookServerError::CorruptEncoding(_))
        ));
        assert!(matches!(
            decode_column(Some("true")),
            Err(BookServerError::CorruptEncoding(_))
        ));
    }
}
