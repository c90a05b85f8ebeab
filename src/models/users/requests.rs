use serde::{Deserialize, Deserializer};

// 用户创建请求
//
// password 为已经计算好的凭据哈希，本层不处理明文密码。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub course_name: Option<String>,
    pub accept_tcp: Option<bool>,
}

// 用户标志更新请求
//
// 外层 None 表示不修改；Some(None) 表示清空为未设置。
// JSON 中缺省字段对应 None，显式的 null 对应 Some(None)。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserFlagsRequest {
    #[serde(default, deserialize_with = "explicit_flag")]
    pub active: Option<Option<bool>>,
    #[serde(default, deserialize_with = "explicit_flag")]
    pub donated: Option<Option<bool>>,
    #[serde(default, deserialize_with = "explicit_flag")]
    pub accept_tcp: Option<Option<bool>>,
}

fn explicit_flag<'de, D>(deserializer: D) -> Result<Option<Option<bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_distinguish_missing_and_null() {
        let update: UpdateUserFlagsRequest = serde_json::from_value(serde_json::json!({
            "active": false,
            "donated": null
        }))
        .unwrap();

        assert_eq!(update.active, Some(Some(false)));
        assert_eq!(update.donated, Some(None));
        assert_eq!(update.accept_tcp, None);
    }
}
