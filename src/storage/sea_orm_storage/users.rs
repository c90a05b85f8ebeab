use super::{SeaOrmStorage, now};
use crate::entity::auth_user::{ActiveModel, Column, Entity as AuthUsers};
use crate::errors::{BookServerError, Result};
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, UpdateUserFlagsRequest},
};
use crate::utils::legacy_bool;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        if req.username.trim().is_empty() {
            return Err(BookServerError::validation("username 不能为空"));
        }

        // 同时记录课程名和课程 id，两者必须指向同一门课程
        let course_id = match req.course_name.as_deref() {
            Some(name) => {
                let course = self.get_course_by_name_impl(name).await?.ok_or_else(|| {
                    BookServerError::not_found(format!("课程不存在: {name}"))
                })?;
                Some(course.id)
            }
            None => None,
        };

        let now = now();
        let model = ActiveModel {
            username: Set(req.username),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            password: Set(req.password),
            created_on: Set(Some(now)),
            modified_on: Set(Some(now)),
            course_id: Set(course_id),
            course_name: Set(req.course_name),
            active: Set(legacy_bool::encode_column(Some(true))),
            donated: Set(legacy_bool::encode_column(Some(false))),
            accept_tcp: Set(legacy_bool::encode_column(req.accept_tcp)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("创建用户失败: {e}")))?;

        result.try_into_user()
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = AuthUsers::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("查询用户失败: {e}")))?;

        result.map(|m| m.try_into_user()).transpose()
    }

    /// 列出当前所在课程为 course_name 的用户
    pub async fn list_course_users_impl(&self, course_name: &str) -> Result<Vec<User>> {
        let users = AuthUsers::find()
            .filter(Column::CourseName.eq(course_name))
            .order_by_asc(Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("查询课程用户失败: {e}")))?;

        users.into_iter().map(|m| m.try_into_user()).collect()
    }

    /// 更新用户标志，未给出的标志保持不变
    pub async fn update_user_flags_impl(
        &self,
        username: &str,
        update: UpdateUserFlagsRequest,
    ) -> Result<Option<User>> {
        let existing = AuthUsers::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("查询用户失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(existing.id),
            modified_on: Set(Some(now())),
            ..Default::default()
        };

        if let Some(active) = update.active {
            model.active = Set(legacy_bool::encode_column(active));
        }

        if let Some(donated) = update.donated {
            model.donated = Set(legacy_bool::encode_column(donated));
        }

        if let Some(accept_tcp) = update.accept_tcp {
            model.accept_tcp = Set(legacy_bool::encode_column(accept_tcp));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| BookServerError::database_operation(format!("更新用户失败: {e}")))?;

        result.try_into_user().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_course};
    use super::*;

    fn request(username: &str, course: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: Some(format!("{username}@example.com")),
            course_name: course.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_user_sets_default_flags() {
        let storage = memory_storage().await;
        seed_course(&storage, "py4e").await;

        let user = storage
            .create_user_impl(request("alice", Some("py4e")))
            .await
            .unwrap();

        assert_eq!(user.active, Some(true));
        assert_eq!(user.donated, Some(false));
        assert_eq!(user.accept_tcp, None);
        assert!(user.course_id.is_some());
        assert_eq!(user.display_name(), "alice");
    }

    #[tokio::test]
    async fn test_unknown_course_and_duplicate_username() {
        let storage = memory_storage().await;

        let missing = storage
            .create_user_impl(request("alice", Some("nope")))
            .await;
        assert!(matches!(missing, Err(BookServerError::NotFound(_))));

        storage.create_user_impl(request("alice", None)).await.unwrap();
        let mut dup = request("alice", None);
        dup.email = Some("other@example.com".into());
        assert!(matches!(
            storage.create_user_impl(dup).await,
            Err(BookServerError::DatabaseOperation(_))
        ));
    }

    #[tokio::test]
    async fn test_list_course_users_sorted() {
        let storage = memory_storage().await;
        seed_course(&storage, "py4e").await;
        seed_course(&storage, "thinkcspy").await;

        for name in ["carol", "alice", "bob"] {
            storage
                .create_user_impl(request(name, Some("py4e")))
                .await
                .unwrap();
        }
        storage
            .create_user_impl(request("dave", Some("thinkcspy")))
            .await
            .unwrap();

        let users = storage.list_course_users_impl("py4e").await.unwrap();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn test_update_user_flags() {
        let storage = memory_storage().await;
        storage.create_user_impl(request("alice", None)).await.unwrap();

        let updated = storage
            .update_user_flags_impl(
                "alice",
                UpdateUserFlagsRequest {
                    donated: Some(Some(true)),
                    accept_tcp: Some(Some(false)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.active, Some(true));
        assert_eq!(updated.donated, Some(true));
        assert_eq!(updated.accept_tcp, Some(false));

        // 显式清空为未设置，其余标志不变
        let reset = storage
            .update_user_flags_impl(
                "alice",
                UpdateUserFlagsRequest {
                    donated: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(reset.donated, None);
        assert_eq!(reset.active, Some(true));
        assert_eq!(reset.accept_tcp, Some(false));

        let missing = storage
            .update_user_flags_impl("nobody", UpdateUserFlagsRequest::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
