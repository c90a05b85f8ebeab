//! 答案表
//!
//! 每种交互题型的作答都存放在独立的表里，它们共享 id、timestamp、div_id、sid、
//! course_name 这组前缀列。报表和判分模块通过注册表遍历所有答案表，而不是硬编码题型列表。

pub mod register;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IdenStatic, Iterable, PaginatorTrait,
    PrimaryKeyToColumn, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};

use crate::errors::{BookServerError, Result};

pub use register::{
    AnswerTableRegistry, all_answer_tables, builtin_answer_tables, debug_answer_table_registry,
};

/// 为答案实体生成 [`AnswerEntity`] 与 [`AnswerFields`] 实现
///
/// 参数是模型的全部字段，按声明顺序列出，`fields()` 即按此顺序输出。
#[macro_export]
macro_rules! declare_answer_table {
    ($($field:ident),+ $(,)?) => {
        impl $crate::answers::AnswerEntity for Entity {
            fn timestamp_column() -> Column {
                Column::Timestamp
            }

            fn sid_column() -> Column {
                Column::Sid
            }

            fn div_id_column() -> Column {
                Column::DivId
            }

            fn course_column() -> Column {
                Column::CourseName
            }
        }

        impl $crate::answers::AnswerFields for Model {
            fn fields(&self) -> Vec<(&'static str, serde_json::Value)> {
                vec![$((stringify!($field), serde_json::json!(self.$field))),+]
            }
        }
    };
}

/// 已注册的答案题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    #[serde(rename = "mchoice")]
    MultipleChoice,
    #[serde(rename = "fitb")]
    FillInTheBlank,
    #[serde(rename = "dragndrop")]
    DragAndDrop,
    #[serde(rename = "clickablearea")]
    ClickableArea,
    Parsons,
    #[serde(rename = "codelens")]
    CodeLens,
    #[serde(rename = "shortanswer")]
    ShortAnswer,
    #[serde(rename = "unittest")]
    UnitTest,
    #[serde(rename = "lp")]
    LanguagePractice,
}

impl AnswerKind {
    pub const ALL: [AnswerKind; 9] = [
        AnswerKind::MultipleChoice,
        AnswerKind::FillInTheBlank,
        AnswerKind::DragAndDrop,
        AnswerKind::ClickableArea,
        AnswerKind::Parsons,
        AnswerKind::CodeLens,
        AnswerKind::ShortAnswer,
        AnswerKind::UnitTest,
        AnswerKind::LanguagePractice,
    ];

    /// 题型标签，与前端组件上报的名称一致
    pub fn tag(&self) -> &'static str {
        match self {
            AnswerKind::MultipleChoice => "mchoice",
            AnswerKind::FillInTheBlank => "fitb",
            AnswerKind::DragAndDrop => "dragndrop",
            AnswerKind::ClickableArea => "clickablearea",
            AnswerKind::Parsons => "parsons",
            AnswerKind::CodeLens => "codelens",
            AnswerKind::ShortAnswer => "shortanswer",
            AnswerKind::UnitTest => "unittest",
            AnswerKind::LanguagePractice => "lp",
        }
    }

    /// 该题型对应的表名
    pub fn table_name(&self) -> &'static str {
        match self {
            AnswerKind::MultipleChoice => "mchoice_answers",
            AnswerKind::FillInTheBlank => "fitb_answers",
            AnswerKind::DragAndDrop => "dragndrop_answers",
            AnswerKind::ClickableArea => "clickablearea_answers",
            AnswerKind::Parsons => "parsons_answers",
            AnswerKind::CodeLens => "codelens_answers",
            AnswerKind::ShortAnswer => "shortanswer_answers",
            AnswerKind::UnitTest => "unittest_answers",
            AnswerKind::LanguagePractice => "lp_answers",
        }
    }
}

impl std::fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for AnswerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AnswerKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| format!("Invalid answer kind: {s}"))
    }
}

/// 答案的默认定位方式：学生 + 题目 + 课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKey {
    pub sid: String,
    pub div_id: String,
    pub course_name: String,
}

/// 一行答案，列按实体声明顺序排列
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRow {
    pub table: &'static str,
    pub fields: Vec<(&'static str, serde_json::Value)>,
}

impl AnswerRow {
    pub fn from_model<E>(model: &E::Model) -> Self
    where
        E: AnswerEntity,
        E::Model: AnswerFields,
    {
        Self {
            table: E::default().as_str(),
            fields: model.fields(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&serde_json::Value> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    /// 转换为 JSON 对象，供导出使用，键按声明顺序排列
    pub fn to_json(&self) -> serde_json::Value {
        let object: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        serde_json::Value::Object(object)
    }
}

/// 答案实体的公共前缀列
pub trait AnswerEntity: EntityTrait {
    fn timestamp_column() -> Self::Column;
    fn sid_column() -> Self::Column;
    fn div_id_column() -> Self::Column;
    fn course_column() -> Self::Column;
}

/// 按固定顺序列出一行的全部列值
pub trait AnswerFields {
    fn fields(&self) -> Vec<(&'static str, serde_json::Value)>;
}

/// 答案表定义，注册表中保存的就是它
#[async_trait]
pub trait AnswerTable: Send + Sync {
    fn table_name(&self) -> &'static str;

    fn kind(&self) -> AnswerKind;

    fn column_names(&self) -> Vec<&'static str>;

    /// 学生在某门课程中对某道题的最近一次作答
    async fn latest(&self, db: &DatabaseConnection, key: &AnswerKey) -> Result<Option<AnswerRow>>;

    /// 课程下的全部作答，按时间升序
    async fn list_for_course(
        &self,
        db: &DatabaseConnection,
        course_name: &str,
    ) -> Result<Vec<AnswerRow>>;

    async fn count_for_course(&self, db: &DatabaseConnection, course_name: &str) -> Result<u64>;
}

/// 基于 SeaORM 实体的答案表定义
pub struct EntityAnswerTable<E> {
    kind: AnswerKind,
    entity: PhantomData<fn() -> E>,
}

impl<E: AnswerEntity> EntityAnswerTable<E> {
    pub fn new(kind: AnswerKind) -> Self {
        Self {
            kind,
            entity: PhantomData,
        }
    }

    pub fn shared(kind: AnswerKind) -> Arc<Self> {
        Arc::new(Self::new(kind))
    }
}

#[async_trait]
impl<E> AnswerTable for EntityAnswerTable<E>
where
    E: AnswerEntity,
    E::Model: AnswerFields + Sync,
{
    fn table_name(&self) -> &'static str {
        E::default().as_str()
    }

    fn kind(&self) -> AnswerKind {
        self.kind
    }

    fn column_names(&self) -> Vec<&'static str> {
        E::Column::iter().map(|column| column.as_str()).collect()
    }

    async fn latest(&self, db: &DatabaseConnection, key: &AnswerKey) -> Result<Option<AnswerRow>> {
        let mut select = E::find()
            .filter(E::sid_column().eq(key.sid.as_str()))
            .filter(E::div_id_column().eq(key.div_id.as_str()))
            .filter(E::course_column().eq(key.course_name.as_str()))
            .order_by_desc(E::timestamp_column());

        // 时间戳相同时以后写入的为准
        for pk in E::PrimaryKey::iter() {
            select = select.order_by_desc(pk.into_column());
        }

        let found = select.one(db).await.map_err(|e| {
            BookServerError::database_operation(format!(
                "查询 {} 最近作答失败: {e}",
                self.table_name()
            ))
        })?;

        Ok(found.map(|model| AnswerRow::from_model::<E>(&model)))
    }

    async fn list_for_course(
        &self,
        db: &DatabaseConnection,
        course_name: &str,
    ) -> Result<Vec<AnswerRow>> {
        let models = E::find()
            .filter(E::course_column().eq(course_name))
            .order_by_asc(E::timestamp_column())
            .all(db)
            .await
            .map_err(|e| {
                BookServerError::database_operation(format!(
                    "查询 {} 课程作答失败: {e}",
                    self.table_name()
                ))
            })?;

        Ok(models
            .iter()
            .map(|model| AnswerRow::from_model::<E>(model))
            .collect())
    }

    async fn count_for_course(&self, db: &DatabaseConnection, course_name: &str) -> Result<u64> {
        E::find()
            .filter(E::course_column().eq(course_name))
            .count(db)
            .await
            .map_err(|e| {
                BookServerError::database_operation(format!(
                    "统计 {} 课程作答失败: {e}",
                    self.table_name()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{lp_answers, mchoice_answers, shortanswer_answers};

    #[test]
    fn test_kind_round_trip() {
        for kind in AnswerKind::ALL {
            assert_eq!(kind.to_string().parse::<AnswerKind>().unwrap(), kind);
        }
        assert!("essay".parse::<AnswerKind>().is_err());
    }

    #[test]
    fn test_kind_serde_tag_matches_display() {
        for kind in AnswerKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.tag().to_string()));
        }
    }

    #[test]
    fn test_table_name_matches_kind() {
        let table = EntityAnswerTable::<mchoice_answers::Entity>::new(AnswerKind::MultipleChoice);
        assert_eq!(table.table_name(), AnswerKind::MultipleChoice.table_name());

        let table = EntityAnswerTable::<lp_answers::Entity>::new(AnswerKind::LanguagePractice);
        assert_eq!(table.table_name(), "lp_answers");
    }

    #[test]
    fn test_column_names_share_prefix() {
        let table = EntityAnswerTable::<shortanswer_answers::Entity>::new(AnswerKind::ShortAnswer);
        assert_eq!(
            table.column_names(),
            vec!["id", "timestamp", "div_id", "sid", "course_name", "answer"]
        );
    }

    #[test]
    fn test_fields_follow_declaration_order() {
        let model = mchoice_answers::Model {
            id: 7,
            timestamp: None,
            div_id: Some("q1".into()),
            sid: Some("alice".into()),
            course_name: Some("py4e".into()),
            correct: Some("T".into()),
            percent: Some(1.0),
            answer: Some("0".into()),
        };

        let row = AnswerRow::from_model::<mchoice_answers::Entity>(&model);
        let names: Vec<_> = row.fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "id",
                "timestamp",
                "div_id",
                "sid",
                "course_name",
                "correct",
                "percent",
                "answer"
            ]
        );
        assert_eq!(row.table, "mchoice_answers");
        assert_eq!(row.get("sid"), Some(&serde_json::json!("alice")));
        assert_eq!(row.to_json()["correct"], serde_json::json!("T"));

        // 导出的 JSON 对象保持声明顺序
        let json = row.to_json();
        let keys: Vec<_> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, names);
    }
}
