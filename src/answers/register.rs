use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use super::{AnswerKind, AnswerTable, EntityAnswerTable};
use crate::entity::{
    clickablearea_answers, codelens_answers, dragndrop_answers, fitb_answers, lp_answers,
    mchoice_answers, parsons_answers, shortanswer_answers, unittest_answers,
};
use crate::errors::{BookServerError, Result};

static ANSWER_TABLES: Lazy<Result<AnswerTableRegistry>> = Lazy::new(builtin_answer_tables);

/// 答案表注册表
///
/// 只追加不删除，按注册顺序保存；同名表重复注册视为建模错误，直接报错。
#[derive(Default)]
pub struct AnswerTableRegistry {
    tables: Vec<Arc<dyn AnswerTable>>,
    index: HashMap<&'static str, usize>,
}

impl AnswerTableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以表自身声明的表名注册，原样返回传入的定义
    pub fn register<T: AnswerTable + 'static>(&mut self, table: Arc<T>) -> Result<Arc<T>> {
        let name = table.table_name();
        if self.index.contains_key(name) {
            return Err(BookServerError::duplicate_registration(format!(
                "答案表 {name} 已注册"
            )));
        }

        self.index.insert(name, self.tables.len());
        self.tables.push(table.clone());
        Ok(table)
    }

    pub fn get(&self, table_name: &str) -> Option<&Arc<dyn AnswerTable>> {
        self.index.get(table_name).map(|&idx| &self.tables[idx])
    }

    pub fn by_kind(&self, kind: AnswerKind) -> Option<&Arc<dyn AnswerTable>> {
        self.tables.iter().find(|table| table.kind() == kind)
    }

    pub fn contains(&self, table_name: &str) -> bool {
        self.index.contains_key(table_name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// 按注册顺序遍历 (表名, 定义)
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Arc<dyn AnswerTable>)> {
        self.tables.iter().map(|table| (table.table_name(), table))
    }

    pub fn table_names(&self) -> Vec<&'static str> {
        self.tables.iter().map(|table| table.table_name()).collect()
    }
}

/// 注册所有内置答案表
///
/// 限时测验（timed_exam）虽然共享答案前缀列，但不属于答案表。
pub fn builtin_answer_tables() -> Result<AnswerTableRegistry> {
    let mut registry = AnswerTableRegistry::new();

    registry.register(EntityAnswerTable::<mchoice_answers::Entity>::shared(
        AnswerKind::MultipleChoice,
    ))?;
    registry.register(EntityAnswerTable::<fitb_answers::Entity>::shared(
        AnswerKind::FillInTheBlank,
    ))?;
    registry.register(EntityAnswerTable::<dragndrop_answers::Entity>::shared(
        AnswerKind::DragAndDrop,
    ))?;
    registry.register(EntityAnswerTable::<clickablearea_answers::Entity>::shared(
        AnswerKind::ClickableArea,
    ))?;
    registry.register(EntityAnswerTable::<parsons_answers::Entity>::shared(
        AnswerKind::Parsons,
    ))?;
    registry.register(EntityAnswerTable::<codelens_answers::Entity>::shared(
        AnswerKind::CodeLens,
    ))?;
    registry.register(EntityAnswerTable::<shortanswer_answers::Entity>::shared(
        AnswerKind::ShortAnswer,
    ))?;
    registry.register(EntityAnswerTable::<unittest_answers::Entity>::shared(
        AnswerKind::UnitTest,
    ))?;
    registry.register(EntityAnswerTable::<lp_answers::Entity>::shared(
        AnswerKind::LanguagePractice,
    ))?;

    Ok(registry)
}

/// 进程级注册表，首次访问时构建，之后只读
pub fn all_answer_tables() -> Result<&'static AnswerTableRegistry> {
    ANSWER_TABLES.as_ref().map_err(Clone::clone)
}

pub fn debug_answer_table_registry() {
    match all_answer_tables() {
        Ok(registry) if registry.is_empty() => {
            tracing::debug!("No answer tables registered.");
        }
        Ok(registry) => {
            tracing::debug!("Registered answer tables:");
            for (name, table) in registry.iter() {
                tracing::debug!(" - {} ({})", name, table.kind());
            }
        }
        Err(e) => {
            tracing::debug!("Answer table registry unavailable: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{AnswerKey, AnswerRow};
    use async_trait::async_trait;
    use sea_orm::DatabaseConnection;

    struct StubTable {
        name: &'static str,
        kind: AnswerKind,
    }

    #[async_trait]
    impl AnswerTable for StubTable {
        fn table_name(&self) -> &'static str {
            self.name
        }

        fn kind(&self) -> AnswerKind {
            self.kind
        }

        fn column_names(&self) -> Vec<&'static str> {
            vec!["id"]
        }

        async fn latest(
            &self,
            _db: &DatabaseConnection,
            _key: &AnswerKey,
        ) -> Result<Option<AnswerRow>> {
            Ok(None)
        }

        async fn list_for_course(
            &self,
            _db: &DatabaseConnection,
            _course_name: &str,
        ) -> Result<Vec<AnswerRow>> {
            Ok(vec![])
        }

        async fn count_for_course(
            &self,
            _db: &DatabaseConnection,
            _course_name: &str,
        ) -> Result<u64> {
            Ok(0)
        }
    }

    fn stub(name: &'static str) -> Arc<StubTable> {
        Arc::new(StubTable {
            name,
            kind: AnswerKind::ShortAnswer,
        })
    }

    #[test]
    fn test_register_returns_same_definition() {
        let mut registry = AnswerTableRegistry::new();
        let table = stub("essay_answers");
        let returned = registry.register(table.clone()).unwrap();
        assert!(Arc::ptr_eq(&table, &returned));
    }

    #[test]
    fn test_registered_tables_are_retrievable() {
        let mut registry = AnswerTableRegistry::new();
        let names = ["a_answers", "b_answers", "c_answers"];
        for name in names {
            registry.register(stub(name)).unwrap();
            // 注册返回后立即可见
            assert!(registry.contains(name));
        }

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.table_names(), names.to_vec());
        for name in names {
            assert_eq!(registry.get(name).unwrap().table_name(), name);
        }
        assert!(registry.get("d_answers").is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = AnswerTableRegistry::new();
        registry.register(stub("a_answers")).unwrap();

        let err = registry.register(stub("a_answers")).err().unwrap();
        assert!(matches!(err, BookServerError::DuplicateRegistration(_)));
        // 失败的注册不改变已有内容
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_membership_independent_of_order() {
        let mut forward = AnswerTableRegistry::new();
        let mut backward = AnswerTableRegistry::new();
        let names = ["x_answers", "y_answers", "z_answers"];

        for name in names {
            forward.register(stub(name)).unwrap();
        }
        for name in names.iter().rev() {
            backward.register(stub(name)).unwrap();
        }

        for name in names {
            assert!(forward.contains(name));
            assert!(backward.contains(name));
        }
    }

    #[test]
    fn test_builtin_tables() {
        let registry = builtin_answer_tables().unwrap();
        assert_eq!(registry.len(), AnswerKind::ALL.len());
        assert!(!registry.contains("timed_exam"));

        for kind in AnswerKind::ALL {
            let table = registry.by_kind(kind).unwrap();
            assert_eq!(table.table_name(), kind.table_name());
            assert!(registry.contains(kind.table_name()));
        }
    }

    #[test]
    fn test_global_registry_is_stable() {
        let first = all_answer_tables().unwrap();
        let second = all_answer_tables().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.table_names()[0], "mchoice_answers");
    }
}
