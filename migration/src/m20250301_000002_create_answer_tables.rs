use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_core_tables::Courses;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 带判分列的答案表：(表, 表名, 组合索引后缀)
const CORRECT_ANSWER_TABLES: [(AnswerTables, &str, &str); 7] = [
    (AnswerTables::MchoiceAnswers, "mchoice_answers", "mc"),
    (AnswerTables::FitbAnswers, "fitb_answers", "fb"),
    (AnswerTables::DragndropAnswers, "dragndrop_answers", "dd"),
    (AnswerTables::ClickableareaAnswers, "clickablearea_answers", "ca"),
    (AnswerTables::ParsonsAnswers, "parsons_answers", "pp"),
    (AnswerTables::CodelensAnswers, "codelens_answers", "cl"),
    (AnswerTables::UnittestAnswers, "unittest_answers", "ut"),
];

/// 所有答案表共享的前缀列：id、timestamp、div_id、sid、course_name
fn answer_table(table: AnswerTables) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(Answer::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Answer::Timestamp).date_time().null())
        .col(ColumnDef::new(Answer::DivId).string_len(512).null())
        .col(ColumnDef::new(Answer::Sid).string_len(512).null())
        .col(ColumnDef::new(Answer::CourseName).string_len(512).null())
        .foreign_key(
            ForeignKey::create()
                .from(table, Answer::CourseName)
                .to(Courses::Table, Courses::CourseName),
        )
        .to_owned()
}

async fn create_prefix_indexes(
    manager: &SchemaManager<'_>,
    table: AnswerTables,
    table_name: &str,
    suffix: Option<&str>,
) -> Result<(), DbErr> {
    manager
        .create_index(
            Index::create()
                .if_not_exists()
                .name(format!("ix_{table_name}_div_id"))
                .table(table)
                .col(Answer::DivId)
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .if_not_exists()
                .name(format!("ix_{table_name}_sid"))
                .table(table)
                .col(Answer::Sid)
                .to_owned(),
        )
        .await?;

    // 答案几乎总是按 sid + div_id + course_name 查询
    if let Some(suffix) = suffix {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(format!("idx_div_sid_course_{suffix}"))
                    .table(table)
                    .col(Answer::Sid)
                    .col(Answer::DivId)
                    .col(Answer::CourseName)
                    .to_owned(),
            )
            .await?;
    }

    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 带判分的答案表 ====================
        for (table, table_name, suffix) in CORRECT_ANSWER_TABLES {
            let mut stmt = answer_table(table);
            stmt.col(ColumnDef::new(Answer::Correct).char_len(1).null())
                .col(ColumnDef::new(Answer::Percent).double().null());

            match table {
                AnswerTables::MchoiceAnswers => {
                    stmt.col(ColumnDef::new(Answer::Answer).string_len(50).null());
                }
                AnswerTables::ParsonsAnswers | AnswerTables::CodelensAnswers => {
                    stmt.col(ColumnDef::new(Answer::Answer).string_len(512).null())
                        .col(ColumnDef::new(Answer::Source).string_len(512).null());
                }
                AnswerTables::UnittestAnswers => {
                    stmt.col(ColumnDef::new(Answer::Answer).text().null())
                        .col(ColumnDef::new(Answer::Passed).integer().null())
                        .col(ColumnDef::new(Answer::Failed).integer().null());
                }
                _ => {
                    stmt.col(ColumnDef::new(Answer::Answer).string_len(512).null());
                }
            }

            manager.create_table(stmt).await?;
            create_prefix_indexes(manager, table, table_name, Some(suffix)).await?;
        }

        // ==================== 简答题 ====================
        let mut stmt = answer_table(AnswerTables::ShortanswerAnswers);
        stmt.col(ColumnDef::new(Answer::Answer).string_len(512).null());
        manager.create_table(stmt).await?;
        create_prefix_indexes(
            manager,
            AnswerTables::ShortanswerAnswers,
            "shortanswer_answers",
            Some("sa"),
        )
        .await?;

        // ==================== 语言练习（correct 为 0-100 的分数） ====================
        let mut stmt = answer_table(AnswerTables::LpAnswers);
        stmt.col(ColumnDef::new(Answer::Answer).string_len(512).null())
            .col(ColumnDef::new(Answer::Correct).double().null());
        manager.create_table(stmt).await?;
        create_prefix_indexes(manager, AnswerTables::LpAnswers, "lp_answers", Some("lp")).await?;

        // ==================== 限时测验 ====================
        let mut stmt = answer_table(AnswerTables::TimedExam);
        stmt.col(ColumnDef::new(TimedExam::Correct).integer().null())
            .col(ColumnDef::new(TimedExam::Incorrect).integer().null())
            .col(ColumnDef::new(TimedExam::Skipped).integer().null())
            .col(ColumnDef::new(TimedExam::TimeTaken).integer().null())
            .col(ColumnDef::new(TimedExam::Reset).char_len(1).null());
        manager.create_table(stmt).await?;
        create_prefix_indexes(manager, AnswerTables::TimedExam, "timed_exam", None).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let tables = CORRECT_ANSWER_TABLES
            .into_iter()
            .map(|(table, _, _)| table)
            .chain([
                AnswerTables::ShortanswerAnswers,
                AnswerTables::LpAnswers,
                AnswerTables::TimedExam,
            ]);

        for table in tables {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum AnswerTables {
    MchoiceAnswers,
    FitbAnswers,
    DragndropAnswers,
    ClickableareaAnswers,
    ParsonsAnswers,
    CodelensAnswers,
    ShortanswerAnswers,
    UnittestAnswers,
    LpAnswers,
    TimedExam,
}

#[derive(DeriveIden)]
enum Answer {
    Id,
    Timestamp,
    DivId,
    Sid,
    CourseName,
    Correct,
    Percent,
    Answer,
    Source,
    Passed,
    Failed,
}

#[derive(DeriveIden)]
enum TimedExam {
    Correct,
    Incorrect,
    Skipped,
    TimeTaken,
    Reset,
}
