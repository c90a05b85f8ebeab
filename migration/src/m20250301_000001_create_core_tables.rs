use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建课程表（其余表通过 course_name 引用它，必须最先创建）
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::CourseName)
                            .string_len(512)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::TermStartDate).date().null())
                    .col(ColumnDef::new(Courses::BaseCourse).string_len(512).null())
                    .col(ColumnDef::new(Courses::LoginRequired).char_len(1).null())
                    .col(ColumnDef::new(Courses::AllowPairs).char_len(1).null())
                    .col(ColumnDef::new(Courses::StudentPrice).integer().null())
                    .col(ColumnDef::new(Courses::DownloadsEnabled).char_len(1).null())
                    .col(ColumnDef::new(Courses::Courselevel).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::BaseCourse)
                            .to(Courses::Table, Courses::CourseName),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(AuthUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthUser::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AuthUser::Username)
                            .string_len(512)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AuthUser::FirstName).string_len(512).null())
                    .col(ColumnDef::new(AuthUser::LastName).string_len(512).null())
                    .col(
                        ColumnDef::new(AuthUser::Email)
                            .string_len(512)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AuthUser::Password).string_len(512).null())
                    .col(ColumnDef::new(AuthUser::CreatedOn).date_time().null())
                    .col(ColumnDef::new(AuthUser::ModifiedOn).date_time().null())
                    .col(
                        ColumnDef::new(AuthUser::RegistrationKey)
                            .string_len(512)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AuthUser::ResetPasswordKey)
                            .string_len(512)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AuthUser::RegistrationId)
                            .string_len(512)
                            .null(),
                    )
                    .col(ColumnDef::new(AuthUser::CourseId).integer().null())
                    .col(ColumnDef::new(AuthUser::CourseName).string_len(512).null())
                    .col(ColumnDef::new(AuthUser::Active).char_len(1).null())
                    .col(ColumnDef::new(AuthUser::Donated).char_len(1).null())
                    .col(ColumnDef::new(AuthUser::AcceptTcp).char_len(1).null())
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Questions::BaseCourse)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Questions::Name).string_len(512).not_null())
                    .col(ColumnDef::new(Questions::Chapter).string_len(512).null())
                    .col(ColumnDef::new(Questions::Subchapter).string_len(512).null())
                    .col(ColumnDef::new(Questions::Author).string_len(512).null())
                    .col(ColumnDef::new(Questions::Difficulty).integer().null())
                    .col(ColumnDef::new(Questions::Question).text().null())
                    .col(ColumnDef::new(Questions::Timestamp).date_time().null())
                    .col(
                        ColumnDef::new(Questions::QuestionType)
                            .string_len(512)
                            .null(),
                    )
                    .col(ColumnDef::new(Questions::IsPrivate).char_len(1).null())
                    .col(ColumnDef::new(Questions::Htmlsrc).text().null())
                    .col(ColumnDef::new(Questions::Autograde).string_len(512).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_questions_name")
                    .table(Questions::Table)
                    .col(Questions::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_quests_chap_subchap")
                    .table(Questions::Table)
                    .col(Questions::Chapter)
                    .col(Questions::Subchapter)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("const_uniq_name_bc")
                    .table(Questions::Table)
                    .col(Questions::Name)
                    .col(Questions::BaseCourse)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建学生行为日志表（只追加）
        manager
            .create_table(
                Table::create()
                    .table(Useinfo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Useinfo::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Useinfo::Timestamp).date_time().null())
                    .col(ColumnDef::new(Useinfo::Sid).string_len(512).null())
                    .col(ColumnDef::new(Useinfo::Event).string_len(512).null())
                    .col(ColumnDef::new(Useinfo::Act).string_len(512).null())
                    .col(ColumnDef::new(Useinfo::DivId).string_len(512).null())
                    .col(ColumnDef::new(Useinfo::CourseId).string_len(512).null())
                    .col(ColumnDef::new(Useinfo::Chapter).string().null())
                    .col(ColumnDef::new(Useinfo::SubChapter).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Useinfo::Table, Useinfo::CourseId)
                            .to(Courses::Table, Courses::CourseName),
                    )
                    .to_owned(),
            )
            .await?;

        // useinfo 体量很大，常用过滤列都需要索引
        for (name, column) in [
            ("ix_useinfo_timestamp", Useinfo::Timestamp),
            ("ix_useinfo_sid", Useinfo::Sid),
            ("ix_useinfo_event", Useinfo::Event),
            ("ix_useinfo_div_id", Useinfo::DivId),
            ("ix_useinfo_course_id", Useinfo::CourseId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Useinfo::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        // 创建代码运行历史表（只追加）
        manager
            .create_table(
                Table::create()
                    .table(Code::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Code::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Code::Timestamp).date_time().null())
                    .col(ColumnDef::new(Code::Sid).string_len(512).null())
                    .col(ColumnDef::new(Code::Acid).string_len(512).null())
                    .col(ColumnDef::new(Code::CourseName).string().null())
                    .col(ColumnDef::new(Code::CourseId).integer().null())
                    .col(ColumnDef::new(Code::Code).text().null())
                    .col(ColumnDef::new(Code::Language).text().null())
                    .col(ColumnDef::new(Code::Emessage).text().null())
                    .col(ColumnDef::new(Code::Comment).text().null())
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("ix_code_timestamp", Code::Timestamp),
            ("ix_code_sid", Code::Sid),
            ("ix_code_acid", Code::Acid),
            ("ix_code_course_name", Code::CourseName),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Code::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按依赖关系逆序删除表
        manager
            .drop_table(Table::drop().table(Code::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Useinfo::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuthUser::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    CourseName,
    TermStartDate,
    BaseCourse,
    LoginRequired,
    AllowPairs,
    StudentPrice,
    DownloadsEnabled,
    Courselevel,
}

#[derive(DeriveIden)]
enum AuthUser {
    #[sea_orm(iden = "auth_user")]
    Table,
    Id,
    Username,
    FirstName,
    LastName,
    Email,
    Password,
    CreatedOn,
    ModifiedOn,
    RegistrationKey,
    ResetPasswordKey,
    RegistrationId,
    CourseId,
    CourseName,
    Active,
    Donated,
    AcceptTcp,
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    BaseCourse,
    Name,
    Chapter,
    Subchapter,
    Author,
    Difficulty,
    Question,
    Timestamp,
    QuestionType,
    IsPrivate,
    Htmlsrc,
    Autograde,
}

#[derive(DeriveIden)]
enum Useinfo {
    #[sea_orm(iden = "useinfo")]
    Table,
    Id,
    Timestamp,
    Sid,
    Event,
    Act,
    DivId,
    CourseId,
    Chapter,
    SubChapter,
}

#[derive(DeriveIden)]
enum Code {
    #[sea_orm(iden = "code")]
    Table,
    Id,
    Timestamp,
    Sid,
    Acid,
    CourseName,
    CourseId,
    Code,
    Language,
    Emessage,
    Comment,
}
