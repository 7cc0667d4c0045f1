//! Initial schema: charities and the donations made to them.
//!
//! Money columns store USD cents as `BIGINT`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Charities {
    Table,
    Id,
    Name,
    Category,
    Description,
    GoalUsd,
    RaisedUsd,
    Verified,
    CreatedAt,
}

#[derive(Iden)]
enum Donations {
    Table,
    Id,
    CharityId,
    Donor,
    AmountUsd,
    Message,
    Ts,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Charities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Charities::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Charities::Name).string().not_null())
                    .col(ColumnDef::new(Charities::Category).string().not_null())
                    .col(ColumnDef::new(Charities::Description).string().not_null())
                    .col(ColumnDef::new(Charities::GoalUsd).big_integer().not_null())
                    .col(
                        ColumnDef::new(Charities::RaisedUsd)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Charities::Verified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Charities::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-charities-category")
                    .table(Charities::Table)
                    .col(Charities::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-charities-verified")
                    .table(Charities::Table)
                    .col(Charities::Verified)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donations::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donations::CharityId).blob().not_null())
                    .col(ColumnDef::new(Donations::Donor).string().not_null())
                    .col(ColumnDef::new(Donations::AmountUsd).big_integer().not_null())
                    .col(
                        ColumnDef::new(Donations::Message)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Donations::Ts).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-donations-charity_id")
                            .from(Donations::Table, Donations::CharityId)
                            .to(Charities::Table, Charities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-donations-charity_id")
                    .table(Donations::Table)
                    .col(Donations::CharityId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Charities::Table).to_owned())
            .await?;
        Ok(())
    }
}
