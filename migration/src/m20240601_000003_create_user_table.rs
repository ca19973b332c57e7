use sea_orm_migration::prelude::*;

use crate::m20240601_000001_create_role_table::Role;
use crate::m20240601_000002_create_organization_table::Organization;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(User::Table)
                .if_not_exists()
                .col(ColumnDef::new(User::Id).integer().not_null().auto_increment().primary_key())
                // no unique constraint: webhook replays are allowed to insert twice
                .col(ColumnDef::new(User::ExternalId).string_len(256).null())
                .col(ColumnDef::new(User::FirstName).string().null())
                .col(ColumnDef::new(User::LastName).string().null())
                .col(ColumnDef::new(User::Email).string_len(256).not_null())
                .col(ColumnDef::new(User::RoleId).integer().null())
                .col(ColumnDef::new(User::OrganizationId).integer().null())
                .col(ColumnDef::new(User::ManagerId).integer().null())
                .col(ColumnDef::new(User::Onboarded).boolean().not_null().default(false))
                .col(ColumnDef::new(User::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(User::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_users_role")
                        .from(User::Table, User::RoleId)
                        .to(Role::Table, Role::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_users_organization")
                        .from(User::Table, User::OrganizationId)
                        .to(Organization::Table, Organization::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_users_manager")
                        .from(User::Table, User::ManagerId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_users_external_id")
                .table(User::Table)
                .col(User::ExternalId)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_users_email")
                .table(User::Table)
                .col(User::Email)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_users_organization_id")
                .table(User::Table)
                .col(User::OrganizationId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(User::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    ExternalId,
    FirstName,
    LastName,
    Email,
    RoleId,
    OrganizationId,
    ManagerId,
    Onboarded,
    CreatedAt,
    UpdatedAt,
}
