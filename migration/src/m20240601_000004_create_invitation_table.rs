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
                .table(Invitation::Table)
                .if_not_exists()
                .col(ColumnDef::new(Invitation::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Invitation::Token).string_len(64).not_null().unique_key())
                .col(ColumnDef::new(Invitation::SenderEmail).string_len(256).not_null())
                .col(ColumnDef::new(Invitation::Email).string_len(256).not_null())
                .col(ColumnDef::new(Invitation::RoleId).integer().not_null())
                .col(ColumnDef::new(Invitation::OrganizationId).integer().not_null())
                .col(ColumnDef::new(Invitation::Accepted).boolean().not_null().default(false))
                .col(ColumnDef::new(Invitation::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_invitations_role")
                        .from(Invitation::Table, Invitation::RoleId)
                        .to(Role::Table, Role::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_invitations_organization")
                        .from(Invitation::Table, Invitation::OrganizationId)
                        .to(Organization::Table, Organization::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // listing reads "latest per email" inside one organization
        m.create_index(
            Index::create()
                .name("idx_invitations_org_email_created")
                .table(Invitation::Table)
                .col(Invitation::OrganizationId)
                .col(Invitation::Email)
                .col(Invitation::CreatedAt)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Invitation::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Invitation {
    #[sea_orm(iden = "invitations")]
    Table,
    Id,
    Token,
    SenderEmail,
    Email,
    RoleId,
    OrganizationId,
    Accepted,
    CreatedAt,
}
