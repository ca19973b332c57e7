use crate::db::service::DbService;
use crate::types::error::AppError;
use chrono::Utc;
use entity::organization::{
    ActiveModel as OrganizationActive, Column, Entity as Organization, Model as OrganizationModel,
};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr};
use tracing::info;

impl DbService {
    /// Lookup ignoring case on both sides, matching the `LOWER(name)` unique index.
    pub async fn find_organization_by_name<C: ConnectionTrait>(
        conn: &C,
        name: &str,
    ) -> Result<Option<OrganizationModel>, AppError> {
        Ok(Organization::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(Column::Name)))
                    .eq(Func::lower(Expr::val(name.trim()))),
            )
            .one(conn)
            .await?)
    }

    /// Insert a new organization. Losing a race against a concurrent insert of the
    /// same name (in any case) reports `OrganizationAlreadyExists`.
    pub async fn insert_organization<C: ConnectionTrait>(
        conn: &C,
        name: &str,
    ) -> Result<OrganizationModel, AppError> {
        let active = OrganizationActive {
            name: Set(name.trim().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match active.insert(conn).await {
            Ok(org) => {
                info!(organization_id = org.id, "organization created");
                Ok(org)
            }
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::OrganizationAlreadyExists),
                _ => Err(err.into()),
            },
        }
    }
}
