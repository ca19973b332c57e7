use crate::db::service::DbService;
use crate::types::{
    error::AppError,
    identity::ADMIN,
    invitation::{InvitationDetail, InvitationListItem, NewInvitation},
};
use crate::utils::token;
use chrono::Utc;
use entity::invitation::{
    self, ActiveModel as InvitationActive, Column, Entity as Invitation, Model as InvitationModel,
};
use entity::user::{self, Entity as User};
use entity::{organization, role};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, SqlErr, TransactionTrait,
};
use std::collections::HashSet;
use tracing::{info, warn};

/// Fresh tokens to try before giving up on a run of collisions.
pub const MAX_TOKEN_ATTEMPTS: usize = 5;

impl DbService {
    /// True when some account with this email already belongs to an organization.
    pub async fn email_in_organization(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::OrganizationId.is_not_null())
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn create_invitation(&self, new: NewInvitation) -> Result<InvitationModel, AppError> {
        self.create_invitation_with(new, token::new_invite_token).await
    }

    /// Issue an invitation using `next_token` for token material.
    ///
    /// No de-duplication happens here: inviting the same email twice stores two rows.
    pub async fn create_invitation_with<F>(
        &self,
        new: NewInvitation,
        mut next_token: F,
    ) -> Result<InvitationModel, AppError>
    where
        F: FnMut() -> String,
    {
        if self.email_in_organization(&new.email).await? {
            return Err(AppError::AlreadyInOrganization);
        }

        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let active = InvitationActive {
                token: Set(next_token()),
                sender_email: Set(new.sender_email.clone()),
                email: Set(new.email.clone()),
                role_id: Set(new.role_id),
                organization_id: Set(new.organization_id),
                accepted: Set(false),
                created_at: Set(Utc::now()),
                ..Default::default()
            };

            match active.insert(&self.database_connection).await {
                Ok(inv) => return Ok(inv),
                Err(err) => match err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        warn!(attempt, "invitation token collision, regenerating");
                    }
                    Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                        return Err(AppError::Validation("Related record missing".to_string()))
                    }
                    _ => return Err(err.into()),
                },
            }
        }

        Err(AppError::Conflict(
            "Could not allocate a unique invitation token".to_string(),
        ))
    }

    pub async fn get_invitation_detail(&self, token: &str) -> Result<InvitationDetail, AppError> {
        Invitation::find()
            .select_only()
            .column_as(Column::Id, "invitation_id")
            .column_as(Column::Token, "token")
            .column_as(organization::Column::Id, "organization_id")
            .column_as(organization::Column::Name, "organization_name")
            .column_as(role::Column::Id, "role_id")
            .column_as(role::Column::Name, "role_name")
            .join(JoinType::LeftJoin, invitation::Relation::Organization.def())
            .join(JoinType::LeftJoin, invitation::Relation::Role.def())
            .filter(Column::Token.eq(token))
            .into_model::<InvitationDetail>()
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::NotFound("invitation"))
    }

    /// Redeem a token: the invited role and organization land on whichever account
    /// holds the invited email, and the invitation is consumed. All or nothing.
    pub async fn accept_invitation(&self, token: &str) -> Result<InvitationModel, AppError> {
        let txn = self.database_connection.begin().await?;

        match Self::accept_in(&txn, token).await {
            Ok(inv) => {
                txn.commit().await?;
                info!(
                    invitation_id = inv.id,
                    organization_id = inv.organization_id,
                    "invitation accepted"
                );
                Ok(inv)
            }
            Err(err) => {
                Self::rollback(txn).await;
                Err(err)
            }
        }
    }

    async fn accept_in(txn: &DatabaseTransaction, token: &str) -> Result<InvitationModel, AppError> {
        let inv = Invitation::find()
            .filter(Column::Token.eq(token))
            .one(txn)
            .await?
            .ok_or(AppError::NotFound("invitation"))?;

        // a concurrent redemption that committed first leaves nothing to delete
        let deleted = Invitation::delete_by_id(inv.id).exec(txn).await?;
        if deleted.rows_affected != 1 {
            return Err(AppError::NotFound("invitation"));
        }

        let updated = User::update_many()
            .col_expr(user::Column::OrganizationId, Expr::value(inv.organization_id))
            .col_expr(user::Column::RoleId, Expr::value(inv.role_id))
            .col_expr(user::Column::Onboarded, Expr::value(true))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Email.eq(inv.email.as_str()))
            .exec(txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(AppError::NotFound("account for invited email"));
        }

        Ok(InvitationModel { accepted: true, ..inv })
    }

    /// Latest invitation per recipient in the organization, newest first.
    /// Admins see every sender's invitations, everyone else only their own.
    pub async fn list_invitations_for_caller(
        &self,
        organization_id: i32,
        caller_role: &str,
        caller_email: &str,
    ) -> Result<Vec<InvitationListItem>, AppError> {
        let rows = Invitation::find()
            .select_only()
            .column_as(Column::Id, "invitation_id")
            .column_as(Column::Email, "email")
            .column_as(Column::SenderEmail, "sender_email")
            .column_as(role::Column::Name, "role")
            .column_as(organization::Column::Name, "organization")
            .column_as(Column::CreatedAt, "created_at")
            .join(JoinType::LeftJoin, invitation::Relation::Role.def())
            .join(JoinType::LeftJoin, invitation::Relation::Organization.def())
            .filter(Column::OrganizationId.eq(organization_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .into_model::<InvitationListItem>()
            .all(&self.database_connection)
            .await?;

        let sees_everything = caller_role == ADMIN;
        Ok(latest_per_email(rows)
            .into_iter()
            .filter(|inv| sees_everything || inv.sender_email == caller_email)
            .collect())
    }
}

/// Keeps the first row seen for each email. Input must be ordered newest first.
pub fn latest_per_email(rows: Vec<InvitationListItem>) -> Vec<InvitationListItem> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|inv| seen.insert(inv.email.clone()))
        .collect()
}
