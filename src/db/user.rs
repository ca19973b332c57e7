use crate::db::service::DbService;
use crate::types::{
    error::AppError,
    identity::CallerContext,
    user::{DBUserCreate, UserInfo},
};
use chrono::Utc;
use entity::organization::{self, Model as OrganizationModel};
use entity::role::{self, Entity as Role};
use entity::user::{self, ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::info;

impl DbService {
    /// Webhook provisioning. Inserts unconditionally: a replayed event creates a second row.
    pub async fn provision_from_webhook(&self, payload: DBUserCreate) -> Result<UserModel, AppError> {
        let now = Utc::now();

        let created = UserActive {
            external_id: Set(Some(payload.external_id)),
            first_name: Set(payload.first_name),
            last_name: Set(payload.last_name),
            email: Set(payload.email),
            role_id: Set(None),
            organization_id: Set(None),
            manager_id: Set(None),
            onboarded: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?;

        Ok(created)
    }

    pub async fn get_user_info(&self, external_id: &str) -> Result<UserInfo, AppError> {
        User::find()
            .select_only()
            .column_as(Column::Id, "user_id")
            .column_as(Column::ExternalId, "external_id")
            .column_as(role::Column::Name, "role")
            .column_as(Column::FirstName, "first_name")
            .column_as(Column::LastName, "last_name")
            .column_as(organization::Column::Name, "organization")
            .column_as(Column::OrganizationId, "organization_id")
            .column_as(Column::Onboarded, "onboarded")
            .join(JoinType::LeftJoin, user::Relation::Role.def())
            .join(JoinType::LeftJoin, user::Relation::Organization.def())
            .filter(Column::ExternalId.eq(external_id))
            .order_by_asc(Column::Id)
            .into_model::<UserInfo>()
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::NotFound("user"))
    }

    /// Request identity for a verified subject. Unknown subjects get an empty context.
    pub async fn caller_context(&self, external_id: &str) -> Result<CallerContext, AppError> {
        let found = User::find()
            .filter(Column::ExternalId.eq(external_id))
            .order_by_asc(Column::Id)
            .find_also_related(Role)
            .one(&self.database_connection)
            .await?;

        Ok(match found {
            Some((user, role)) => CallerContext {
                external_id: external_id.to_string(),
                user_id: Some(user.id),
                role: role.map(|r| r.name),
                role_id: user.role_id,
                organization_id: user.organization_id,
                email: Some(user.email),
            },
            None => CallerContext::anonymous(external_id),
        })
    }

    /// Assign a role and finish onboarding, optionally founding a new organization.
    ///
    /// Founding runs in one transaction with the user update, so a failure never
    /// leaves an organization without its founder. Returns the organization when
    /// one was created.
    pub async fn onboard(
        &self,
        external_id: &str,
        role_id: i32,
        organization_name: Option<&str>,
    ) -> Result<Option<OrganizationModel>, AppError> {
        let organization_name = organization_name.map(str::trim).filter(|n| !n.is_empty());
        let txn = self.database_connection.begin().await?;

        match Self::onboard_in(&txn, external_id, role_id, organization_name).await {
            Ok(created) => {
                txn.commit().await?;
                Ok(created)
            }
            Err(err) => {
                Self::rollback(txn).await;
                Err(err)
            }
        }
    }

    async fn onboard_in(
        txn: &DatabaseTransaction,
        external_id: &str,
        role_id: i32,
        organization_name: Option<&str>,
    ) -> Result<Option<OrganizationModel>, AppError> {
        let user = User::find()
            .filter(Column::ExternalId.eq(external_id))
            .order_by_asc(Column::Id)
            .one(txn)
            .await?
            .ok_or(AppError::NotFound("user"))?;

        if Role::find_by_id(role_id).one(txn).await?.is_none() {
            return Err(AppError::Validation(format!("Unknown role {role_id}")));
        }

        let created = match organization_name {
            None => None,
            Some(name) => {
                // Joining an existing organization goes through invitations, not onboarding.
                if Self::find_organization_by_name(txn, name).await?.is_some() {
                    return Err(AppError::OrganizationAlreadyExists);
                }
                Some(Self::insert_organization(txn, name).await?)
            }
        };

        let user_id = user.id;
        let mut am: UserActive = user.into();
        am.role_id = Set(Some(role_id));
        if let Some(org) = &created {
            am.organization_id = Set(Some(org.id));
        }
        am.onboarded = Set(true);
        am.updated_at = Set(Utc::now());
        am.update(txn).await?;

        info!(
            user_id,
            role_id,
            organization_id = created.as_ref().map(|o| o.id),
            "user onboarded"
        );
        Ok(created)
    }
}
