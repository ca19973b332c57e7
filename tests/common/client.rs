use actix_web::middleware::from_fn;
use actix_web::{web, App};
use chrono::Utc;
use entity::invitation::{Column as InvitationColumn, Entity as Invitation, Model as InvitationModel};
use entity::organization::Model as OrganizationModel;
use entity::user::{ActiveModel as UserActive, Column as UserColumn, Entity as User, Model as UserModel};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use onboard_api::config::EnvConfig;
use onboard_api::db::service::DbService;
use onboard_api::types::identity::IdentityClaims;
use onboard_api::types::user::DBUserCreate;
use onboard_api::utils::identity::IdentityVerifier;
use onboard_api::utils::mail::Mailer;
use onboard_api::utils::webutils::request_timeout;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;

use super::{TestContext, FOREIGN_KEY, PRIVATE_KEY, PUBLIC_KEY};

pub struct TestClient {
    pub db: Arc<DbService>,
    pub mailer: Arc<dyn Mailer>,
    pub config: EnvConfig,
}

impl TestClient {
    pub fn new(ctx: &TestContext) -> Self {
        TestClient {
            db: Arc::clone(&ctx.db),
            mailer: ctx.mailer.clone(),
            config: ctx.config.clone(),
        }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let verifier = IdentityVerifier::from_rsa_pem(PUBLIC_KEY).expect("fixture key");

        App::new()
            .wrap(from_fn(request_timeout))
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(verifier))
            .app_data(web::Data::from(Arc::clone(&self.mailer)))
            .configure(onboard_api::routes::configure_routes)
    }

    /// Session token the identity provider would issue for `external_id`.
    pub fn token_for(&self, external_id: &str) -> String {
        sign(external_id, PRIVATE_KEY)
    }

    /// Well formed token signed by a key we do not trust.
    #[allow(dead_code)]
    pub fn foreign_token_for(&self, external_id: &str) -> String {
        sign(external_id, FOREIGN_KEY)
    }

    pub async fn create_test_user(&self, external_id: &str, email: &str) -> UserModel {
        self.db
            .provision_from_webhook(DBUserCreate {
                external_id: external_id.to_string(),
                email: email.to_string(),
                first_name: Some("Test".to_string()),
                last_name: Some(external_id.to_string()),
            })
            .await
            .expect("Failed to create user")
    }

    /// Onboarded user holding `role` inside `organization`.
    #[allow(dead_code)]
    pub async fn create_member(
        &self,
        external_id: &str,
        email: &str,
        role: &str,
        organization: &OrganizationModel,
        manager_id: Option<i32>,
    ) -> UserModel {
        let user = self.create_test_user(external_id, email).await;
        let role = self
            .db
            .role_by_name(role)
            .await
            .expect("role lookup")
            .expect("seeded role");

        let mut am: UserActive = user.into();
        am.role_id = Set(Some(role.id));
        am.organization_id = Set(Some(organization.id));
        am.manager_id = Set(manager_id);
        am.onboarded = Set(true);
        am.updated_at = Set(Utc::now());
        am.update(self.db.connection()).await.expect("Failed to update user")
    }

    #[allow(dead_code)]
    pub async fn create_organization(&self, name: &str) -> OrganizationModel {
        DbService::insert_organization(self.db.connection(), name)
            .await
            .expect("Failed to create organization")
    }

    #[allow(dead_code)]
    pub async fn organization_by_name(&self, name: &str) -> Option<OrganizationModel> {
        DbService::find_organization_by_name(self.db.connection(), name)
            .await
            .expect("organization lookup")
    }

    /// Oldest row for the subject, the one the service itself resolves.
    #[allow(dead_code)]
    pub async fn user_by_external_id(&self, external_id: &str) -> Option<UserModel> {
        User::find()
            .filter(UserColumn::ExternalId.eq(external_id))
            .order_by_asc(UserColumn::Id)
            .one(self.db.connection())
            .await
            .expect("user lookup")
    }

    #[allow(dead_code)]
    pub async fn users_by_email(&self, email: &str) -> Vec<UserModel> {
        User::find()
            .filter(UserColumn::Email.eq(email))
            .order_by_asc(UserColumn::Id)
            .all(self.db.connection())
            .await
            .expect("user lookup")
    }

    #[allow(dead_code)]
    pub async fn invitation_by_token(&self, token: &str) -> Option<InvitationModel> {
        Invitation::find()
            .filter(InvitationColumn::Token.eq(token))
            .one(self.db.connection())
            .await
            .expect("invitation lookup")
    }
}

fn sign(sub: &str, private_pem: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = IdentityClaims {
        sub: sub.to_string(),
        exp: now + 3600,
        iat: Some(now),
    };
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).expect("fixture key");
    encode(&Header::new(Algorithm::RS256), &claims, &key).expect("sign token")
}
