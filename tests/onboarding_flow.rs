use actix_web::{http::StatusCode, test};
use entity::organization::Entity as Organization;
use onboard_api::db::service::DbService;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

mod common;
use common::{client::TestClient, TestContext};

async fn organization_count(ctx: &TestContext) -> u64 {
    Organization::find().count(ctx.db.connection()).await.unwrap()
}

async fn role_id(ctx: &TestContext, name: &str) -> i32 {
    ctx.db.role_by_name(name).await.unwrap().unwrap().id
}

#[actix_web::test]
async fn test_onboarding_without_organization() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    client.create_test_user("user_1", "one@example.com").await;
    let employee = role_id(&ctx, "employee").await;

    let req = test::TestRequest::post()
        .uri("/api/users/user_1/onboarding")
        .set_json(json!({ "role": employee }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User onboarding complete");

    let user = client.user_by_external_id("user_1").await.unwrap();
    assert!(user.onboarded);
    assert_eq!(user.role_id, Some(employee));
    assert_eq!(user.organization_id, None);
    assert_eq!(organization_count(&ctx).await, 0);
}

#[actix_web::test]
async fn test_blank_organization_name_is_ignored() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    client.create_test_user("user_1", "one@example.com").await;
    let admin = role_id(&ctx, "admin").await;

    let req = test::TestRequest::post()
        .uri("/api/users/user_1/onboarding")
        .set_json(json!({ "role": admin, "organization": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let user = client.user_by_external_id("user_1").await.unwrap();
    assert!(user.onboarded);
    assert_eq!(user.organization_id, None);
    assert_eq!(organization_count(&ctx).await, 0);
}

#[actix_web::test]
async fn test_onboarding_founds_organization() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    client.create_test_user("founder", "founder@example.com").await;
    let admin = role_id(&ctx, "admin").await;

    let req = test::TestRequest::post()
        .uri("/api/users/founder/onboarding")
        .set_json(json!({ "role": admin, "organization": "Acme" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let org = client.organization_by_name("acme").await.unwrap();
    assert_eq!(org.name, "Acme");
    assert_eq!(organization_count(&ctx).await, 1);

    let user = client.user_by_external_id("founder").await.unwrap();
    assert_eq!(user.organization_id, Some(org.id));
    assert_eq!(user.role_id, Some(admin));
    assert!(user.onboarded);
}

#[actix_web::test]
async fn test_organization_name_is_case_insensitive() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    client.create_test_user("first", "first@example.com").await;
    client.create_test_user("second", "second@example.com").await;
    let admin = role_id(&ctx, "admin").await;

    let req = test::TestRequest::post()
        .uri("/api/users/first/onboarding")
        .set_json(json!({ "role": admin, "organization": "Acme" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/users/second/onboarding")
        .set_json(json!({ "role": admin, "organization": "ACME" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ORGANIZATION_ALREADY_EXISTS");

    assert_eq!(organization_count(&ctx).await, 1);
    let second = client.user_by_external_id("second").await.unwrap();
    assert!(!second.onboarded);
    assert_eq!(second.organization_id, None);
    assert_eq!(second.role_id, None);
}

#[actix_web::test]
async fn test_racing_insert_reports_existing_organization() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);

    client.create_organization("Globex").await;
    let err = DbService::insert_organization(ctx.db.connection(), "globex")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "ORGANIZATION_ALREADY_EXISTS");
    assert_eq!(organization_count(&ctx).await, 1);
}

#[actix_web::test]
async fn test_onboarding_unknown_user() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let admin = role_id(&ctx, "admin").await;
    let req = test::TestRequest::post()
        .uri("/api/users/nobody/onboarding")
        .set_json(json!({ "role": admin, "organization": "Ghost Inc" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // nothing is founded for an account that does not exist
    assert_eq!(organization_count(&ctx).await, 0);
}

#[actix_web::test]
async fn test_onboarding_requires_known_role() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    client.create_test_user("user_1", "one@example.com").await;

    let req = test::TestRequest::post()
        .uri("/api/users/user_1/onboarding")
        .set_json(json!({ "organization": "Acme" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/users/user_1/onboarding")
        .set_json(json!({ "role": 999, "organization": "Acme" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(organization_count(&ctx).await, 0);
}

#[actix_web::test]
async fn test_user_info_projection() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let org = client.create_organization("Initech").await;
    let member = client
        .create_member("member", "member@example.com", "manager", &org, None)
        .await;

    let req = test::TestRequest::get()
        .uri("/api/users/user/member")
        .insert_header(("Authorization", format!("Bearer {}", client.token_for("member"))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["userId"], member.id);
    assert_eq!(body["externalId"], "member");
    assert_eq!(body["role"], "manager");
    assert_eq!(body["organization"], "Initech");
    assert_eq!(body["organizationId"], org.id);
    assert_eq!(body["onboarded"], true);
}

#[actix_web::test]
async fn test_user_info_for_pending_user_has_nulls() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    client.create_test_user("pending", "pending@example.com").await;

    let req = test::TestRequest::get()
        .uri("/api/users/user/pending")
        .cookie(actix_web::cookie::Cookie::new("__session", client.token_for("pending")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["role"].is_null());
    assert!(body["organization"].is_null());
    assert_eq!(body["onboarded"], false);
}

#[actix_web::test]
async fn test_user_info_unknown_user() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/users/user/ghost")
        .insert_header(("Authorization", format!("Bearer {}", client.token_for("ghost"))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
