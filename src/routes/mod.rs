use crate::utils::webutils::json_config;
use actix_web::web;

pub mod directory;
pub mod health;
pub mod invite;
pub mod user;
pub mod webhook;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").service(health::health));

    // literal prefixes first so `/{external_id}/onboarding` never shadows them
    cfg.service(
        web::scope("/api/users")
            .app_data(json_config())
            .service(webhook::webhook)
            .service(invite::register::invitation_detail)
            .service(invite::register::accept)
            .service(invite::create::invite)
            .service(invite::list::invitations)
            .service(directory::managers::managers)
            .service(directory::employees::employees)
            .service(user::info::user_info)
            .service(user::onboarding::onboarding),
    );
}
