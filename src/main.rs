use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use onboard_api::config::EnvConfig;
use onboard_api::db::service::DbService;
use onboard_api::routes::configure_routes;
use onboard_api::utils::identity::IdentityVerifier;
use onboard_api::utils::mail::{Mailer, ResendMailer};
use onboard_api::utils::webutils::request_timeout;
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = EnvConfig::from_env().map_err(io::Error::other)?;
    init_tracing();

    let db = Arc::new(DbService::connect(&config.db).await.map_err(io::Error::other)?);
    let verifier =
        IdentityVerifier::from_rsa_pem(&config.identity.public_key_pem).map_err(io::Error::other)?;
    let mailer: Arc<dyn Mailer> = Arc::new(ResendMailer::new(&config.mail).map_err(io::Error::other)?);

    let addr = format!("0.0.0.0:{}", config.port);
    info!(%addr, "Starting server");

    let config = web::Data::new(config);
    let verifier = web::Data::new(verifier);
    let mailer = web::Data::from(mailer);

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(request_timeout))
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&db)))
            .app_data(config.clone())
            .app_data(verifier.clone())
            .app_data(mailer.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
