use async_trait::async_trait;
use onboard_api::config::{DbConfig, EnvConfig, IdentityConfig, MailConfig};
use onboard_api::db::service::DbService;
use onboard_api::types::mail::SendEmail;
use onboard_api::utils::mail::{MailError, Mailer};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

pub mod client;

pub const PUBLIC_KEY: &str = include_str!("../fixtures/identity_public.pem");
pub const PRIVATE_KEY: &str = include_str!("../fixtures/identity_private.pem");
pub const FOREIGN_KEY: &str = include_str!("../fixtures/foreign_private.pem");

/// Keeps every message instead of sending it. `failing` simulates a provider outage,
/// `delay` a provider that is slow to answer.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SendEmail>>,
    pub failing: bool,
    pub delay: Option<Duration>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SendEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: SendEmail) -> Result<(), MailError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(MailError::Rejected {
                status: 503,
                body: "provider unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

pub struct TestContext {
    pub db: Arc<DbService>,
    pub mailer: Arc<RecordingMailer>,
    pub config: EnvConfig,
    pub _container: Option<ContainerAsync<Postgres>>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        Self::with_mailer(RecordingMailer::default()).await
    }

    #[allow(dead_code)]
    pub async fn with_failing_mailer() -> TestContext {
        Self::with_mailer(RecordingMailer {
            failing: true,
            ..Default::default()
        })
        .await
    }

    #[allow(dead_code)]
    pub async fn with_slow_mailer(delay: Duration) -> TestContext {
        Self::with_mailer(RecordingMailer {
            delay: Some(delay),
            ..Default::default()
        })
        .await
    }

    /// Same schema on a throwaway Postgres container. Needs a Docker daemon.
    #[allow(dead_code)]
    pub async fn postgres() -> TestContext {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");

        let mut config = get_test_config();
        config.db.url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);
        config.db.max_connections = 5;

        let mut ctx = Self::connect(config, RecordingMailer::default()).await;
        ctx._container = Some(container);
        ctx
    }

    async fn with_mailer(mailer: RecordingMailer) -> TestContext {
        Self::connect(get_test_config(), mailer).await
    }

    async fn connect(config: EnvConfig, mailer: RecordingMailer) -> TestContext {
        let db = Arc::new(
            DbService::connect(&config.db)
                .await
                .expect("Failed to initialize DbService"),
        );

        TestContext {
            db,
            mailer: Arc::new(mailer),
            config,
            _container: None,
        }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db: DbConfig {
            // one connection, otherwise every checkout opens a fresh empty database
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        },
        identity: IdentityConfig {
            public_key_pem: PUBLIC_KEY.to_string(),
        },
        mail: MailConfig {
            api_key: "test".to_string(),
            endpoint: "http://localhost/unused".to_string(),
            sender: "invites@example.com".to_string(),
        },
        client_url: "https://app.example.com".to_string(),
        request_timeout: Duration::from_secs(15),
    }
}
