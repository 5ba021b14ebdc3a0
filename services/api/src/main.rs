use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use ritmofit_core::config::Config;
use ritmofit_core::tracing::init_tracing;

use ritmofit_api::config::ApiConfig;
use ritmofit_api::infra::mailer::SmtpMailer;
use ritmofit_api::infra::push::ExpoPushClient;
use ritmofit_api::reminder::spawn_reminder_loop;
use ritmofit_api::router::build_router;
use ritmofit_api::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env().expect("failed to load config");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = SmtpMailer::from_config(&config).expect("failed to configure mailer");
    let push = ExpoPushClient::new(&config.push_api_url).expect("failed to build push client");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
        token_ttl_secs: config.token_ttl_secs,
        utc_offset: config.utc_offset(),
        mailer,
        push,
    };

    // Reminder sweep
    spawn_reminder_loop(
        state.clone(),
        Duration::from_secs(config.reminder_interval_secs.max(1)),
    );
    info!(
        every_secs = config.reminder_interval_secs,
        "reminder sweep scheduled"
    );

    // HTTP server
    let router = build_router(state, config.cors_origin.as_deref());
    let http_addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("api listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
