use std::sync::Arc;

use orion_bot::config::{BotConfig, MailConfig};
use orion_bot::escalation::{EscalationTracker, Notifier};
use orion_bot::lookup::LookupClient;
use orion_bot::nlu::NluEngine;
use orion_bot::notify::{EmailNotifier, LogNotifier};
use orion_bot::pipeline::MessageProcessor;
use orion_bot::server;
use orion_bot::strategies::StrategyRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BotConfig::from_env();

    eprintln!("🛰  ORION bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/process", config.port);
    eprintln!("   API: http://0.0.0.0:{}/execute", config.port);
    eprintln!("   Lookups: {}", config.integrations_url);
    eprintln!("   Escalation threshold: {}", config.escalation_threshold);

    let notifier: Arc<dyn Notifier> = match MailConfig::from_env() {
        Some(mail) => {
            eprintln!("   Escalation mail: enabled ({} → {})\n", mail.server, mail.to_address);
            Arc::new(EmailNotifier::new(mail))
        }
        None => {
            eprintln!("   Escalation mail: disabled (MAIL_USERNAME/MAIL_PASSWORD not set)\n");
            Arc::new(LogNotifier)
        }
    };

    let lookup = Arc::new(LookupClient::new(
        &config.integrations_url,
        config.lookup_timeout,
    ));
    let escalation = Arc::new(EscalationTracker::new(
        config.escalation_threshold,
        notifier,
    ));
    let processor = Arc::new(MessageProcessor::new(
        NluEngine::new(),
        StrategyRegistry::with_defaults(lookup),
        escalation,
    ));

    let app = server::router(processor);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "HTTP server started");
    axum::serve(listener, app).await?;

    Ok(())
}
