//! Escalation alert delivery over SMTP, with a log-only fallback for
//! deployments without mail credentials.

use async_trait::async_trait;
use chrono::Utc;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{error, info, warn};

use crate::config::MailConfig;
use crate::error::NotifyError;
use crate::escalation::Notifier;

/// Sends escalation alerts to the support inbox via STARTTLS SMTP.
pub struct EmailNotifier {
    config: MailConfig,
}

impl EmailNotifier {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn send_blocking(
        config: &MailConfig,
        user_id: &str,
        last_message: &str,
        failed_attempts: u32,
    ) -> Result<(), NotifyError> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let body = format!(
            "Se requiere intervención humana.\n\
             \n\
             Usuario: {user_id}\n\
             Intentos fallidos consecutivos: {failed_attempts}\n\
             Último mensaje: {last_message}\n\
             Fecha: {timestamp}\n\
             \n\
             El bot no pudo interpretar los mensajes del usuario. \
             Por favor, contactarlo a la brevedad.\n"
        );

        let email = Message::builder()
            .from(
                config
                    .from_address
                    .parse()
                    .map_err(|_| NotifyError::InvalidAddress(config.from_address.clone()))?,
            )
            .to(config
                .to_address
                .parse()
                .map_err(|_| NotifyError::InvalidAddress(config.to_address.clone()))?)
            .subject(format!(
                "{} Escalación a humano requerida - Usuario: {user_id}",
                config.subject_prefix
            ))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        let transport = SmtpTransport::starttls_relay(&config.server)
            .map_err(|e| NotifyError::Smtp(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        transport
            .send(&email)
            .map_err(|e| NotifyError::Smtp(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, user_id: &str, last_message: &str, failed_attempts: u32) -> bool {
        // lettre's SmtpTransport is blocking, so hand it to the blocking pool.
        let config = self.config.clone();
        let user = user_id.to_string();
        let message = last_message.to_string();
        let result = tokio::task::spawn_blocking(move || {
            Self::send_blocking(&config, &user, &message, failed_attempts)
        })
        .await;

        match result {
            Ok(Ok(())) => {
                info!(user = user_id, "escalation email sent");
                true
            }
            Ok(Err(e)) => {
                error!(user = user_id, error = %e, "failed to send escalation email");
                false
            }
            Err(e) => {
                error!(user = user_id, error = %e, "escalation email task panicked");
                false
            }
        }
    }
}

/// Fallback notifier used when no SMTP credentials are configured. Logs
/// the escalation loudly and reports it as delivered so the tracker does
/// not treat every escalation as a delivery failure.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, user_id: &str, last_message: &str, failed_attempts: u32) -> bool {
        warn!(
            user = user_id,
            failed_attempts,
            last_message,
            "ESCALACIÓN REQUERIDA (sin SMTP configurado, solo registro)"
        );
        true
    }
}
