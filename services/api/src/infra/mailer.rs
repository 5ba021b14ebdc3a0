use anyhow::Context as _;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use ritmofit_domain::otp::OtpPurpose;

use crate::config::ApiConfig;
use crate::domain::repository::Mailer;

/// SMTP mailer. Without `SMTP_HOST` it only logs that a message was skipped.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let from = config
            .smtp_from
            .parse::<Mailbox>()
            .context("parse SMTP_FROM")?;

        let Some(host) = config.smtp_host.as_deref() else {
            tracing::warn!("SMTP_HOST not set; outgoing email disabled");
            return Ok(Self {
                transport: None,
                from,
            });
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .context("build SMTP transport")?
            .port(config.smtp_port);
        if let (Some(user), Some(password)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Self {
            transport: Some(builder.build()),
            from,
        })
    }
}

fn otp_body(purpose: OtpPurpose, code: &str) -> String {
    let action = match purpose {
        OtpPurpose::Login => "iniciar sesión",
        OtpPurpose::Register => "confirmar tu cuenta",
        OtpPurpose::Reset => "restablecer tu contraseña",
        OtpPurpose::Delete => "confirmar la baja de tu cuenta",
    };
    format!(
        "Tu código para {action} es: {code}\n\nVence en 15 minutos. Si no lo pediste, ignorá este mensaje."
    )
}

impl Mailer for SmtpMailer {
    async fn send_otp(&self, to: &str, purpose: OtpPurpose, code: &str) -> anyhow::Result<()> {
        let Some(transport) = &self.transport else {
            tracing::info!(to, purpose = %purpose, "email disabled, code not sent");
            return Ok(());
        };

        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>().context("parse recipient address")?)
            .subject(purpose.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(otp_body(purpose, code))
            .context("build email")?;

        transport.send(message).await.context("send email")?;
        tracing::info!(to, purpose = %purpose, "otp email sent");
        Ok(())
    }
}
