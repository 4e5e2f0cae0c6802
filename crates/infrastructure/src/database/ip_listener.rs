use async_trait::async_trait;
use blmonitor_application::ports::IpEventSource;
use blmonitor_domain::DomainError;
use sqlx::postgres::{PgListener, PgPool};
use tracing::{error, info};

/// `LISTEN`-based feed of newly inserted monitored IPs.
///
/// The listener holds its own connection. A dropped connection ends the
/// subscription instead of silently reconnecting, since notifications sent
/// while disconnected are lost.
pub struct PgIpEventSource {
    listener: PgListener,
    channel: String,
}

impl PgIpEventSource {
    pub async fn connect(pool: &PgPool, channel: &str) -> Result<Self, DomainError> {
        let mut listener = PgListener::connect_with(pool).await.map_err(|e| {
            error!(error = %e, "Failed to open notification connection");
            DomainError::SubscriptionLost(e.to_string())
        })?;

        listener.listen(channel).await.map_err(|e| {
            error!(error = %e, channel, "Failed to LISTEN");
            DomainError::SubscriptionLost(e.to_string())
        })?;

        info!(channel, "Listening for new IP notifications");

        Ok(Self {
            listener,
            channel: channel.to_string(),
        })
    }
}

#[async_trait]
impl IpEventSource for PgIpEventSource {
    async fn recv(&mut self) -> Result<String, DomainError> {
        match self.listener.try_recv().await {
            Ok(Some(notification)) => Ok(notification.payload().to_string()),
            Ok(None) => Err(DomainError::SubscriptionLost(format!(
                "connection for channel '{}' closed",
                self.channel
            ))),
            Err(e) => Err(DomainError::SubscriptionLost(e.to_string())),
        }
    }
}
