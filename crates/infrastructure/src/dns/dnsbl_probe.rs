use super::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use super::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use blmonitor_application::ports::{BlocklistProbe, ProbeResult};
use blmonitor_domain::{DnsblQuery, DomainError};
use hickory_proto::rr::RecordType;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// DNSBL membership check against a single resolver.
///
/// An A answer of any kind means listed; the TXT answer only supplies the
/// reason text.
pub struct DnsblProbe {
    transport: Arc<dyn DnsTransport>,
    query_timeout: Duration,
    shutdown: CancellationToken,
}

impl DnsblProbe {
    pub fn new(server_addr: SocketAddr, query_timeout: Duration) -> Self {
        Self::with_transport(Arc::new(UdpTransport::new(server_addr)), query_timeout)
    }

    pub fn with_transport(transport: Arc<dyn DnsTransport>, query_timeout: Duration) -> Self {
        Self {
            transport,
            query_timeout,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    async fn exchange(&self, name: &str, record_type: RecordType) -> Result<DnsResponse, DomainError> {
        let (id, bytes) = MessageBuilder::build_query_with_id(name, record_type)?;

        let reply = tokio::select! {
            _ = self.shutdown.cancelled() => return Err(DomainError::Cancelled),
            reply = self.transport.send(&bytes, self.query_timeout) => reply?,
        };

        let response = ResponseParser::parse(&reply.bytes)?;
        if response.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response ID {} does not match query ID {} from {}",
                response.id,
                id,
                self.transport.server()
            )));
        }
        if response.truncated {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} returned a truncated answer for {} {}",
                self.transport.server(),
                record_type,
                name
            )));
        }
        if response.is_server_error() {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} answered {} for {} {}",
                self.transport.server(),
                ResponseParser::rcode_to_status(response.rcode),
                record_type,
                name
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl BlocklistProbe for DnsblProbe {
    #[instrument(skip(self), fields(server = %self.transport.server()))]
    async fn check(&self, ip: IpAddr, stem: &str) -> Result<ProbeResult, DomainError> {
        let query = DnsblQuery::new(ip, stem);

        let existence = self.exchange(&query.name, RecordType::A).await?;
        if !existence.has_answers() {
            debug!(name = %query.name, "No A answer, not listed");
            return Ok(ProbeResult::not_listed());
        }

        match self.exchange(&query.name, RecordType::TXT).await {
            Ok(text) => Ok(ProbeResult::listed(text.txt())),
            Err(DomainError::Cancelled) => Err(DomainError::Cancelled),
            Err(e) => Ok(ProbeResult::listed_without_reason(e.to_string())),
        }
    }
}
