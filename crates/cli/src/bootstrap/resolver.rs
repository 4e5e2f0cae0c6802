use blmonitor_domain::config::DnsConfig;
use blmonitor_infrastructure::system::ResolvConfReader;
use std::net::SocketAddr;
use tracing::info;

/// The configured resolver, or the first nameserver of the host.
pub async fn resolve_dns_server(cfg: &DnsConfig) -> anyhow::Result<SocketAddr> {
    if let Some(server) = &cfg.server {
        let addr: SocketAddr = server.parse()?;
        info!(resolver = %addr, source = "config", "DNS resolver selected");
        return Ok(addr);
    }

    let addr = ResolvConfReader::new().default_nameserver().await?;
    info!(resolver = %addr, source = "resolv.conf", "DNS resolver selected");
    Ok(addr)
}
