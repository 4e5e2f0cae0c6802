use ipnetwork::IpNetwork;
use std::net::IpAddr;
use std::sync::Arc;

/// Address range owned by a customer.
#[derive(Debug, Clone)]
pub struct CustomerRange {
    pub customer: Arc<str>,
    pub range: IpNetwork,
}

impl CustomerRange {
    pub fn new(customer: impl Into<Arc<str>>, range: IpNetwork) -> Self {
        Self {
            customer: customer.into(),
            range,
        }
    }

    pub fn parse(customer: impl Into<Arc<str>>, cidr: &str) -> Result<Self, String> {
        Self::validate_cidr(cidr)?;
        let range = cidr
            .parse::<IpNetwork>()
            .map_err(|e| format!("Invalid CIDR {}: {}", cidr, e))?;
        Ok(Self::new(customer, range))
    }

    pub fn validate_cidr(cidr: &str) -> Result<(), String> {
        if cidr.is_empty() {
            return Err("CIDR cannot be empty".to_string());
        }

        if !cidr.contains('/') {
            return Err("CIDR must include prefix (e.g., 192.168.1.0/24)".to_string());
        }

        Ok(())
    }

    /// Host ranges (`/32`, `/128`) contain their own address.
    pub fn contains(&self, ip: IpAddr) -> bool {
        self.range.contains(ip)
    }
}

/// Customers owning any of `ranges` that covers `ip`, without duplicates.
pub fn customers_covering(ranges: &[CustomerRange], ip: IpAddr) -> Vec<Arc<str>> {
    let mut customers: Vec<Arc<str>> = ranges
        .iter()
        .filter(|r| r.contains(ip))
        .map(|r| Arc::clone(&r.customer))
        .collect();
    customers.sort();
    customers.dedup();
    customers
}
