use blmonitor_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Number of records in the answer section, of any type.
    pub answer_count: usize,

    /// Fragments of the first TXT answer. Lists that return several TXT
    /// records (one per sub-list) are reported by the first one only.
    pub txt_fragments: Vec<String>,
}

impl DnsResponse {
    pub fn has_answers(&self) -> bool {
        self.answer_count > 0
    }

    /// The first TXT record's fragments joined without separators.
    pub fn txt(&self) -> String {
        self.txt_fragments.concat()
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail
                | ResponseCode::Refused
                | ResponseCode::NotImp
                | ResponseCode::FormErr
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let txt_fragments = message
            .answers()
            .iter()
            .find_map(|record| match record.data() {
                RData::TXT(txt) => Some(
                    txt.txt_data()
                        .iter()
                        .map(|fragment| String::from_utf8_lossy(fragment).into_owned())
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default();

        let response = DnsResponse {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            answer_count: message.answers().len(),
            txt_fragments,
        };

        debug!(
            rcode = ?response.rcode,
            answers = response.answer_count,
            truncated = response.truncated,
            "DNS response parsed"
        );

        Ok(response)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
