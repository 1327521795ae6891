// sendcheck-api: Async DNS-over-HTTPS client (application/dns-json wire format)

pub mod doh;
pub mod error;
pub mod transport;

pub use doh::{DnsAnswer, DnsResponse, DohClient, QueryKind, DEFAULT_ENDPOINT};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
