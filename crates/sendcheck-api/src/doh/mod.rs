// DNS-over-HTTPS (JSON API) client and wire models.

mod client;
mod models;

pub use client::{DohClient, DEFAULT_ENDPOINT};
pub use models::{DnsAnswer, DnsResponse, QueryKind, rcode};
