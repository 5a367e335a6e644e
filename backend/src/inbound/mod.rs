//! Inbound adapters: protocol surfaces that call into the domain.

pub mod http;
