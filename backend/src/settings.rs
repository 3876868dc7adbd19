//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LENDING_*` environment variables, and
//! configuration files, with the defaults below when nothing is set.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SMTP_PORT: u16 = 25;
const DEFAULT_SMTP_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_DNS_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_PROBE_SENDER: &str = "me@domain.com";
const DEFAULT_HELO_NAME: &str = "localhost";

/// Runtime settings for the lending service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LENDING")]
pub struct AppSettings {
    /// Address to bind the HTTP listener to.
    pub host: Option<IpAddr>,
    /// Port to bind the HTTP listener to.
    pub port: Option<u16>,
    /// Resolve MX records for email domains. When off every domain is
    /// accepted.
    pub verify_email_domains: Option<bool>,
    /// Probe the mail exchanger with `RCPT TO` after resolution.
    pub smtp_probe: Option<bool>,
    /// Port the mailbox probe connects to.
    pub smtp_port: Option<u16>,
    /// Upper bound on one whole SMTP dialogue, in milliseconds.
    pub smtp_timeout_ms: Option<u64>,
    /// Upper bound on one MX lookup, in milliseconds.
    pub dns_timeout_ms: Option<u64>,
    /// Envelope sender used in `MAIL FROM`.
    pub probe_sender: Option<String>,
    /// Name announced in `HELO`.
    pub helo_name: Option<String>,
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    pub fn verify_email_domains(&self) -> bool {
        self.verify_email_domains.unwrap_or(true)
    }

    pub fn smtp_probe(&self) -> bool {
        self.smtp_probe.unwrap_or(true)
    }

    pub fn smtp_port(&self) -> u16 {
        self.smtp_port.unwrap_or(DEFAULT_SMTP_PORT)
    }

    pub fn smtp_timeout(&self) -> Duration {
        Duration::from_millis(self.smtp_timeout_ms.unwrap_or(DEFAULT_SMTP_TIMEOUT_MS))
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms.unwrap_or(DEFAULT_DNS_TIMEOUT_MS))
    }

    pub fn probe_sender(&self) -> &str {
        self.probe_sender.as_deref().unwrap_or(DEFAULT_PROBE_SENDER)
    }

    pub fn helo_name(&self) -> &str {
        self.helo_name.as_deref().unwrap_or(DEFAULT_HELO_NAME)
    }
}
