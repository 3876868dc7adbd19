//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use backend::outbound::smtp::SmtpProbeConfig;
use backend::settings::AppSettings;

/// How email addresses are checked beyond their syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailChecks {
    /// Accept every domain and skip the mailbox probe.
    SyntaxOnly,
    /// Resolve MX records, optionally probing the mailbox afterwards.
    Network {
        dns_timeout: Duration,
        probe: Option<SmtpProbeConfig>,
    },
}

/// Configuration consumed by [`super::create_server`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) email_checks: EmailChecks,
}

impl ServerConfig {
    /// Construct a configuration with full network email checks.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            email_checks: EmailChecks::Network {
                dns_timeout: Duration::from_secs(3),
                probe: Some(SmtpProbeConfig::default()),
            },
        }
    }

    /// Replace the email check policy.
    #[must_use]
    pub fn with_email_checks(mut self, email_checks: EmailChecks) -> Self {
        self.email_checks = email_checks;
        self
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl From<&AppSettings> for ServerConfig {
    fn from(settings: &AppSettings) -> Self {
        let email_checks = if settings.verify_email_domains() {
            EmailChecks::Network {
                dns_timeout: settings.dns_timeout(),
                probe: settings.smtp_probe().then(|| SmtpProbeConfig {
                    port: settings.smtp_port(),
                    helo_name: settings.helo_name().to_owned(),
                    sender: settings.probe_sender().to_owned(),
                    timeout: settings.smtp_timeout(),
                }),
            }
        } else {
            EmailChecks::SyntaxOnly
        };
        Self::new(settings.bind_addr()).with_email_checks(email_checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings(verify: Option<bool>, probe: Option<bool>) -> AppSettings {
        AppSettings {
            host: None,
            port: Some(9000),
            verify_email_domains: verify,
            smtp_probe: probe,
            smtp_port: Some(2525),
            smtp_timeout_ms: Some(100),
            dns_timeout_ms: None,
            probe_sender: None,
            helo_name: None,
        }
    }

    #[rstest]
    fn disabled_domain_checks_skip_the_network() {
        let config = ServerConfig::from(&settings(Some(false), Some(true)));
        assert_eq!(config.email_checks, EmailChecks::SyntaxOnly);
        assert_eq!(config.bind_addr().port(), 9000);
    }

    #[rstest]
    fn probe_settings_are_carried() {
        let config = ServerConfig::from(&settings(None, None));
        let EmailChecks::Network { dns_timeout, probe } = config.email_checks else {
            panic!("expected network checks");
        };
        assert_eq!(dns_timeout, Duration::from_secs(3));
        let probe = probe.expect("probe enabled by default");
        assert_eq!(probe.port, 2525);
        assert_eq!(probe.timeout, Duration::from_millis(100));
        assert_eq!(probe.sender, "me@domain.com");
    }

    #[rstest]
    fn probe_can_be_disabled_alone() {
        let config = ServerConfig::from(&settings(Some(true), Some(false)));
        assert!(matches!(
            config.email_checks,
            EmailChecks::Network { probe: None, .. }
        ));
    }
}
