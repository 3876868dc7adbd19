//! Port for resolving the mail exchange that serves an email domain.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Lookup failures raised by mail exchange resolvers.
    pub enum MailExchangeError {
        /// The domain publishes no usable MX record.
        NotFound { domain: String } => "no mail exchange published for {domain}",
        /// The lookup itself failed (timeout, network, malformed reply).
        Lookup { message: String } => "mail exchange lookup failed: {message}",
    }
}

/// Resolves the preferred mail exchange host for a domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailExchangeResolver: Send + Sync {
    /// Return the exchange host name, without a trailing dot.
    async fn resolve(&self, domain: &str) -> Result<String, MailExchangeError>;
}

/// Offline resolver that treats every domain as served by `mx.<domain>`.
///
/// Used when DNS verification is switched off and in handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailExchangeResolver;

#[async_trait]
impl MailExchangeResolver for FixtureMailExchangeResolver {
    async fn resolve(&self, domain: &str) -> Result<String, MailExchangeError> {
        Ok(format!("mx.{domain}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_prefixes_domain() {
        let host = FixtureMailExchangeResolver
            .resolve("example.com")
            .await
            .expect("fixture resolves");
        assert_eq!(host, "mx.example.com");
    }
}
