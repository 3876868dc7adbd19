//! DNS-backed mail exchange resolver.
//!
//! Uses the system resolver configuration when it can be read and falls back
//! to the library defaults otherwise. Lookups are bounded by the configured
//! timeout with a single attempt.

use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use tracing::{debug, warn};

use crate::domain::ports::{MailExchangeError, MailExchangeResolver};

/// Resolves MX records through `hickory-resolver`.
#[derive(Clone)]
pub struct DnsMailExchangeResolver {
    resolver: TokioAsyncResolver,
}

impl DnsMailExchangeResolver {
    /// Build a resolver whose lookups give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
            Ok(system) => system,
            Err(error) => {
                warn!(%error, "system resolver configuration unavailable; using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        opts.timeout = timeout;
        opts.attempts = 1;
        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

/// Pick the exchange with the lowest preference and drop the root label dot.
fn preferred_exchange<I>(records: I) -> Option<String>
where
    I: IntoIterator<Item = (u16, String)>,
{
    records
        .into_iter()
        .min_by_key(|(preference, _)| *preference)
        .map(|(_, exchange)| exchange.trim_end_matches('.').to_owned())
        .filter(|exchange| !exchange.is_empty())
}

#[async_trait]
impl MailExchangeResolver for DnsMailExchangeResolver {
    async fn resolve(&self, domain: &str) -> Result<String, MailExchangeError> {
        let lookup = self.resolver.mx_lookup(domain).await.map_err(|error| {
            if matches!(error.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                MailExchangeError::not_found(domain)
            } else {
                MailExchangeError::lookup(error.to_string())
            }
        })?;

        let records = lookup
            .iter()
            .map(|mx| (mx.preference(), mx.exchange().to_utf8()));
        let exchange =
            preferred_exchange(records).ok_or_else(|| MailExchangeError::not_found(domain))?;
        debug!(domain, exchange = %exchange, "mail exchange resolved");
        Ok(exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![(10, "mx1.example.com.".to_owned())], Some("mx1.example.com"))]
    #[case(
        vec![(20, "backup.example.com.".to_owned()), (5, "primary.example.com.".to_owned())],
        Some("primary.example.com")
    )]
    #[case(vec![(0, ".".to_owned())], None)]
    #[case(vec![], None)]
    fn lowest_preference_wins(
        #[case] records: Vec<(u16, String)>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(preferred_exchange(records).as_deref(), expected);
    }
}
