//! Email address validation.
//!
//! Format and MX failures are hard errors. The recipient probe that follows
//! is best-effort: only an explicit rejection from the exchange fails
//! validation, while connection problems and timeouts are logged and ignored.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::ports::{
    MailExchangeResolver, MailboxProbe, MailboxProbeError, RecipientVerdict,
};

/// Default upper bound on a single recipient probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"(?i)^[_a-z0-9-]+(\.[_a-z0-9-]+)*@[a-z0-9-]+(\.[a-z0-9-]+)*(\.[a-z]{2,4})$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("The email address is badly formatted")]
    BadlyFormatted,
    #[error("The email service does not exist")]
    UnknownService,
    #[error("The email does not exist")]
    UnknownMailbox,
}

/// Check the address shape only. An empty address is accepted.
///
/// # Examples
/// ```
/// use backend::domain::{EmailError, validate_email_syntax};
///
/// assert!(validate_email_syntax("ada.lovelace@example.com").is_ok());
/// assert_eq!(validate_email_syntax("ada@"), Err(EmailError::BadlyFormatted));
/// ```
pub fn validate_email_syntax(raw: &str) -> Result<(), EmailError> {
    if raw.is_empty() || email_regex().is_match(raw) {
        Ok(())
    } else {
        Err(EmailError::BadlyFormatted)
    }
}

/// Verifies that an address is well formed, that its domain has a mail
/// exchange, and (best-effort) that the exchange accepts the mailbox.
#[derive(Clone)]
pub struct EmailVerifier {
    resolver: Arc<dyn MailExchangeResolver>,
    probe: Arc<dyn MailboxProbe>,
    probe_timeout: Duration,
}

impl EmailVerifier {
    /// Build a verifier with [`DEFAULT_PROBE_TIMEOUT`].
    pub fn new(resolver: Arc<dyn MailExchangeResolver>, probe: Arc<dyn MailboxProbe>) -> Self {
        Self {
            resolver,
            probe,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Override the bound on the recipient probe.
    #[must_use]
    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    /// Validate `raw`. An empty address is accepted without any lookups.
    pub async fn verify(&self, raw: &str) -> Result<(), EmailError> {
        if raw.is_empty() {
            return Ok(());
        }
        validate_email_syntax(raw)?;

        // The regex admits exactly one `@`.
        let Some((_, domain)) = raw.split_once('@') else {
            return Err(EmailError::BadlyFormatted);
        };

        let exchange = self.resolver.resolve(domain).await.map_err(|error| {
            debug!(%error, domain, "mail exchange lookup failed");
            EmailError::UnknownService
        })?;

        match tokio::time::timeout(self.probe_timeout, self.probe.probe(&exchange, raw)).await {
            Ok(Ok(RecipientVerdict::Accepted)) => Ok(()),
            Ok(Ok(RecipientVerdict::Rejected { code })) => {
                debug!(code, exchange = %exchange, "mail exchange rejected recipient");
                Err(EmailError::UnknownMailbox)
            }
            Ok(Err(MailboxProbeError::Disabled)) => {
                debug!(exchange = %exchange, "mailbox probe disabled");
                Ok(())
            }
            Ok(Err(error)) => {
                warn!(%error, exchange = %exchange, "cannot verify the email mailbox");
                Ok(())
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.probe_timeout.as_millis() as u64,
                    exchange = %exchange,
                    "mailbox probe timed out"
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MailExchangeError, MockMailExchangeResolver, MockMailboxProbe};
    use async_trait::async_trait;
    use rstest::rstest;

    fn resolving_to(host: &'static str) -> MockMailExchangeResolver {
        let mut resolver = MockMailExchangeResolver::new();
        resolver
            .expect_resolve()
            .returning(move |_| Ok(host.to_owned()));
        resolver
    }

    fn verifier(resolver: MockMailExchangeResolver, probe: MockMailboxProbe) -> EmailVerifier {
        EmailVerifier::new(Arc::new(resolver), Arc::new(probe))
    }

    #[rstest]
    #[case("ada@example.com")]
    #[case("Ada.Lovelace@Example.ORG")]
    #[case("first_last-1@mail.example.co")]
    #[case("")]
    fn syntax_accepts_conventional_addresses(#[case] raw: &str) {
        assert_eq!(validate_email_syntax(raw), Ok(()));
    }

    #[rstest]
    #[case("plainaddress")]
    #[case("ada@@example.com")]
    #[case("ada@example")]
    #[case("ada@example.toolong")]
    #[case("ada+tag@example.com")]
    #[case(" ada@example.com")]
    fn syntax_rejects_malformed_addresses(#[case] raw: &str) {
        assert_eq!(validate_email_syntax(raw), Err(EmailError::BadlyFormatted));
    }

    #[tokio::test]
    async fn malformed_address_skips_lookups() {
        let mut resolver = MockMailExchangeResolver::new();
        resolver.expect_resolve().times(0);
        let mut probe = MockMailboxProbe::new();
        probe.expect_probe().times(0);

        let outcome = verifier(resolver, probe).verify("not-an-email").await;
        assert_eq!(outcome, Err(EmailError::BadlyFormatted));
    }

    #[tokio::test]
    async fn unresolvable_domain_is_a_hard_error() {
        let mut resolver = MockMailExchangeResolver::new();
        resolver
            .expect_resolve()
            .withf(|domain: &str| domain == "nowhere.test")
            .times(1)
            .returning(|domain| Err(MailExchangeError::not_found(domain)));
        let mut probe = MockMailboxProbe::new();
        probe.expect_probe().times(0);

        let outcome = verifier(resolver, probe).verify("ada@nowhere.test").await;
        assert_eq!(outcome, Err(EmailError::UnknownService));
    }

    #[tokio::test]
    async fn accepted_recipient_passes() {
        let mut probe = MockMailboxProbe::new();
        probe
            .expect_probe()
            .withf(|exchange: &str, address: &str| {
                exchange == "mx.example.com" && address == "ada@example.com"
            })
            .times(1)
            .returning(|_, _| Ok(RecipientVerdict::Accepted));

        let outcome = verifier(resolving_to("mx.example.com"), probe)
            .verify("ada@example.com")
            .await;
        assert_eq!(outcome, Ok(()));
    }

    #[tokio::test]
    async fn rejected_recipient_fails() {
        let mut probe = MockMailboxProbe::new();
        probe
            .expect_probe()
            .returning(|_, _| Ok(RecipientVerdict::Rejected { code: 550 }));

        let outcome = verifier(resolving_to("mx.example.com"), probe)
            .verify("ghost@example.com")
            .await;
        assert_eq!(outcome, Err(EmailError::UnknownMailbox));
    }

    #[rstest]
    #[case(MailboxProbeError::connection("refused"))]
    #[case(MailboxProbeError::protocol("unexpected greeting"))]
    #[case(MailboxProbeError::disabled())]
    #[tokio::test]
    async fn probe_failures_are_soft(#[case] failure: MailboxProbeError) {
        let mut probe = MockMailboxProbe::new();
        probe
            .expect_probe()
            .return_once(move |_, _| Err(failure));

        let outcome = verifier(resolving_to("mx.example.com"), probe)
            .verify("ada@example.com")
            .await;
        assert_eq!(outcome, Ok(()));
    }

    struct StalledProbe;

    #[async_trait]
    impl MailboxProbe for StalledProbe {
        async fn probe(
            &self,
            _exchange: &str,
            _address: &str,
        ) -> Result<RecipientVerdict, MailboxProbeError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(RecipientVerdict::Rejected { code: 550 })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_probe_times_out_softly() {
        let verifier = EmailVerifier::new(
            Arc::new(resolving_to("mx.example.com")),
            Arc::new(StalledProbe),
        )
        .with_probe_timeout(Duration::from_millis(50));

        assert_eq!(verifier.verify("ada@example.com").await, Ok(()));
    }

    #[tokio::test]
    async fn empty_address_is_not_provided() {
        let mut resolver = MockMailExchangeResolver::new();
        resolver.expect_resolve().times(0);
        let mut probe = MockMailboxProbe::new();
        probe.expect_probe().times(0);

        assert_eq!(verifier(resolver, probe).verify("").await, Ok(()));
    }
}
