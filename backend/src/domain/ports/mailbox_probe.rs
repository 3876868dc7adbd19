//! Port for asking a mail exchange whether it accepts a recipient.
//!
//! Probing is best-effort: callers treat every [`MailboxProbeError`] as
//! "could not verify" rather than as a rejection.

use async_trait::async_trait;

use super::define_port_error;

/// What the exchange answered to the recipient command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientVerdict {
    /// The exchange accepted the recipient (reply code 250).
    Accepted,
    /// The exchange answered with any other reply code.
    Rejected { code: u16 },
}

impl RecipientVerdict {
    /// Map an SMTP reply code to a verdict.
    pub fn from_reply_code(code: u16) -> Self {
        if code == 250 {
            Self::Accepted
        } else {
            Self::Rejected { code }
        }
    }
}

define_port_error! {
    /// Failures that prevented the probe from reaching a verdict.
    pub enum MailboxProbeError {
        /// The exchange could not be reached.
        Connection { message: String } => "mail exchange connection failed: {message}",
        /// The exchange broke the dialogue before the recipient command.
        Protocol { message: String } => "mail exchange dialogue failed: {message}",
        /// Probing is switched off.
        Disabled => "mailbox probing is disabled",
    }
}

/// Checks recipient acceptance on a mail exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailboxProbe: Send + Sync {
    /// Run the HELO / MAIL FROM / RCPT TO dialogue against `exchange` for
    /// `address` and report the recipient verdict.
    async fn probe(
        &self,
        exchange: &str,
        address: &str,
    ) -> Result<RecipientVerdict, MailboxProbeError>;
}

/// Probe used when deliverability checks are switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailboxProbe;

#[async_trait]
impl MailboxProbe for DisabledMailboxProbe {
    async fn probe(
        &self,
        _exchange: &str,
        _address: &str,
    ) -> Result<RecipientVerdict, MailboxProbeError> {
        Err(MailboxProbeError::disabled())
    }
}
