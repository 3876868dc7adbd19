//! SMTP recipient probe.
//!
//! Speaks just enough SMTP to learn whether an exchange accepts a recipient:
//! greeting, `HELO`, `MAIL FROM`, `RCPT TO`, then `QUIT`. No message is ever
//! sent. The whole dialogue is bounded by a single timeout.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tracing::debug;

use crate::domain::ports::{MailboxProbe, MailboxProbeError, RecipientVerdict};

/// Connection and identity settings for [`SmtpMailboxProbe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpProbeConfig {
    /// Port the exchange listens on.
    pub port: u16,
    /// Name announced in `HELO`.
    pub helo_name: String,
    /// Envelope sender announced in `MAIL FROM`.
    pub sender: String,
    /// Bound on connecting plus the full dialogue.
    pub timeout: Duration,
}

impl Default for SmtpProbeConfig {
    fn default() -> Self {
        Self {
            port: 25,
            helo_name: "localhost".to_owned(),
            sender: "me@domain.com".to_owned(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// [`MailboxProbe`] that talks SMTP over TCP.
#[derive(Debug, Clone, Default)]
pub struct SmtpMailboxProbe {
    config: SmtpProbeConfig,
}

impl SmtpMailboxProbe {
    pub fn new(config: SmtpProbeConfig) -> Self {
        Self { config }
    }

    async fn dialogue(
        &self,
        exchange: &str,
        address: &str,
    ) -> Result<RecipientVerdict, MailboxProbeError> {
        let stream = TcpStream::connect((exchange, self.config.port))
            .await
            .map_err(|err| MailboxProbeError::connection(err.to_string()))?;
        let (reader, writer) = stream.into_split();
        let mut session = SmtpSession {
            reader: BufReader::new(reader),
            writer,
        };

        session.expect(220, "greeting").await?;
        session
            .command(&format!("HELO {}", self.config.helo_name))
            .await?;
        session.expect(250, "HELO").await?;
        session
            .command(&format!("MAIL FROM:<{}>", self.config.sender))
            .await?;
        session.expect(250, "MAIL FROM").await?;
        session.command(&format!("RCPT TO:<{address}>")).await?;
        let code = session.reply().await?;

        // The verdict is known; a failed QUIT changes nothing.
        if session.command("QUIT").await.is_ok() {
            let _ = session.reply().await;
        }
        debug!(exchange, code, "recipient probe answered");
        Ok(RecipientVerdict::from_reply_code(code))
    }
}

struct SmtpSession {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl SmtpSession {
    async fn command(&mut self, line: &str) -> Result<(), MailboxProbeError> {
        self.writer
            .write_all(format!("{line}\r\n").as_bytes())
            .await
            .map_err(|err| MailboxProbeError::connection(err.to_string()))
    }

    /// Read one reply, following `NNN-` continuation lines to the final one.
    async fn reply(&mut self) -> Result<u16, MailboxProbeError> {
        loop {
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .await
                .map_err(|err| MailboxProbeError::connection(err.to_string()))?;
            if read == 0 {
                return Err(MailboxProbeError::protocol("connection closed mid-reply"));
            }
            let (code, more) = parse_reply_line(&line)?;
            if !more {
                return Ok(code);
            }
        }
    }

    async fn expect(&mut self, wanted: u16, stage: &str) -> Result<(), MailboxProbeError> {
        let code = self.reply().await?;
        if code == wanted {
            Ok(())
        } else {
            Err(MailboxProbeError::protocol(format!(
                "{stage} answered {code}, expected {wanted}"
            )))
        }
    }
}

/// Split a reply line into its code and whether more lines follow.
fn parse_reply_line(line: &str) -> Result<(u16, bool), MailboxProbeError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let malformed = || MailboxProbeError::protocol(format!("malformed reply {line:?}"));
    let code = line
        .get(..3)
        .filter(|digits| digits.bytes().all(|byte| byte.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u16>().ok())
        .ok_or_else(malformed)?;
    match line.as_bytes().get(3) {
        None | Some(b' ') => Ok((code, false)),
        Some(b'-') => Ok((code, true)),
        Some(_) => Err(malformed()),
    }
}

#[async_trait]
impl MailboxProbe for SmtpMailboxProbe {
    async fn probe(
        &self,
        exchange: &str,
        address: &str,
    ) -> Result<RecipientVerdict, MailboxProbeError> {
        tokio::time::timeout(self.config.timeout, self.dialogue(exchange, address))
            .await
            .map_err(|_| MailboxProbeError::connection("timed out"))?
    }
}

#[cfg(test)]
mod tests;
