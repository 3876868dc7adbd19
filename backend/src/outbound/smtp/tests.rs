//! Dialogue tests against a scripted local exchange.

use super::*;
use rstest::rstest;
use tokio::net::TcpListener;

/// Replies the scripted exchange sends, in order: greeting, HELO, MAIL FROM,
/// RCPT TO. `QUIT` is always answered with 221.
struct Script {
    greeting: &'static str,
    helo: &'static str,
    mail: &'static str,
    rcpt: &'static str,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            greeting: "220 mx.test ESMTP\r\n",
            helo: "250 mx.test\r\n",
            mail: "250 2.1.0 Ok\r\n",
            rcpt: "250 2.1.5 Ok\r\n",
        }
    }
}

/// Serve one session and return the commands the client sent.
async fn serve(listener: TcpListener, script: Script) -> Vec<String> {
    let (stream, _) = listener.accept().await.expect("accept");
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut received = Vec::new();

    writer
        .write_all(script.greeting.as_bytes())
        .await
        .expect("greeting");
    for reply in [script.helo, script.mail, script.rcpt, "221 Bye\r\n"] {
        let mut line = String::new();
        if reader.read_line(&mut line).await.expect("read command") == 0 {
            break;
        }
        received.push(line.trim_end().to_owned());
        if writer.write_all(reply.as_bytes()).await.is_err() {
            break;
        }
    }
    received
}

async fn scripted_exchange(script: Script) -> (SmtpMailboxProbe, tokio::task::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let server = tokio::spawn(serve(listener, script));
    let probe = SmtpMailboxProbe::new(SmtpProbeConfig {
        port,
        helo_name: "probe.test".to_owned(),
        sender: "probe@sender.test".to_owned(),
        timeout: Duration::from_secs(5),
    });
    (probe, server)
}

#[tokio::test]
async fn accepted_recipient_runs_the_full_dialogue() {
    let (probe, server) = scripted_exchange(Script::default()).await;

    let verdict = probe
        .probe("127.0.0.1", "ada@example.com")
        .await
        .expect("verdict");
    assert_eq!(verdict, RecipientVerdict::Accepted);

    let received = server.await.expect("server task");
    assert_eq!(
        received,
        vec![
            "HELO probe.test",
            "MAIL FROM:<probe@sender.test>",
            "RCPT TO:<ada@example.com>",
            "QUIT",
        ]
    );
}

#[tokio::test]
async fn rejected_recipient_reports_the_code() {
    let (probe, server) = scripted_exchange(Script {
        rcpt: "550 5.1.1 User unknown\r\n",
        ..Script::default()
    })
    .await;

    let verdict = probe
        .probe("127.0.0.1", "ghost@example.com")
        .await
        .expect("verdict");
    assert_eq!(verdict, RecipientVerdict::Rejected { code: 550 });
    server.await.expect("server task");
}

#[tokio::test]
async fn multiline_replies_are_followed_to_the_last_line() {
    let (probe, server) = scripted_exchange(Script {
        greeting: "220-mx.test first\r\n220-mx.test second\r\n220 mx.test ready\r\n",
        helo: "250-mx.test\r\n250-PIPELINING\r\n250 8BITMIME\r\n",
        ..Script::default()
    })
    .await;

    let verdict = probe
        .probe("127.0.0.1", "ada@example.com")
        .await
        .expect("verdict");
    assert_eq!(verdict, RecipientVerdict::Accepted);
    server.await.expect("server task");
}

#[tokio::test]
async fn unwelcoming_greeting_is_a_protocol_error() {
    let (probe, server) = scripted_exchange(Script {
        greeting: "554 go away\r\n",
        ..Script::default()
    })
    .await;

    let outcome = probe.probe("127.0.0.1", "ada@example.com").await;
    assert!(matches!(outcome, Err(MailboxProbeError::Protocol { .. })));
    drop(probe);
    server.abort();
}

#[tokio::test]
async fn unreachable_exchange_is_a_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    let probe = SmtpMailboxProbe::new(SmtpProbeConfig {
        port,
        ..SmtpProbeConfig::default()
    });
    let outcome = probe.probe("127.0.0.1", "ada@example.com").await;
    assert!(matches!(outcome, Err(MailboxProbeError::Connection { .. })));
}

#[tokio::test]
async fn silent_exchange_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(stream);
    });

    let probe = SmtpMailboxProbe::new(SmtpProbeConfig {
        port,
        timeout: Duration::from_millis(100),
        ..SmtpProbeConfig::default()
    });
    let outcome = probe.probe("127.0.0.1", "ada@example.com").await;
    assert_eq!(outcome, Err(MailboxProbeError::connection("timed out")));
    server.abort();
}

#[rstest]
#[case("250 Ok\r\n", Ok((250, false)))]
#[case("250-PIPELINING\r\n", Ok((250, true)))]
#[case("221\r\n", Ok((221, false)))]
#[case("25O Ok\r\n", Err(()))]
#[case("250_Ok\r\n", Err(()))]
#[case("\r\n", Err(()))]
fn reply_lines_parse(#[case] line: &str, #[case] expected: Result<(u16, bool), ()>) {
    assert_eq!(parse_reply_line(line).map_err(|_| ()), expected);
}
