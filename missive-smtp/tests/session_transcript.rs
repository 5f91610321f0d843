//! Integration tests for the SMTP session over a real socket.
#![allow(clippy::expect_used, clippy::unwrap_used)]

mod support;

use missive_common::config::{Credentials, SessionTimeouts};
use missive_mime::Letter;
use missive_smtp::{Connection, Phase, SessionError, SmtpSession};
use pretty_assertions::assert_eq;
use support::mock_server::{MockReplies, MockSmtpServer, SmtpCommand};
use tokio::net::TcpStream;

fn letter(recipients: &[&str]) -> Letter {
    let mut letter = Letter::create(
        "mail@example.com",
        recipients.iter().map(ToString::to_string).collect(),
        "Quarterly numbers",
    )
    .unwrap();
    letter.add_text("Numbers attached.\n");
    letter.add_attachment_bytes("numbers.csv", "text/csv", b"q,total\n1,42\n".to_vec());
    letter
}

async fn session(server: &MockSmtpServer) -> SmtpSession<Connection<TcpStream>> {
    let stream = TcpStream::connect(server.addr()).await.unwrap();
    SmtpSession::new(Connection::new(stream), SessionTimeouts::default())
}

#[tokio::test]
#[cfg_attr(miri, ignore)]
async fn test_full_transcript() {
    let server = MockSmtpServer::start().await;
    let credentials = Credentials::new("mail@example.com", "password");
    let message = letter(&["a@x.com", "b@x.com"]).finalize();
    let body = message.as_bytes().strip_suffix(b".\n").unwrap().to_vec();

    let transcript = session(&server)
        .await
        .deliver(&credentials, message)
        .await
        .unwrap();

    assert_eq!(
        server.commands().await,
        vec![
            SmtpCommand::Ehlo("mail@example.com".to_string()),
            SmtpCommand::AuthLogin,
            SmtpCommand::AuthData("bWFpbEBleGFtcGxlLmNvbQ==".to_string()),
            SmtpCommand::AuthData("cGFzc3dvcmQ=".to_string()),
            SmtpCommand::MailFrom("mail@example.com".to_string()),
            SmtpCommand::RcptTo("a@x.com".to_string()),
            SmtpCommand::RcptTo("b@x.com".to_string()),
            SmtpCommand::Data,
            SmtpCommand::MessageContent(body),
            SmtpCommand::Quit,
        ]
    );

    assert_eq!(transcript.len(), 10);
    assert_eq!(transcript[0].reply.code(), Some(220));
    assert_eq!(transcript[1].command.as_deref(), Some("EHLO mail@example.com"));
}

#[tokio::test]
#[cfg_attr(miri, ignore)]
async fn test_rejections_do_not_stop_the_transcript() {
    let server = MockSmtpServer::with_replies(MockReplies {
        auth: "535 5.7.8 Authentication credentials invalid\r\n".to_string(),
        rcpt_to: "550 5.1.1 No such user\r\n".to_string(),
        ..MockReplies::default()
    })
    .await;
    let credentials = Credentials::new("mail@example.com", "wrong");

    let transcript = session(&server)
        .await
        .deliver(&credentials, letter(&["nobody@x.com"]).finalize())
        .await
        .unwrap();

    let commands = server.commands().await;
    assert!(commands.contains(&SmtpCommand::RcptTo("nobody@x.com".to_string())));
    assert_eq!(commands.last(), Some(&SmtpCommand::Quit));
    assert!(transcript.iter().any(|exchange| exchange.reply.is_permanent_error()));
}

#[tokio::test]
#[cfg_attr(miri, ignore)]
async fn test_validating_session_aborts_on_rejection() {
    let server = MockSmtpServer::with_replies(MockReplies {
        rcpt_to: "550 5.1.1 No such user\r\n".to_string(),
        ..MockReplies::default()
    })
    .await;
    let credentials = Credentials::new("mail@example.com", "password");

    let err = session(&server)
        .await
        .validating()
        .deliver(&credentials, letter(&["nobody@x.com", "a@x.com"]).finalize())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Rejected {
            phase: Phase::MailFromSet,
            ..
        }
    ));

    let commands = server.commands().await;
    assert_eq!(
        commands.last(),
        Some(&SmtpCommand::RcptTo("nobody@x.com".to_string()))
    );
}
