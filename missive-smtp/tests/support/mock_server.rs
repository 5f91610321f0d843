//! Mock SMTP server for exercising the client session over a real socket.
//!
//! The server speaks plain TCP; the session is handed the accepted stream
//! directly, skipping the TLS layer. Every line the client sends is
//! recorded, and the message between `DATA` and the lone `.` is captured
//! verbatim.
#![allow(dead_code)] // Test utility module - not all methods used in every test
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::net::SocketAddr;

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpListener,
    task::JoinHandle,
};

/// SMTP command received by the mock server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtpCommand {
    Ehlo(String),
    AuthLogin,
    /// A bare line sent during the AUTH LOGIN exchange
    AuthData(String),
    MailFrom(String),
    RcptTo(String),
    Data,
    /// Message content (after DATA, up to but excluding the `.` line)
    MessageContent(Vec<u8>),
    Quit,
    Other(String),
}

/// Replies sent by the mock server.
#[derive(Debug, Clone)]
pub struct MockReplies {
    pub greeting: String,
    pub ehlo: String,
    pub auth: String,
    pub mail_from: String,
    pub rcpt_to: String,
    pub data: String,
    pub data_end: String,
    pub quit: String,
}

impl Default for MockReplies {
    fn default() -> Self {
        Self {
            greeting: "220 Mock SMTP Server\r\n".to_string(),
            ehlo: "250-localhost\r\n250 AUTH LOGIN\r\n".to_string(),
            auth: "334 VXNlcm5hbWU6\r\n".to_string(),
            mail_from: "250 OK\r\n".to_string(),
            rcpt_to: "250 OK\r\n".to_string(),
            data: "354 Start mail input; end with <CRLF>.<CRLF>\r\n".to_string(),
            data_end: "250 OK: Message accepted\r\n".to_string(),
            quit: "221 Bye\r\n".to_string(),
        }
    }
}

/// A single-connection mock server.
pub struct MockSmtpServer {
    addr: SocketAddr,
    handle: JoinHandle<Vec<SmtpCommand>>,
}

impl MockSmtpServer {
    pub async fn start() -> Self {
        Self::with_replies(MockReplies::default()).await
    }

    pub async fn with_replies(replies: MockReplies) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            handle_connection(stream, &replies).await
        });

        Self { addr, handle }
    }

    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Waits for the client to disconnect and returns what it sent.
    pub async fn commands(self) -> Vec<SmtpCommand> {
        self.handle.await.unwrap()
    }
}

async fn handle_connection(
    stream: tokio::net::TcpStream,
    replies: &MockReplies,
) -> Vec<SmtpCommand> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut commands = Vec::new();
    let mut in_auth = false;

    if writer.write_all(replies.greeting.as_bytes()).await.is_err() {
        return commands;
    }

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        let upper = trimmed.to_ascii_uppercase();

        let (command, reply) = if upper.starts_with("EHLO ") {
            (SmtpCommand::Ehlo(trimmed[5..].to_string()), &replies.ehlo)
        } else if upper == "AUTH LOGIN" {
            in_auth = true;
            (SmtpCommand::AuthLogin, &replies.auth)
        } else if upper.starts_with("MAIL FROM:") {
            in_auth = false;
            (
                SmtpCommand::MailFrom(trimmed[10..].trim().to_string()),
                &replies.mail_from,
            )
        } else if upper.starts_with("RCPT TO:") {
            (
                SmtpCommand::RcptTo(trimmed[8..].trim().to_string()),
                &replies.rcpt_to,
            )
        } else if upper == "DATA" {
            commands.push(SmtpCommand::Data);
            if writer.write_all(replies.data.as_bytes()).await.is_err() {
                break;
            }

            let mut content = Vec::new();
            loop {
                let mut data_line = Vec::new();
                match reader.read_until(b'\n', &mut data_line).await {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }
                if data_line == b".\n" || data_line == b".\r\n" {
                    break;
                }
                content.extend_from_slice(&data_line);
            }

            (SmtpCommand::MessageContent(content), &replies.data_end)
        } else if upper == "QUIT" {
            commands.push(SmtpCommand::Quit);
            let _ = writer.write_all(replies.quit.as_bytes()).await;
            break;
        } else if in_auth {
            (SmtpCommand::AuthData(trimmed.to_string()), &replies.auth)
        } else {
            (
                SmtpCommand::Other(trimmed.to_string()),
                &replies.mail_from,
            )
        };

        commands.push(command);
        if writer.write_all(reply.as_bytes()).await.is_err() {
            break;
        }
    }

    commands
}
