//! Byte stream transport for the session: TCP, wrapped in TLS before any
//! protocol bytes are exchanged.

use std::{io, sync::Arc};

use missive_common::{config::TlsConfig, internal, tracing};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
};
use tokio_rustls::{
    TlsConnector,
    client::TlsStream,
    rustls::{
        ClientConfig, DigitallySignedStruct, Error as RustlsError, RootCertStore, SignatureScheme,
        client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier},
        pki_types::{CertificateDer, ServerName, UnixTime},
    },
};

use crate::{
    channel::CommandChannel,
    error::{Result, SessionError},
    phase::Phase,
    reply::Reply,
};

/// Upper bound on the bytes taken by a single reply read.
pub const READ_BUFFER_SIZE: usize = 1024;

/// The production transport.
pub type TlsConnection = Connection<TlsStream<TcpStream>>;

/// A [`CommandChannel`] over any byte stream.
///
/// Replies are read with a single `read` of at most [`READ_BUFFER_SIZE`]
/// bytes and are never interpreted.
pub struct Connection<Stream> {
    stream: Stream,
    buffer: Box<[u8; READ_BUFFER_SIZE]>,
}

impl<Stream> Connection<Stream> {
    pub fn new(stream: Stream) -> Self {
        Self {
            stream,
            buffer: Box::new([0; READ_BUFFER_SIZE]),
        }
    }
}

impl<Stream: AsyncRead + AsyncWrite + Unpin + Send> CommandChannel for Connection<Stream> {
    async fn send(&mut self, phase: Phase, bytes: &[u8]) -> Result<()> {
        let write = async {
            self.stream.write_all(bytes).await?;
            self.stream.flush().await
        };

        write
            .await
            .map_err(|source| SessionError::ProtocolIo { phase, source })
    }

    async fn receive(&mut self, phase: Phase) -> Result<Reply> {
        let n = self
            .stream
            .read(&mut self.buffer[..])
            .await
            .map_err(|source| SessionError::ProtocolIo { phase, source })?;

        if n == 0 {
            internal!(level = DEBUG, "Server closed the connection during {phase}");
        }

        Ok(Reply::from(&self.buffer[..n]))
    }

    async fn close(&mut self) -> Result<()> {
        self.stream
            .shutdown()
            .await
            .map_err(|source| SessionError::ProtocolIo {
                phase: Phase::Closed,
                source,
            })
    }
}

/// Opens the TCP connection to `address`.
pub(crate) async fn connect_tcp(address: &str) -> Result<TcpStream> {
    TcpStream::connect(address)
        .await
        .map_err(|source| SessionError::Connection {
            address: address.to_string(),
            source,
        })
}

/// Builds a TLS connector trusting the native root store, or trusting
/// everything when `tls` says so.
pub(crate) fn tls_connector(tls: TlsConfig) -> Result<TlsConnector> {
    let mut root_store = RootCertStore::empty();

    let certs = rustls_native_certs::load_native_certs();
    for cert in certs.certs {
        root_store
            .add(cert)
            .map_err(|e| SessionError::Tls(format!("Failed to add certificate: {e}")))?;
    }
    // Some unreadable certificates are not fatal
    if !certs.errors.is_empty() {
        tracing::warn!(?certs.errors, "Some certificates could not be loaded");
    }

    let mut config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    if tls.accepts_invalid_certs() {
        tracing::warn!(
            "SECURITY WARNING: TLS certificate validation is disabled for this connection"
        );
        config
            .dangerous()
            .set_certificate_verifier(Arc::new(NoVerifier));
    }

    Ok(TlsConnector::from(Arc::new(config)))
}

/// Performs the TLS handshake over an established TCP stream.
pub(crate) async fn upgrade_to_tls(
    connector: &TlsConnector,
    server_name: &str,
    stream: TcpStream,
) -> Result<TlsStream<TcpStream>> {
    let server_name = ServerName::try_from(server_name.to_string())
        .map_err(|e| SessionError::Tls(format!("Invalid server name: {e}")))?;

    connector
        .connect(server_name, stream)
        .await
        .map_err(|e: io::Error| SessionError::Tls(e.to_string()))
}

/// Accepts every certificate. Only installed when `accept_invalid_certs` is set.
#[derive(Debug)]
struct NoVerifier;

impl ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, RustlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ED25519,
        ]
    }
}
