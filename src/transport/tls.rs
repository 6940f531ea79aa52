use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use slirc_wire::{Message, ProtocolError, Transport};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName};
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tracing::{debug, info, warn};

use super::IrcTransport;
use crate::config::TlsConfig;
use crate::error::ProbeError;

/// Client-side TLS connection to an IRC server.
pub struct TlsTransport {
    inner: Transport,
    closed: bool,
}

impl TlsTransport {
    /// Dial `address:port` and complete a TLS handshake, verifying the
    /// certificate against `server_name`.
    pub async fn connect(
        address: &str,
        port: u16,
        server_name: &str,
        tls: &TlsConfig,
    ) -> Result<Self, ProbeError> {
        let connector = Self::connector(tls)?;
        let name = ServerName::try_from(server_name.to_string())
            .map_err(|_| ProbeError::InvalidServerName(server_name.to_string()))?;

        let addr = format!("{}:{}", address, port);
        let tcp_stream = TcpStream::connect((address, port))
            .await
            .map_err(|source| ProbeError::Connect {
                addr: addr.clone(),
                source,
            })?;
        debug!(%addr, "TCP connected");

        let tls_stream = connector
            .connect(name, tcp_stream)
            .await
            .map_err(ProbeError::Tls)?;

        info!(%addr, server_name = %server_name, "TLS handshake completed");

        Ok(Self {
            inner: Transport::client_tls(tls_stream),
            closed: false,
        })
    }

    /// Build a connector trusting the configured roots.
    pub fn connector(tls: &TlsConfig) -> Result<TlsConnector, ProbeError> {
        let mut roots = RootCertStore::empty();

        if tls.native_roots {
            let certs = rustls_native_certs::load_native_certs();
            for cert in certs.certs {
                if let Err(e) = roots.add(cert) {
                    warn!("Failed to add root cert: {}", e);
                }
            }
            for e in &certs.errors {
                warn!("Error loading native certs: {}", e);
            }
        }

        if let Some(ref path) = tls.ca_file {
            for cert in load_pem_certs(path)? {
                roots
                    .add(cert)
                    .map_err(|e| ProbeError::RootStore(format!("{}: {}", path.display(), e)))?;
            }
        }

        if roots.is_empty() {
            return Err(ProbeError::RootStore(
                "no trusted root certificates available".to_string(),
            ));
        }

        let config = ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();

        Ok(TlsConnector::from(Arc::new(config)))
    }
}

fn load_pem_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, ProbeError> {
    let file = File::open(path)
        .map_err(|e| ProbeError::RootStore(format!("{}: {}", path.display(), e)))?;
    let certs = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ProbeError::RootStore(format!("{}: {}", path.display(), e)))?;

    if certs.is_empty() {
        return Err(ProbeError::RootStore(format!(
            "{}: no certificates found",
            path.display()
        )));
    }
    Ok(certs)
}

#[async_trait]
impl IrcTransport for TlsTransport {
    async fn send(&mut self, msg: &Message) -> Result<(), ProtocolError> {
        self.inner.write_message(msg).await
    }

    async fn recv(&mut self) -> Result<Option<Message>, ProtocolError> {
        self.inner.read_message().await
    }

    async fn close(&mut self) -> Result<(), ProtocolError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.inner.close().await
    }
}
