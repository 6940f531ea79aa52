use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};

/// A test CA written to disk, able to issue server certificates.
pub struct TestPki {
    _dir: tempfile::TempDir,
    pub ca_path: PathBuf,
    ca_cert: Certificate,
    ca_key: KeyPair,
}

impl TestPki {
    pub fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let (ca_cert, ca_key) = build_ca()?;
        let ca_path = dir.path().join("ca.pem");
        std::fs::write(&ca_path, ca_cert.pem())?;

        Ok(Self {
            _dir: dir,
            ca_path,
            ca_cert,
            ca_key,
        })
    }

    /// Acceptor presenting a `localhost` certificate signed by this CA.
    pub fn acceptor(&self) -> anyhow::Result<TlsAcceptor> {
        let params = server_params()?;
        self.acceptor_for(params)
    }

    /// Acceptor presenting a certificate that expired in 2001.
    pub fn expired_acceptor(&self) -> anyhow::Result<TlsAcceptor> {
        let mut params = server_params()?;
        params.not_before = rcgen::date_time_ymd(2000, 1, 1);
        params.not_after = rcgen::date_time_ymd(2001, 1, 1);
        self.acceptor_for(params)
    }

    fn acceptor_for(&self, params: CertificateParams) -> anyhow::Result<TlsAcceptor> {
        let key_pair = KeyPair::generate()?;
        let cert = params.signed_by(&key_pair, &self.ca_cert, &self.ca_key)?;
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));

        let config = ServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(vec![cert.der().clone()], key)?;
        Ok(TlsAcceptor::from(Arc::new(config)))
    }
}

fn build_ca() -> anyhow::Result<(Certificate, KeyPair)> {
    let mut params = CertificateParams::default();
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, "slirc-probe-test-ca");
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let key_pair = KeyPair::generate()?;
    let cert = params.self_signed(&key_pair)?;
    Ok((cert, key_pair))
}

fn server_params() -> anyhow::Result<CertificateParams> {
    let mut params =
        CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])?;
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, "localhost");
    params.is_ca = IsCa::NoCa;
    Ok(params)
}
