//! Engine configuration.
//!
//! The engine never opens files itself (PKI material and the charging
//! configuration file format are external collaborators per `spec.md` §1),
//! but it owns the *shape* of its configuration so it can be constructed
//! deterministically in tests and by an embedding binary. Layering style
//! (env over TOML) follows `examples/ZilverZtream-OEC-Open_Energy_Controller/src/config.rs`.

use std::path::PathBuf;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::ProtocolVersion;

/// Filesystem paths to the PKI material consumed by `security::certs` and
/// `security::signature`. Per `spec.md` §9 ("Crypto key material... in a
/// rewrite these become configuration-provided paths, not globals"), these
/// replace the original source's `CertPath`/`KeyPath` constants.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct PkiPaths {
    pub v2g_root_cert: PathBuf,
    pub mo_root_cert: PathBuf,
    pub oem_root_cert: PathBuf,
    pub cps_leaf_cert: PathBuf,
    pub cps_signing_key: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct TimeoutOverrides {
    #[serde(default = "default_sequence_timeout_secs")]
    pub sequence_timeout_secs: u64,
    #[serde(default = "default_setup_timeout_secs")]
    pub communication_setup_timeout_secs: u64,
}

impl Default for TimeoutOverrides {
    fn default() -> Self {
        TimeoutOverrides {
            sequence_timeout_secs: default_sequence_timeout_secs(),
            communication_setup_timeout_secs: default_setup_timeout_secs(),
        }
    }
}

fn default_sequence_timeout_secs() -> u64 {
    crate::timeouts::V2G_SECC_SEQUENCE_TIMEOUT.as_secs()
}

fn default_setup_timeout_secs() -> u64 {
    crate::timeouts::V2G_EVCC_COMMUNICATION_SETUP_TIMEOUT.as_secs()
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SeccConfig {
    /// Protocol versions this SECC will negotiate, in preference order.
    #[serde(default = "default_protocol_versions")]
    pub enabled_protocol_versions: Vec<ProtocolVersionConfig>,

    /// Whether the transport layer has TLS active for this session. Gates
    /// PnC authorization (`spec.md` §3 invariant: "PnC-selected sessions may
    /// not reach PaymentDetails unless TLS is active") and whether the
    /// Certificate value-added service may be offered.
    #[serde(default)]
    pub require_tls_for_pnc: bool,

    #[serde(default)]
    pub allow_pnc: bool,

    #[validate]
    pub pki: Option<PkiPaths>,

    #[validate]
    #[serde(default)]
    pub timeouts: TimeoutOverrides,
}

/// `ProtocolVersion` has no `Deserialize` impl of its own since it also
/// carries variants (`DinSpec70121`, ...) that are not meant to be
/// selected directly as a negotiation target in config — `Iso15118_20Ac`/
/// `Iso15118_20Dc` are negotiated implicitly once ISO 15118-20 is enabled.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum ProtocolVersionConfig {
    DinSpec70121,
    Iso15118_2,
    Iso15118_20,
}

impl From<ProtocolVersionConfig> for ProtocolVersion {
    fn from(value: ProtocolVersionConfig) -> Self {
        match value {
            ProtocolVersionConfig::DinSpec70121 => ProtocolVersion::DinSpec70121,
            ProtocolVersionConfig::Iso15118_2 => ProtocolVersion::Iso15118_2,
            ProtocolVersionConfig::Iso15118_20 => ProtocolVersion::Iso15118_20Ac,
        }
    }
}

fn default_protocol_versions() -> Vec<ProtocolVersionConfig> {
    vec![ProtocolVersionConfig::DinSpec70121, ProtocolVersionConfig::Iso15118_2]
}

impl Default for SeccConfig {
    fn default() -> Self {
        SeccConfig {
            enabled_protocol_versions: default_protocol_versions(),
            require_tls_for_pnc: true,
            allow_pnc: false,
            pki: None,
            timeouts: TimeoutOverrides::default(),
        }
    }
}

impl SeccConfig {
    /// Convenience constructor layering `SECC_`-prefixed environment
    /// variables over an optional `secc.toml` file, falling back to
    /// [`SeccConfig::default`] for anything unset.
    pub fn load(toml_path: Option<&std::path::Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(figment::providers::Serialized::defaults(SeccConfig::default()));
        if let Some(path) = toml_path {
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed("SECC_").split("_"));
        figment.extract()
    }
}
