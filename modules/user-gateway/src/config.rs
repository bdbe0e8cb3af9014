//! Configuration of the user-gateway binary.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use serde::{Deserialize, Serialize};
use svckit_bootstrap::LoggingConfig;
use svckit_transport_grpc::ClientSettings;

/// Prefix of environment overrides, e.g. `USER_GATEWAY__USER_SERVICE__URI`.
pub const ENV_PREFIX: &str = "USER_GATEWAY__";

const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// Upstream user service.
    pub user_service: ClientSettings,
    pub logging: LoggingConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            user_service: ClientSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Apply `--port` and `--user-service`.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, user_service_uri: Option<String>) {
        if let Some(port) = port {
            self.listen_addr.set_port(port);
        }
        if let Some(uri) = user_service_uri {
            self.user_service.uri = uri;
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::io::Write;

    use svckit_bootstrap::load_layered;

    use super::*;

    const TEST_PREFIX: &str = "USER_GATEWAY_CONFIG_TEST_UNSET__";

    #[test]
    fn defaults_point_at_local_user_service() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.listen_addr.port(), 8080);
        assert_eq!(cfg.user_service.uri, "http://127.0.0.1:50051");
    }

    #[test]
    fn yaml_overrides_upstream_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "user_service:\n  uri: http://users:9000\n  max_retries: 0\nlogging:\n  format: json"
        )
        .unwrap();

        let cfg = load_layered(&GatewayConfig::default(), Some(file.path()), TEST_PREFIX).unwrap();
        assert_eq!(cfg.user_service.uri, "http://users:9000");
        assert_eq!(cfg.user_service.max_retries, 0);
        assert_eq!(
            cfg.user_service.rpc_timeout_ms,
            ClientSettings::default().rpc_timeout_ms
        );
        assert_eq!(cfg.logging.format, svckit_bootstrap::LogFormat::Json);
    }

    #[test]
    fn cli_overrides_win() {
        let mut cfg = GatewayConfig::default();
        cfg.apply_cli_overrides(Some(9090), Some("http://10.0.0.5:50051".to_owned()));
        assert_eq!(cfg.listen_addr.port(), 9090);
        assert_eq!(cfg.user_service.uri, "http://10.0.0.5:50051");
    }
}
