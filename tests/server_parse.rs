// ABOUTME: Tests for the compact server address parser.
// ABOUTME: Exercises [user@]host[:port] forms and rejection cases.

use proptest::prelude::*;
use redeploy::config::{EnvValue, ServerConfig};

proptest! {
    #[test]
    fn parses_user_host_port(
        user in "[a-z][a-z0-9]{0,7}",
        host in "[a-z][a-z0-9.-]{0,15}[a-z0-9]",
        port in 1u16..=65535,
    ) {
        let addr = format!("{user}@{host}:{port}");
        let server = ServerConfig::parse(&addr).unwrap();
        prop_assert_eq!(server.host, EnvValue::literal(host));
        prop_assert_eq!(server.port, port);
        prop_assert_eq!(server.user, Some(EnvValue::literal(user)));
    }

    #[test]
    fn bare_host_defaults_to_port_22(host in "[a-z][a-z0-9.]{0,15}[a-z0-9]") {
        let server = ServerConfig::parse(&host).unwrap();
        prop_assert_eq!(server.host, EnvValue::literal(host));
        prop_assert_eq!(server.port, 22);
        prop_assert_eq!(server.user, None);
    }
}

#[test]
fn rejects_empty_address() {
    assert!(ServerConfig::parse("").is_err());
    assert!(ServerConfig::parse("   ").is_err());
}

#[test]
fn rejects_empty_hostname() {
    assert!(ServerConfig::parse("deploy@").is_err());
    assert!(ServerConfig::parse("deploy@:22").is_err());
}

#[test]
fn rejects_invalid_port() {
    assert!(ServerConfig::parse("host:notaport").is_err());
    assert!(ServerConfig::parse("host:99999").is_err());
}
