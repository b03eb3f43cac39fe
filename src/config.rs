//! Node Configuration
//!
//! Command-line options of the `cache-node` binary.

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "cache-node", about = "Distributed look-aside cache node")]
pub struct NodeConfig {
    /// Port of the peer server.
    #[arg(long, default_value_t = 8001)]
    pub port: u16,

    /// Host name peers use to reach this node.
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Every node of the cluster, this one included.
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "http://localhost:8001,http://localhost:8002,http://localhost:8003"
    )]
    pub peers: Vec<String>,

    /// Also start the front-end API server.
    #[arg(long)]
    pub api: bool,

    /// Port of the front-end API server.
    #[arg(long, default_value_t = 9999)]
    pub api_port: u16,

    /// Byte budget of the demo group's cache.
    #[arg(long, default_value_t = 2 << 10)]
    pub cache_bytes: i64,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,
}

impl NodeConfig {
    /// Address peers know this node by, e.g. `http://localhost:8001`.
    pub fn self_addr(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Fails unless `--peers` lists this node under the exact address built
    /// from `--host` and `--port`. A node missing from its own peer list
    /// cannot recognise the keys it owns and would request them from itself.
    pub fn validate(&self) -> anyhow::Result<()> {
        let self_addr = self.self_addr();
        if !self
            .peers
            .iter()
            .any(|peer| peer.trim_end_matches('/') == self_addr)
        {
            anyhow::bail!(
                "{} is not in --peers {:?}; --host and --port must match one of them",
                self_addr,
                self.peers
            );
        }
        Ok(())
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_local_three_node_cluster() {
        let config = NodeConfig::try_parse_from(["cache-node"]).unwrap();

        assert_eq!(config.port, 8001);
        assert_eq!(config.self_addr(), "http://localhost:8001");
        assert_eq!(config.peers.len(), 3);
        assert!(config.peers.contains(&config.self_addr()));
        assert!(!config.api);
        assert_eq!(config.cache_bytes, 2048);
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_parse_custom_peers() {
        let config = NodeConfig::try_parse_from([
            "cache-node",
            "--port",
            "8002",
            "--peers",
            "http://a:8001,http://b:8002",
            "--api",
            "-v",
        ])
        .unwrap();

        assert_eq!(config.port, 8002);
        assert_eq!(config.peers, vec!["http://a:8001", "http://b:8002"]);
        assert!(config.api);
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_validate_accepts_node_listed_in_peers() {
        let config = NodeConfig::try_parse_from(["cache-node", "--port", "8003"]).unwrap();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_host_not_matching_peers() {
        // 127.0.0.1 and localhost reach the same socket but are different ring members.
        let config = NodeConfig::try_parse_from(["cache-node", "--host", "127.0.0.1"]).unwrap();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("http://127.0.0.1:8001 is not in --peers"));
    }
}
