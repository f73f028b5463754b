//! Configuration integration tests
//!
//! Loads configuration from files and flags and runs the mapper over a
//! snapshot.

#[cfg(test)]
mod tests {
    use crate::common::{small_cluster, write_snapshot};
    use clap::Parser;
    use rbac_mapper::config::{Cli, Config};
    use rbac_mapper::{CancellationSignal, Mapper, MapperError, ResultLimit};
    use std::io::Write;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // ==================== Loading ====================

    #[tokio::test]
    async fn test_flags_only() {
        let cli = Cli::parse_from([
            "rbac-mapper",
            "--snapshot",
            "cluster.yaml",
            "--verbs",
            "get",
            "--limit",
            "25",
            "--no-color",
        ]);
        let config = Config::load(&cli).await.unwrap();

        assert_eq!(config.analysis().verbs, vec!["get"]);
        assert_eq!(
            config.analysis().result_limit().unwrap(),
            ResultLimit::Limited(25)
        );
        assert!(!config.output().color);
    }

    #[tokio::test]
    async fn test_invalid_limit_flag_is_rejected() {
        let cli = Cli::parse_from(["rbac-mapper", "--limit", "-5"]);
        let err = Config::load(&cli).await.unwrap_err();
        assert!(matches!(err, MapperError::Config(_)));
    }

    #[tokio::test]
    async fn test_zero_timeout_in_file_is_rejected() {
        let file = config_file("source:\n  timeout: 0\n");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    // ==================== Mapper runs ====================

    #[tokio::test]
    async fn test_mapper_run_over_snapshot() {
        let snapshot = write_snapshot(&small_cluster());
        let file = config_file(&format!(
            "source:\n  snapshot: {:?}\nanalysis:\n  resources: [\"secrets\"]\n",
            snapshot.path()
        ));
        let cli = Cli::parse_from([
            "rbac-mapper",
            "--config",
            file.path().to_str().unwrap(),
        ]);

        let mapper = Mapper::new(Config::load(&cli).await.unwrap());
        let result = mapper.run(&CancellationSignal::new()).await.unwrap();

        assert_eq!(result.cluster_roles.len(), 1);
        assert_eq!(result.cluster_roles[0].name, "secret-admin");
        assert_eq!(result.stats.total_roles, 1);
        assert!(!result.truncated);
    }

    #[tokio::test]
    async fn test_mapper_missing_kubeconfig() {
        let cli = Cli::parse_from([
            "rbac-mapper",
            "--kubeconfig",
            "/nonexistent/kubeconfig",
        ]);
        let mapper = Mapper::new(Config::load(&cli).await.unwrap());

        let err = mapper.run(&CancellationSignal::new()).await.unwrap_err();
        assert!(matches!(err, MapperError::Source(_)));
    }
}
