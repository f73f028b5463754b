//! Snapshot file integration tests

#[cfg(test)]
mod tests {
    use crate::common::{small_cluster, write_snapshot};
    use rbac_mapper::core::traits::RbacSource;
    use rbac_mapper::source::{Snapshot, SnapshotSource};
    use rbac_mapper::{Analyzer, CancellationSignal, SourceError};
    use std::io::Write;

    #[tokio::test]
    async fn test_snapshot_file_roundtrip_through_analyzer() {
        let file = write_snapshot(&small_cluster());
        let source = SnapshotSource::from_file(file.path()).await.unwrap();
        assert_eq!(source.snapshot(), &small_cluster());

        let result = Analyzer::builder()
            .with_source(source)
            .build()
            .unwrap()
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        assert_eq!(result.stats.total_roles, 4);
        assert_eq!(result.stats.total_bindings, 5);
    }

    #[tokio::test]
    async fn test_kubernetes_style_field_names() {
        let yaml = r#"
namespaces:
  - name: web
    roles:
      - name: editor
        rules:
          - apiGroups: ["", "networking.k8s.io"]
            resources: ["services", "ingresses"]
            verbs: ["update"]
cluster_roles: []
"#;
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let source = SnapshotSource::from_file(file.path()).await.unwrap();
        let roles = source.list_namespaced_grants("web").await.unwrap();
        assert_eq!(roles[0].rules[0].api_groups, vec!["", "networking.k8s.io"]);
        assert!(source.list_cluster_bindings().await.unwrap().is_empty());
        assert!(source.list_namespaced_grants("absent").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_snapshot_file() {
        let err = SnapshotSource::from_file("/nonexistent/snapshot.yaml")
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Snapshot(_)));
    }

    #[test]
    fn test_malformed_json_snapshot() {
        let err = Snapshot::parse("{\"namespaces\": 7}", std::path::Path::new("rbac.json"))
            .unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }
}
