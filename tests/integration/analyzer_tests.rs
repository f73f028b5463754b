//! Analysis integration tests
//!
//! Runs the analyzer over the `small_cluster` fixture through the scripted
//! data source.

#[cfg(test)]
mod tests {
    use crate::common::{FakeSource, small_cluster};
    use rbac_mapper::core::types::Scope;
    use rbac_mapper::{
        Analyzer, CancellationSignal, FilterSpec, MapperError, RbacSource, ResultLimit,
    };
    use std::sync::Arc;

    fn analyzer(source: Arc<FakeSource>, filter: Option<FilterSpec>, limit: ResultLimit) -> Analyzer {
        let shared: Arc<dyn RbacSource> = source;
        let mut builder = Analyzer::builder()
            .with_shared_source(shared)
            .with_limit(limit);
        if let Some(filter) = filter {
            builder = builder.with_filter(filter);
        }
        builder.build().unwrap()
    }

    fn role_names(result: &rbac_mapper::AnalysisResult, namespace: &str) -> Vec<String> {
        result
            .namespace_roles
            .get(namespace)
            .map(|roles| roles.iter().map(|r| r.name.clone()).collect())
            .unwrap_or_default()
    }

    // ==================== Unfiltered runs ====================

    #[tokio::test]
    async fn test_unfiltered_inventory() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        let result = analyzer(source, None, ResultLimit::Unlimited)
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        assert!(!result.truncated);
        assert_eq!(result.stats.total_namespaces, 4);
        assert_eq!(result.stats.namespaces_with_roles, 3);
        assert_eq!(result.stats.total_roles, 4);
        assert_eq!(result.stats.total_cluster_roles, 2);
        assert_eq!(result.stats.total_bindings, 5);

        // empty namespaces never appear
        assert!(!result.namespace_roles.contains_key("team-a"));
        assert!(!result.namespace_bindings.contains_key("team-b"));

        assert_eq!(
            role_names(&result, "kube-system"),
            vec!["secret-manager", "leader-locking"]
        );
        assert_eq!(
            result.cluster_roles[0].rules[0].resources,
            vec!["pods", "deployments", "apps/pods", "apps/deployments"]
        );
        assert_eq!(result.cluster_roles[0].scope, Scope::Cluster);
    }

    #[tokio::test]
    async fn test_bindings_are_sorted_per_scope() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        let result = analyzer(source, None, ResultLimit::default())
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        let cluster: Vec<_> = result.cluster_bindings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(cluster, vec!["admins", "viewers"]);

        let system: Vec<_> = result.namespace_bindings["kube-system"]
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(system, vec!["alpha-binding", "zeta-binding"]);

        // an empty subject namespace reads as cluster-wide
        assert_eq!(result.namespace_bindings["kube-system"][0].subjects[0].namespace, None);
        assert_eq!(
            result.cluster_bindings[0].subjects[0].namespace.as_deref(),
            Some("ops")
        );
    }

    #[tokio::test]
    async fn test_listing_order() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        analyzer(source.clone(), None, ResultLimit::Unlimited)
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        assert_eq!(
            source.calls(),
            vec![
                "namespaces",
                "clusterroles",
                "roles:default",
                "roles:kube-system",
                "roles:team-a",
                "roles:team-b",
                "clusterrolebindings",
                "rolebindings:default",
                "rolebindings:kube-system",
                "rolebindings:team-a",
                "rolebindings:team-b",
            ]
        );
    }

    // ==================== Filtering ====================

    #[tokio::test]
    async fn test_filter_by_verb() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        let filter = FilterSpec::new(["DELETE"], Vec::<String>::new());
        let result = analyzer(source, Some(filter), ResultLimit::Unlimited)
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        assert_eq!(result.cluster_roles.len(), 1);
        assert_eq!(result.cluster_roles[0].name, "secret-admin");
        assert_eq!(role_names(&result, "kube-system"), vec!["secret-manager"]);
        assert_eq!(role_names(&result, "team-b"), vec!["deployer"]);
        assert!(!result.namespace_roles.contains_key("default"));
        assert_eq!(result.stats.namespaces_with_roles, 2);
        // every namespace was still visited
        assert_eq!(result.stats.total_namespaces, 4);
        // bindings are not narrowed by the filter
        assert_eq!(result.stats.total_bindings, 5);
    }

    #[tokio::test]
    async fn test_filter_requires_both_axes_in_one_rule() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        let filter = FilterSpec::new(["watch"], ["secrets"]);
        let result = analyzer(source, Some(filter), ResultLimit::Unlimited)
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        assert_eq!(result.total_grants(), 0);
        assert!(result.namespace_roles.is_empty());
    }

    #[tokio::test]
    async fn test_filter_by_qualified_resource() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        let filter = FilterSpec::new(Vec::<String>::new(), ["apps/deployments"]);
        let result = analyzer(source, Some(filter), ResultLimit::Unlimited)
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        assert_eq!(result.cluster_roles[0].name, "view");
        assert_eq!(role_names(&result, "team-b"), vec!["deployer"]);
        assert_eq!(result.stats.total_roles, 1);
    }

    // ==================== Result ceiling ====================

    #[tokio::test]
    async fn test_ceiling_reached_in_cluster_scope() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        let result = analyzer(source.clone(), None, ResultLimit::Limited(2))
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        assert!(result.truncated);
        assert_eq!(result.cluster_roles.len(), 2);
        assert!(result.namespace_roles.is_empty());
        // the first namespace was fetched before the budget refused its role
        assert_eq!(result.stats.total_namespaces, 1);
        assert_eq!(result.stats.total_bindings, 2);
        assert!(!source.calls().contains(&"roles:kube-system".to_string()));
        assert!(!source.calls().contains(&"rolebindings:kube-system".to_string()));
    }

    #[tokio::test]
    async fn test_ceiling_reached_mid_namespaces() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        let result = analyzer(source, None, ResultLimit::Limited(3))
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        assert!(result.truncated);
        assert_eq!(result.total_grants(), 3);
        assert_eq!(role_names(&result, "default"), vec!["pod-reader"]);
        assert!(!result.namespace_roles.contains_key("kube-system"));
        assert_eq!(result.stats.total_namespaces, 2);
    }

    #[tokio::test]
    async fn test_exact_fit_is_not_truncated() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        let result = analyzer(source, None, ResultLimit::Limited(6))
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        assert!(!result.truncated);
        assert_eq!(result.total_grants(), 6);
        assert_eq!(result.stats.total_bindings, 5);
    }

    #[tokio::test]
    async fn test_filtered_out_grants_do_not_spend_budget() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        let filter = FilterSpec::new(["delete"], Vec::<String>::new());
        let result = analyzer(source, Some(filter), ResultLimit::Limited(3))
            .analyze(&CancellationSignal::new())
            .await
            .unwrap();

        assert_eq!(result.total_grants(), 3);
        assert_eq!(role_names(&result, "team-b"), vec!["deployer"]);
        // bindings overflow their own budget of three
        assert!(result.truncated);
        assert_eq!(result.stats.total_bindings, 3);
    }

    // ==================== Failures and cancellation ====================

    #[tokio::test]
    async fn test_role_listing_failure_aborts() {
        let source = Arc::new(FakeSource::new(small_cluster()).failing_on("roles:team-a"));
        let err = analyzer(source.clone(), None, ResultLimit::Unlimited)
            .analyze(&CancellationSignal::new())
            .await
            .unwrap_err();

        match err {
            MapperError::Fetch {
                scope, operation, ..
            } => {
                assert_eq!(scope, "team-a");
                assert_eq!(operation, "list roles");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(source.calls().last().map(String::as_str), Some("roles:team-a"));
    }

    #[tokio::test]
    async fn test_namespace_listing_failure() {
        let source = Arc::new(FakeSource::new(small_cluster()).failing_on("namespaces"));
        let err = analyzer(source.clone(), None, ResultLimit::Unlimited)
            .analyze(&CancellationSignal::new())
            .await
            .unwrap_err();

        assert_eq!(err.fetch_scope(), Some("cluster"));
        assert_eq!(source.calls(), vec!["namespaces"]);
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_cluster_binding_failure() {
        let source =
            Arc::new(FakeSource::new(small_cluster()).failing_on("clusterrolebindings"));
        let err = analyzer(source, None, ResultLimit::Unlimited)
            .analyze(&CancellationSignal::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MapperError::Fetch {
                operation: "list cluster role bindings",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let source = Arc::new(FakeSource::new(small_cluster()));
        let cancel = CancellationSignal::new();
        cancel.cancel();

        let err = analyzer(source.clone(), None, ResultLimit::Unlimited)
            .analyze(&cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(source.calls().is_empty());
    }
}
