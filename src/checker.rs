//! Concurrent update resolution
//!
//! This module provides:
//! - One latest-version lookup per go.mod requirement, fanned out under a
//!   bounded-concurrency admission gate (tokio Semaphore)
//! - Aggregation of completed lookups into a single UpdateReport, owned by
//!   the awaiting task so no lock is ever held across network I/O
//! - First-failure error semantics: every lookup still runs to completion,
//!   but a failed call returns no partial report

use crate::domain::{Update, UpdateReport};
use crate::error::CheckError;
use crate::manifest::parse_go_mod;
use crate::registry::ModuleRegistry;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Checks go.mod manifests for available module updates.
///
/// Holds the registry client and the per-call request ceiling; one checker
/// is reused across manifests.
pub struct UpdateChecker {
    /// Registry answering latest-version queries
    registry: Arc<dyn ModuleRegistry>,
    /// Limit of simultaneously active proxy requests per call.
    /// 0 means no explicit bound: twice the available parallelism is used.
    max_requests: usize,
}

impl UpdateChecker {
    /// Creates a checker with the given registry and request ceiling
    pub fn new(registry: Arc<dyn ModuleRegistry>, max_requests: usize) -> Self {
        Self {
            registry,
            max_requests,
        }
    }

    /// The concurrency bound applied to proxy lookups
    fn effective_concurrency(&self) -> usize {
        if self.max_requests > 0 {
            self.max_requests
        } else {
            default_concurrency()
        }
    }

    /// Checks manifest bytes for available updates.
    ///
    /// Returns the sorted report of modules whose latest published version
    /// differs (plain string inequality) from the required one. On any
    /// lookup failure the first failure in completion order is returned,
    /// chained with the offending module path, and no report is produced;
    /// the remaining lookups still run to completion.
    ///
    /// Cancellation: dropping the returned future (e.g. from
    /// `tokio::time::timeout`) aborts in-flight lookups and keeps queued
    /// ones from starting.
    pub async fn check_manifest_bytes(&self, bytes: &[u8]) -> Result<UpdateReport, CheckError> {
        let requirements = parse_go_mod(bytes)?;
        if requirements.is_empty() {
            return Ok(UpdateReport::new());
        }

        let semaphore = Arc::new(Semaphore::new(self.effective_concurrency()));
        let mut lookups = JoinSet::new();

        for requirement in requirements {
            let registry = Arc::clone(&self.registry);
            let semaphore = Arc::clone(&semaphore);

            lookups.spawn(async move {
                // The permit covers only the proxy round trip
                let _permit = semaphore.acquire_owned().await.unwrap();

                let info = registry
                    .latest_version(&requirement.path)
                    .await
                    .map_err(|e| CheckError::lookup(requirement.path.clone(), e))?;

                if info.version == requirement.version {
                    return Ok(None);
                }

                Ok(Some(Update::new(
                    requirement.path,
                    requirement.version,
                    info.version,
                )))
            });
        }

        let mut report = UpdateReport::new();
        let mut first_error: Option<CheckError> = None;

        while let Some(joined) = lookups.join_next().await {
            match joined.expect("lookup task panicked") {
                Ok(Some(update)) => report.insert(update),
                Ok(None) => {}
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        report.sort();
        Ok(report)
    }
}

/// Default request ceiling when none is configured
fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() * 2)
        .unwrap_or(8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionInfo;
    use crate::error::RegistryError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// In-memory registry: module path -> latest version.
    /// Unknown modules answer not-found.
    struct MockRegistry {
        latest: HashMap<String, String>,
        active: AtomicUsize,
        max_active: AtomicUsize,
        delay: Duration,
    }

    impl MockRegistry {
        fn new(latest: &[(&str, &str)]) -> Self {
            Self {
                latest: latest
                    .iter()
                    .map(|(m, v)| (m.to_string(), v.to_string()))
                    .collect(),
                active: AtomicUsize::new(0),
                max_active: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn max_observed_active(&self) -> usize {
            self.max_active.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModuleRegistry for MockRegistry {
        async fn list_versions(&self, module: &str) -> Result<Vec<String>, RegistryError> {
            match self.latest.get(module) {
                Some(version) => Ok(vec![version.clone()]),
                None => Ok(Vec::new()),
            }
        }

        async fn latest_version(&self, module: &str) -> Result<VersionInfo, RegistryError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.active.fetch_sub(1, Ordering::SeqCst);

            match self.latest.get(module) {
                Some(version) => Ok(VersionInfo::new(version.clone(), Utc::now())),
                None => Err(RegistryError::module_not_found(module)),
            }
        }
    }

    fn checker(registry: MockRegistry, max_requests: usize) -> (UpdateChecker, Arc<MockRegistry>) {
        let registry = Arc::new(registry);
        (
            UpdateChecker::new(Arc::clone(&registry) as Arc<dyn ModuleRegistry>, max_requests),
            registry,
        )
    }

    #[tokio::test]
    async fn test_update_available() {
        let (checker, _) = checker(MockRegistry::new(&[("golang.org/x/mod", "v0.5.2")]), 4);

        let manifest = b"module example.com/repobot

go 1.18

require golang.org/x/mod v0.5.0
";
        let report = checker.check_manifest_bytes(manifest).await.unwrap();

        assert_eq!(report.len(), 1);
        let update = &report.updates()[0];
        assert_eq!(update.module, "golang.org/x/mod");
        assert_eq!(update.old_version, "v0.5.0");
        assert_eq!(update.new_version, "v0.5.2");
    }

    #[tokio::test]
    async fn test_no_update_when_versions_equal() {
        let (checker, _) = checker(MockRegistry::new(&[("golang.org/x/mod", "v0.5.1")]), 4);

        let manifest = b"module example.com/repobot

go 1.18

require golang.org/x/mod v0.5.1
";
        let report = checker.check_manifest_bytes(manifest).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_empty_manifest_gives_empty_report() {
        let (checker, _) = checker(MockRegistry::new(&[]), 4);

        let manifest = b"module example.com/empty

go 1.21
";
        let report = checker.check_manifest_bytes(manifest).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_report_sorted_by_module_path() {
        let (checker, _) = checker(
            MockRegistry::new(&[
                ("golang.org/x/text", "v0.14.0"),
                ("github.com/spf13/cobra", "v1.8.0"),
            ]),
            4,
        );

        let manifest = b"module example.com/app

require (
\tgolang.org/x/text v0.13.0
\tgithub.com/spf13/cobra v1.7.0
)
";
        let report = checker.check_manifest_bytes(manifest).await.unwrap();
        let modules: Vec<&str> = report.iter().map(|u| u.module.as_str()).collect();
        assert_eq!(modules, vec!["github.com/spf13/cobra", "golang.org/x/text"]);
    }

    #[tokio::test]
    async fn test_malformed_manifest_is_fatal() {
        let (checker, _) = checker(MockRegistry::new(&[]), 4);

        let err = checker
            .check_manifest_bytes(b"this is not a go.mod\n")
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Manifest(_)));
    }

    #[tokio::test]
    async fn test_not_found_fails_whole_call() {
        let (checker, _) = checker(
            MockRegistry::new(&[
                ("golang.org/x/mod", "v0.5.2"),
                ("golang.org/x/text", "v0.14.0"),
            ]),
            4,
        );

        let manifest = b"module example.com/app

require (
\tgolang.org/x/mod v0.5.0
\tgolang.org/x/text v0.13.0
\texample.com/missing v1.0.0
)
";
        let err = checker.check_manifest_bytes(manifest).await.unwrap_err();
        match err {
            CheckError::Lookup { module, source } => {
                assert_eq!(module, "example.com/missing");
                assert!(source.is_not_found());
            }
            other => panic!("expected Lookup error, got {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_bound_respected() {
        let registry = MockRegistry::new(&[
            ("example.com/a", "v1.0.1"),
            ("example.com/b", "v1.0.1"),
            ("example.com/c", "v1.0.1"),
            ("example.com/d", "v1.0.1"),
            ("example.com/e", "v1.0.1"),
            ("example.com/f", "v1.0.1"),
            ("example.com/g", "v1.0.1"),
            ("example.com/h", "v1.0.1"),
        ])
        .with_delay(Duration::from_millis(20));
        let (checker, registry) = checker(registry, 2);

        let manifest = b"module example.com/app

require (
\texample.com/a v1.0.0
\texample.com/b v1.0.0
\texample.com/c v1.0.0
\texample.com/d v1.0.0
\texample.com/e v1.0.0
\texample.com/f v1.0.0
\texample.com/g v1.0.0
\texample.com/h v1.0.0
)
";
        let report = checker.check_manifest_bytes(manifest).await.unwrap();

        assert_eq!(report.len(), 8);
        assert!(
            registry.max_observed_active() <= 2,
            "observed {} active lookups with a limit of 2",
            registry.max_observed_active()
        );
    }

    #[tokio::test]
    async fn test_zero_limit_uses_default_bound() {
        let (checker, registry) = checker(
            MockRegistry::new(&[("golang.org/x/mod", "v0.5.2")]),
            0,
        );

        let manifest = b"require golang.org/x/mod v0.5.0\n";
        let report = checker.check_manifest_bytes(manifest).await.unwrap();

        assert_eq!(report.len(), 1);
        assert!(registry.max_observed_active() >= 1);
    }

    #[test]
    fn test_default_concurrency_never_one() {
        assert!(default_concurrency() >= 2);
    }
}
