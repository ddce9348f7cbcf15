//! Tests for the update orchestrator.

use crate::address::{Address, Family, IpVersion};
use crate::cache::mock::MockCacheStore;
use crate::cache::{CacheMap, HostRecord};
use crate::http::HttpError;
use crate::network::mock::MockFetcher;
use crate::network::{AddressFlags, InterfaceAddress, InterfaceSnapshot};
use crate::provider::mock::MockProvider;
use crate::provider::{AddressChange, UpdateError};
use crate::resolver::mock::MockResolver;

use super::{CycleError, HostOutcome, Updater};

const V4: &str = "203.0.113.9";
const V6_TEMP: &str = "2001:db8::aaaa";
const V6_STABLE: &str = "2001:db8::1";

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

fn hosts(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

fn record(ipv4: Option<&str>, ipv6: Option<&str>) -> HostRecord {
    HostRecord {
        ipv4: ipv4.map(str::to_string),
        ipv6: ipv6.map(str::to_string),
    }
}

/// An interface carrying a temporary and a stable address.
fn privacy_interface() -> MockFetcher {
    MockFetcher::with_interfaces(vec![InterfaceSnapshot::new(
        "eth0",
        vec![
            InterfaceAddress::v6(V6_TEMP).with_flags(AddressFlags::TEMPORARY),
            InterfaceAddress::v6(V6_STABLE).with_flags(AddressFlags::STABLE),
        ],
    )])
}

fn rejected() -> UpdateError {
    UpdateError::Rejected {
        status: http::StatusCode::INTERNAL_SERVER_ERROR,
        body: None,
    }
}

type TestUpdater = Updater<MockResolver, MockFetcher, MockProvider>;

fn v4_updater(provider: MockProvider) -> TestUpdater {
    Updater::new(
        MockResolver::new(Some(addr(V4)), None),
        MockFetcher::default(),
        provider,
        IpVersion::V4,
    )
}

mod update_host {
    use super::*;

    #[tokio::test]
    async fn first_run_publishes_and_records() {
        let updater = v4_updater(MockProvider::accepting());
        let mut cache = CacheMap::new();

        let report = updater.update_host("home.duia.in", &mut cache).await;

        assert!(matches!(report.outcome, HostOutcome::Updated(AddressChange::V4(a)) if a == addr(V4)));
        assert_eq!(cache.get("home.duia.in"), Some(&record(Some(V4), None)));
        assert_eq!(updater.provider().call_count(), 1);
    }

    #[tokio::test]
    async fn unchanged_address_skips_provider() {
        let updater = v4_updater(MockProvider::accepting());
        let mut cache = CacheMap::new();
        cache.insert("home.duia.in", record(Some(V4), None));

        let report = updater.update_host("home.duia.in", &mut cache).await;

        assert!(matches!(report.outcome, HostOutcome::Skipped));
        assert_eq!(report.to_string(), "Update unnecessary for home.duia.in");
        assert_eq!(updater.provider().call_count(), 0);
    }

    #[tokio::test]
    async fn unparseable_cached_value_is_replaced() {
        let updater = v4_updater(MockProvider::accepting());
        let mut cache = CacheMap::new();
        cache.insert("home.duia.in", record(Some("bogus"), None));

        updater.update_host("home.duia.in", &mut cache).await;

        assert_eq!(cache.get("home.duia.in"), Some(&record(Some(V4), None)));
    }

    #[tokio::test]
    async fn temporary_v6_is_published_as_stable_sibling() {
        let updater = Updater::new(
            MockResolver::new(None, Some(addr(V6_TEMP))),
            privacy_interface(),
            MockProvider::accepting(),
            IpVersion::V6,
        );
        let mut cache = CacheMap::new();

        updater.update_host("home.duia.in", &mut cache).await;

        let calls = updater.provider().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, AddressChange::V6(addr(V6_STABLE)));
        assert_eq!(cache.get("home.duia.in"), Some(&record(None, Some(V6_STABLE))));
    }

    #[tokio::test]
    async fn both_changes_are_sent_in_one_call() {
        let updater = Updater::new(
            MockResolver::new(Some(addr(V4)), Some(addr(V6_TEMP))),
            privacy_interface(),
            MockProvider::accepting(),
            IpVersion::Both,
        );
        let mut cache = CacheMap::new();

        let report = updater.update_host("home.duia.in", &mut cache).await;

        let expected = AddressChange::Dual {
            v4: addr(V4),
            v6: addr(V6_STABLE),
        };
        assert_eq!(updater.provider().calls(), [("home.duia.in".to_string(), expected)]);
        assert_eq!(
            report.to_string(),
            "Successful update for home.duia.in 203.0.113.9 2001:db8::1"
        );
        assert_eq!(cache.get("home.duia.in"), Some(&record(Some(V4), Some(V6_STABLE))));
    }

    #[tokio::test]
    async fn only_changed_family_is_sent() {
        let updater = Updater::new(
            MockResolver::new(Some(addr(V4)), Some(addr(V6_STABLE))),
            privacy_interface(),
            MockProvider::accepting(),
            IpVersion::Both,
        );
        let mut cache = CacheMap::new();
        cache.insert("home.duia.in", record(Some("198.51.100.1"), Some(V6_STABLE)));

        updater.update_host("home.duia.in", &mut cache).await;

        assert_eq!(updater.provider().calls()[0].1, AddressChange::V4(addr(V4)));
        assert_eq!(cache.get("home.duia.in"), Some(&record(Some(V4), Some(V6_STABLE))));
    }

    #[tokio::test]
    async fn unavailable_lookups_skip_host() {
        let updater = Updater::new(
            MockResolver::new(None, None),
            privacy_interface(),
            MockProvider::accepting(),
            IpVersion::Both,
        );
        let mut cache = CacheMap::new();

        let report = updater.update_host("home.duia.in", &mut cache).await;

        assert!(matches!(report.outcome, HostOutcome::Skipped));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn unavailable_v6_does_not_enumerate_interfaces() {
        let updater = Updater::new(
            MockResolver::new(None, None),
            privacy_interface(),
            MockProvider::accepting(),
            IpVersion::V6,
        );

        updater.update_host("home.duia.in", &mut CacheMap::new()).await;

        assert_eq!(updater.fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn v6_not_bound_locally_is_not_published() {
        let updater = Updater::new(
            MockResolver::new(None, Some(addr("2001:db8:ffff::1"))),
            privacy_interface(),
            MockProvider::accepting(),
            IpVersion::V6,
        );

        let report = updater.update_host("home.duia.in", &mut CacheMap::new()).await;

        assert!(matches!(report.outcome, HostOutcome::Skipped));
    }

    #[tokio::test]
    async fn disabled_family_is_not_resolved() {
        let updater = v4_updater(MockProvider::accepting());

        updater.update_host("home.duia.in", &mut CacheMap::new()).await;

        assert_eq!(updater.resolver().calls(), [Family::V4]);
    }

    #[tokio::test]
    async fn rejected_update_leaves_cache_untouched() {
        let updater = v4_updater(MockProvider::with_outcomes(vec![Err(rejected())]));
        let mut cache = CacheMap::new();
        cache.insert("home.duia.in", record(Some("198.51.100.1"), None));

        let report = updater.update_host("home.duia.in", &mut cache).await;

        assert!(report.is_failure());
        assert_eq!(report.to_string(), "Update failed for home.duia.in 203.0.113.9");
        assert_eq!(cache.get("home.duia.in"), Some(&record(Some("198.51.100.1"), None)));
    }

    #[tokio::test]
    async fn transport_failure_does_not_create_entry() {
        let updater = v4_updater(MockProvider::with_outcomes(vec![Err(
            UpdateError::Transport(HttpError::Timeout),
        )]));
        let mut cache = CacheMap::new();

        updater.update_host("home.duia.in", &mut cache).await;

        assert!(cache.get("home.duia.in").is_none());
    }

    #[tokio::test]
    async fn dry_run_reports_without_calling_provider() {
        let updater = v4_updater(MockProvider::accepting()).with_dry_run(true);
        let mut cache = CacheMap::new();

        let report = updater.update_host("home.duia.in", &mut cache).await;

        assert!(matches!(report.outcome, HostOutcome::DryRun(_)));
        assert_eq!(updater.provider().call_count(), 0);
        assert!(cache.is_empty());
    }
}

mod run {
    use super::*;

    #[tokio::test]
    async fn failure_does_not_stop_later_hosts() {
        let updater = v4_updater(MockProvider::with_outcomes(vec![
            Ok(()),
            Err(rejected()),
            Ok(()),
        ]));
        let mut cache = CacheMap::new();

        let report = updater
            .run(&hosts(&["a.duia.in", "b.duia.in", "c.duia.in"]), &mut cache)
            .await;

        assert_eq!(report.updated(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(updater.provider().call_count(), 3);
        assert!(cache.get("a.duia.in").is_some());
        assert!(cache.get("b.duia.in").is_none());
        assert!(cache.get("c.duia.in").is_some());
    }

    #[tokio::test]
    async fn reports_follow_host_order() {
        let updater = v4_updater(MockProvider::accepting());
        let mut cache = CacheMap::new();
        cache.insert("z.duia.in", record(Some(V4), None));

        let report = updater
            .run(&hosts(&["z.duia.in", "a.duia.in"]), &mut cache)
            .await;

        let names: Vec<&str> = report.hosts.iter().map(|h| h.host.as_str()).collect();
        assert_eq!(names, ["z.duia.in", "a.duia.in"]);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.updated(), 1);
    }
}

mod execute_cycle {
    use super::*;

    #[tokio::test]
    async fn second_run_makes_no_provider_calls() {
        let store = MockCacheStore::empty();
        let first = v4_updater(MockProvider::accepting());
        first
            .execute_cycle(&hosts(&["home.duia.in"]), &store)
            .await
            .unwrap();
        assert_eq!(first.provider().call_count(), 1);

        let store = MockCacheStore::with_cache(store.saved().unwrap());
        let second = v4_updater(MockProvider::accepting());
        let report = second
            .execute_cycle(&hosts(&["home.duia.in"]), &store)
            .await
            .unwrap();

        assert_eq!(second.provider().call_count(), 0);
        assert_eq!(report.skipped(), 1);
    }

    #[tokio::test]
    async fn corrupt_cache_aborts_before_any_call() {
        let store = MockCacheStore::corrupt();
        let updater = v4_updater(MockProvider::accepting());

        let result = updater
            .execute_cycle(&hosts(&["home.duia.in"]), &store)
            .await;

        assert!(matches!(result, Err(CycleError::Load(_))));
        assert_eq!(updater.provider().call_count(), 0);
        assert!(updater.resolver().calls().is_empty());
        assert!(store.saved().is_none());
    }

    #[tokio::test]
    async fn cache_is_saved_once_with_confirmed_changes() {
        let store = MockCacheStore::empty();
        let updater = v4_updater(MockProvider::with_outcomes(vec![Ok(()), Err(rejected())]));

        updater
            .execute_cycle(&hosts(&["a.duia.in", "b.duia.in"]), &store)
            .await
            .unwrap();

        let saved = store.saved().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved.get("a.duia.in"), Some(&record(Some(V4), None)));
    }

    #[tokio::test]
    async fn failed_hosts_still_save_cache() {
        let mut initial = CacheMap::new();
        initial.insert("b.duia.in", record(Some("198.51.100.1"), None));
        let store = MockCacheStore::with_cache(initial.clone());
        let updater = v4_updater(MockProvider::with_outcomes(vec![Err(rejected())]));

        let report = updater
            .execute_cycle(&hosts(&["b.duia.in"]), &store)
            .await
            .unwrap();

        assert_eq!(report.failed(), 1);
        assert_eq!(store.saved(), Some(initial));
    }

    #[tokio::test]
    async fn save_failure_keeps_report() {
        let store = MockCacheStore::empty().failing_save();
        let updater = v4_updater(MockProvider::accepting());

        let result = updater
            .execute_cycle(&hosts(&["home.duia.in"]), &store)
            .await;

        match result {
            Err(CycleError::Save { report, .. }) => assert_eq!(report.updated(), 1),
            other => panic!("expected Save error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dry_run_does_not_save() {
        let store = MockCacheStore::empty();
        let updater = v4_updater(MockProvider::accepting()).with_dry_run(true);

        let report = updater
            .execute_cycle(&hosts(&["home.duia.in"]), &store)
            .await
            .unwrap();

        assert_eq!(report.pending(), 1);
        assert!(store.saved().is_none());
        assert_eq!(store.loads(), 1);
    }
}
