//! Alert store integration tests
//!
//! Exercises `AlertRepository` against a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::{AlertFactory, TestDatabase, at_hour};
    use chrono::Duration;
    use skyangel_alerts::GatewayError;
    use skyangel_alerts::core::alerts::{AlertStore, NewAlert};
    use serde_json::json;

    fn two_hours() -> Duration {
        Duration::hours(2)
    }

    #[tokio::test]
    async fn test_alert_expires_after_window() {
        let db = TestDatabase::new().await;
        let store = db.repository(two_hours());

        let alert = store
            .create(AlertFactory::created_at_hour(0))
            .await
            .unwrap();
        assert!(alert.active);

        let changed = store.deactivate_expired(at_hour(1)).await.unwrap();
        assert_eq!(changed, 0);
        assert!(store.get(alert.id).await.unwrap().unwrap().active);

        let changed = store.deactivate_expired(at_hour(3)).await.unwrap();
        assert_eq!(changed, 1);
        assert!(!store.get(alert.id).await.unwrap().unwrap().active);
    }

    #[tokio::test]
    async fn test_out_of_range_window_is_an_error() {
        let db = TestDatabase::new().await;
        let store = db.repository(Duration::hours(100_000_000_000));

        store
            .create(AlertFactory::created_at_hour(0))
            .await
            .unwrap();

        let result = store.deactivate_expired(at_hour(3)).await;
        assert!(matches!(result, Err(GatewayError::Internal(_))));
        assert_eq!(store.list_active().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_expiry_is_idempotent() {
        let db = TestDatabase::new().await;
        let store = db.repository(two_hours());

        for hour in 0..3 {
            store
                .create(AlertFactory::created_at_hour(hour))
                .await
                .unwrap();
        }

        let first = store.deactivate_expired(at_hour(4)).await.unwrap();
        let after_first = store.list_active().await.unwrap();
        let second = store.deactivate_expired(at_hour(4)).await.unwrap();
        let after_second = store.list_active().await.unwrap();

        assert_eq!(first, 3);
        assert_eq!(second, 0);
        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn test_only_elapsed_windows_are_expired() {
        let db = TestDatabase::new().await;
        let store = db.repository(two_hours());

        let mut created = Vec::new();
        for hour in [-5, -2, -1, 0, 1] {
            created.push((hour, store.create(AlertFactory::created_at_hour(hour)).await.unwrap()));
        }

        let now = at_hour(0);
        let changed = store.deactivate_expired(now).await.unwrap();
        assert_eq!(changed, 2);

        for (hour, alert) in created {
            let stored = store.get(alert.id).await.unwrap().unwrap();
            let expected_active = at_hour(hour) + two_hours() > now;
            assert_eq!(stored.active, expected_active, "alert created at T={}h", hour);
        }
    }

    #[tokio::test]
    async fn test_boundary_is_inclusive() {
        let db = TestDatabase::new().await;
        let store = db.repository(two_hours());

        let alert = store
            .create(AlertFactory::created_at_hour(0))
            .await
            .unwrap();

        assert_eq!(store.deactivate_expired(at_hour(2)).await.unwrap(), 1);
        assert!(!store.get(alert.id).await.unwrap().unwrap().active);
    }

    #[tokio::test]
    async fn test_explicit_deactivation() {
        let db = TestDatabase::new().await;
        let store = db.repository(two_hours());

        let alert = store
            .create(AlertFactory::created_at_hour(0))
            .await
            .unwrap();

        assert!(store.deactivate(alert.id).await.unwrap());
        assert!(!store.deactivate(alert.id).await.unwrap());
        assert!(!store.deactivate(alert.id + 100).await.unwrap());

        // Already inactive alerts are not counted again
        assert_eq!(store.deactivate_expired(at_hour(10)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_active_newest_first() {
        let db = TestDatabase::new().await;
        let store = db.repository(two_hours());

        let older = store
            .create(NewAlert::new(json!({"n": 1}), at_hour(0)))
            .await
            .unwrap();
        let newer = store
            .create(NewAlert::new(json!({"n": 2}), at_hour(1)))
            .await
            .unwrap();
        let gone = store
            .create(NewAlert::new(json!({"n": 3}), at_hour(1)))
            .await
            .unwrap();
        store.deactivate(gone.id).await.unwrap();

        let active = store.list_active().await.unwrap();
        let ids: Vec<_> = active.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert_eq!(active[0].payload, json!({"n": 2}));
    }

    #[tokio::test]
    async fn test_payload_round_trips_through_json_column() {
        let db = TestDatabase::new().await;
        let store = db.repository(two_hours());

        let payload = AlertFactory::enriched_payload();
        let alert = store
            .create(NewAlert::new(payload.clone(), at_hour(0)))
            .await
            .unwrap();

        let stored = store.get(alert.id).await.unwrap().unwrap();
        assert_eq!(stored.payload, payload);
        assert_eq!(stored.created_at, at_hour(0));
    }

    #[tokio::test]
    async fn test_missing_alert() {
        let db = TestDatabase::new().await;
        let store = db.repository(two_hours());
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_database_stats() {
        let db = TestDatabase::new().await;
        let store = db.repository(two_hours());

        for hour in 0..4 {
            store
                .create(AlertFactory::created_at_hour(hour))
                .await
                .unwrap();
        }
        store.deactivate_expired(at_hour(3)).await.unwrap();

        let stats = db.db().stats().await.unwrap();
        assert_eq!(stats.total_alerts, 4);
        assert_eq!(stats.active_alerts, 2);
        assert!(db.db().is_sqlite());
    }
}
