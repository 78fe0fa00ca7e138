//! Configuration integration tests
//!
//! A missing or invalid alert duration must stop the service from starting.

#[cfg(test)]
mod tests {
    use crate::common::database::test_config;
    use skyangel_alerts::config::ALERT_ACTIVE_DURATION_ENV;
    use skyangel_alerts::server::ServerBuilder;
    use skyangel_alerts::{Config, GatewayError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_missing_duration_is_fatal() {
        let mut config = test_config();
        config.alerts.active_duration_hours = None;

        let result = ServerBuilder::new().with_config(config).build().await;
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[tokio::test]
    async fn test_non_positive_duration_is_fatal() {
        for hours in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let mut config = test_config();
            config.alerts.active_duration_hours = Some(hours);

            let result = ServerBuilder::new().with_config(config).build().await;
            assert!(
                matches!(result, Err(GatewayError::Config(_))),
                "duration {} accepted",
                hours
            );
        }
    }

    #[tokio::test]
    async fn test_unparsable_duration_override_is_fatal() {
        let result = test_config().with_overrides(|key| {
            (key == ALERT_ACTIVE_DURATION_ENV).then(|| "dos horas".to_string())
        });
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[tokio::test]
    async fn test_valid_config_builds_server() {
        let server = ServerBuilder::new()
            .with_config(test_config())
            .build()
            .await
            .unwrap();

        assert_eq!(server.config().port, 5000);
        assert_eq!(server.state().channel.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_yaml_file_round_trip() {
        let yaml = test_config().to_yaml().unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loaded = Config::from_file(file.path()).await.unwrap();
        assert_eq!(loaded.alerts.active_duration_hours, Some(2.0));
        assert_eq!(loaded.storage.database.url, "sqlite::memory:");
    }
}
