//! Real-time channel integration tests
//!
//! Fan-out scenarios run without any network transport.

#[cfg(test)]
mod tests {
    use crate::common::{AlertFactory, FailingSink};
    use serde_json::json;
    use skyangel_alerts::core::alerts::{
        AlertChannel, OutboundMessage, PublishReport, SubscriberId,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn test_three_subscribers_receive_identical_payload() {
        let channel = AlertChannel::default();
        let mut subscribers: Vec<_> = (0..3).map(|_| channel.subscribe()).collect();

        let report = channel.publish(AlertFactory::robbery_payload()).await;
        assert_eq!(
            report,
            PublishReport {
                delivered: 3,
                dropped: 0
            }
        );

        let mut fourth = channel.subscribe();

        for subscriber in &mut subscribers {
            let received = subscriber.receiver.recv().await;
            assert_eq!(
                received,
                Some(OutboundMessage::ReceiveAlert(json!({
                    "tipo": "robo",
                    "lat": 19.4,
                    "lon": -99.1
                })))
            );
        }
        assert!(fourth.receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failing_transport_does_not_block_others() {
        let channel = AlertChannel::default();
        let mut before = channel.subscribe();
        let broken = SubscriberId::new();
        channel.connect(broken, Arc::new(FailingSink));
        let mut after = channel.subscribe();

        let report = channel.publish(AlertFactory::robbery_payload()).await;
        assert_eq!(report.delivered, 2);
        assert_eq!(report.dropped, 1);

        assert!(before.receiver.recv().await.is_some());
        assert!(after.receiver.recv().await.is_some());
        assert!(!channel.is_connected(broken));

        // The broken subscriber gets no further attempts
        let report = channel.publish(json!({"tipo": "choque"})).await;
        assert_eq!(report.dropped, 0);
    }

    #[tokio::test]
    async fn test_concurrent_publishers_and_subscribers() {
        let channel = Arc::new(AlertChannel::new(1024));
        let mut listener = channel.subscribe();

        let mut tasks = Vec::new();
        for publisher in 0..4 {
            let channel = Arc::clone(&channel);
            tasks.push(tokio::spawn(async move {
                for seq in 0..25 {
                    channel
                        .publish(json!({"publisher": publisher, "seq": seq}))
                        .await;
                    let transient = channel.subscribe();
                    channel.disconnect(transient.id);
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let mut last_seq = [-1i64; 4];
        let mut received = 0;
        while let Ok(OutboundMessage::ReceiveAlert(payload)) = listener.receiver.try_recv() {
            let publisher = payload["publisher"].as_u64().unwrap() as usize;
            let seq = payload["seq"].as_i64().unwrap();
            assert!(seq > last_seq[publisher], "events of one publisher arrive in order");
            last_seq[publisher] = seq;
            received += 1;
        }

        assert_eq!(received, 100);
        assert_eq!(channel.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_targeted_error_reply() {
        let channel = AlertChannel::default();
        let mut target = channel.subscribe();
        let mut bystander = channel.subscribe();

        channel
            .send_to(target.id, OutboundMessage::error("Malformed frame"))
            .await
            .unwrap();

        assert_eq!(
            target.receiver.recv().await,
            Some(OutboundMessage::error("Malformed frame"))
        );
        assert!(bystander.receiver.try_recv().is_err());
    }
}
