//! HTTP route integration tests
//!
//! Routes run through `actix_web::test` against an in-memory database; the
//! routing proxy talks to a `wiremock` upstream.

#[cfg(test)]
mod tests {
    use crate::common::database::test_config;
    use crate::common::{AlertFactory, TestDatabase};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use serde_json::{Value, json};
    use skyangel_alerts::Config;
    use skyangel_alerts::core::alerts::OutboundMessage;
    use skyangel_alerts::server::{AppState, HttpServer};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn state_with(config: Config) -> AppState {
        TestDatabase::new().await.app_state(config)
    }

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(HttpServer::create_app(web::Data::new($state.clone()))).await
        };
    }

    #[actix_web::test]
    async fn test_health_check() {
        let state = state_with(test_config()).await;
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Server").unwrap(), "SkyAngel");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[actix_web::test]
    async fn test_create_alert_persists_and_broadcasts() {
        let state = state_with(test_config()).await;
        let mut subscriber = state.channel.subscribe();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/alerta")
            .set_json(AlertFactory::report_body())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["insert"], true);
        let id = body["id_alerta"].as_i64().unwrap() as i32;

        let stored = state.store.get(id).await.unwrap().unwrap();
        assert!(stored.active);
        assert_eq!(stored.payload["tipo_alerta"], "Incidencias delictivas");
        assert_eq!(stored.payload["latitud_alerta"], 19.4);
        assert!(stored.payload["dia_semana"].is_string());

        match subscriber.receiver.recv().await {
            Some(OutboundMessage::ReceiveAlert(feature)) => {
                assert_eq!(feature["type"], "Feature");
                assert_eq!(feature["geometry"]["coordinates"], json!([-99.1, 19.4]));
                assert_eq!(feature["properties"]["incidencia_alerta"], "Robo a transporte");
            }
            other => panic!("expected a broadcast feature, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_create_alert_rejects_bad_input() {
        let state = state_with(test_config()).await;
        let app = init_app!(state);

        let mut out_of_range = AlertFactory::report_body();
        out_of_range["coordenadas"] = json!("40.7, -74.0");
        let mut missing = AlertFactory::report_body();
        missing.as_object_mut().unwrap().remove("tipo");

        for body in [out_of_range, missing] {
            let req = test::TestRequest::post()
                .uri("/alerta")
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }

        let req = test::TestRequest::post()
            .uri("/alerta")
            .insert_header(("content-type", "application/json"))
            .set_payload("not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(state.store.list_active().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_coordinates_error_message() {
        let state = state_with(test_config()).await;
        let app = init_app!(state);

        let mut body = AlertFactory::report_body();
        body["coordenadas"] = json!("norte");
        let req = test::TestRequest::post()
            .uri("/alerta")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("Coordenadas invalidas o fuera de rango")
        );
    }

    #[actix_web::test]
    async fn test_active_alerts_omit_deactivated() {
        let state = state_with(test_config()).await;
        let kept = state
            .store
            .create(skyangel_alerts::NewAlert::now(AlertFactory::enriched_payload()))
            .await
            .unwrap();
        let removed = state
            .store
            .create(skyangel_alerts::NewAlert::now(AlertFactory::enriched_payload()))
            .await
            .unwrap();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/alertas/{}/desactivar", removed.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri(&format!("/alertas/{}/desactivar", removed.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/alertas_activas").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["type"], "FeatureCollection");

        let features = body["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["properties"]["id_alerta"], kept.id);
        assert_eq!(features[0]["properties"]["estatus"], "Activa");
        assert_eq!(features[0]["geometry"]["type"], "Point");
    }

    #[actix_web::test]
    async fn test_route_proxy_injects_defaults() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/route"))
            .and(body_partial_json(json!({
                "alternates": 3,
                "language": "es-ES",
                "costing": "auto"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "trip": {"status": 0, "summary": {"length": 12.5}}
            })))
            .expect(1)
            .mount(&upstream)
            .await;

        let mut config = test_config();
        config.routing.base_url = Some(upstream.uri());
        let state = state_with(config).await;
        let app = init_app!(state);

        let request = json!({
            "locations": [{"lat": 19.4, "lon": -99.1}, {"lat": 19.5, "lon": -99.2}],
            "costing": "auto"
        });
        let req = test::TestRequest::get()
            .uri(&format!(
                "/route?json={}",
                url::form_urlencoded::byte_serialize(request.to_string().as_bytes())
                    .collect::<String>()
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["trip"]["summary"]["length"], 12.5);
    }

    #[actix_web::test]
    async fn test_route_proxy_errors() {
        let state = state_with(test_config()).await;
        let app = init_app!(state);

        let req = test::TestRequest::get()
            .uri("/route?json=%7B%7D")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/route"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "No path"})))
            .mount(&upstream)
            .await;

        let mut config = test_config();
        config.routing.base_url = Some(upstream.uri());
        let state = state_with(config).await;
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/route").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/route?json=%7B%7D")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: Value = test::read_body_json(resp).await;
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("No path"), "unexpected message: {}", message);
    }
}
