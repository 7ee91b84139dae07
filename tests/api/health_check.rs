use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_works() {
    let test_app = TestApp::spawn_app().await;
    let client = reqwest::Client::new();

    for url in [
        format!("{}/health_check", test_app.address),
        test_app.leads_url(),
    ] {
        let response = client
            .get(&url)
            .send()
            .await
            .expect("Failed to execute request.");

        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.unwrap();

        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "Lead intake endpoint is running");
        assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
    }
}
