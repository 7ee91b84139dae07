use crate::helpers::TestApp;

#[tokio::test]
async fn append_returns_200_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;
    let body = serde_json::json!({
        "name": "Тест Тестов",
        "phone": "+996 555 123456",
        "timestamp": "2024-03-01T20:15:00.000Z",
    });

    let response = test_app.post_lead(body).await;

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();

    assert_eq!(body, serde_json::json!({"success": true, "message": "Data saved"}));
}

#[tokio::test]
async fn append_persists_a_localized_row() {
    let test_app = TestApp::spawn_app().await;
    let body = serde_json::json!({
        "name": "Тест Тестов",
        "phone": "+996 555 123456",
        "timestamp": "2024-03-01T20:15:00.000Z",
        "source": "https://example.com/test",
    });

    test_app.post_lead(body).await;

    let rows = test_app.saved_rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].timestamp, "02.03.2024, 02:15:00");
    assert_eq!(rows[0].name, "Тест Тестов");
    assert_eq!(rows[0].phone, "+996 555 123456");
    assert_eq!(rows[0].source, "https://example.com/test");
}

#[tokio::test]
async fn first_append_creates_the_worksheet_with_a_header() {
    let test_app = TestApp::spawn_app().await;

    assert!(!test_app.worksheet_path().exists());

    test_app.post_lead(serde_json::json!({"name": "Frank"})).await;
    test_app.post_lead(serde_json::json!({"name": "Frank"})).await;

    let content = std::fs::read_to_string(test_app.worksheet_path()).unwrap();
    let headers: Vec<&str> = content
        .lines()
        .filter(|line| *line == "Date/Time,Name,Phone,Source")
        .collect();

    assert_eq!(content.lines().next(), Some("Date/Time,Name,Phone,Source"));
    assert_eq!(headers.len(), 1);
}

#[tokio::test]
async fn append_does_not_validate_the_fields() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.post_lead(serde_json::json!({})).await;

    assert_eq!(200, response.status().as_u16());

    let rows = test_app.saved_rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "");
    assert_eq!(rows[0].phone, "");
    assert_eq!(rows[0].source, "");
    assert!(!rows[0].timestamp.is_empty());
}

#[tokio::test]
async fn same_lead_posted_twice_is_stored_twice() {
    let test_app = TestApp::spawn_app().await;
    let body = serde_json::json!({
        "name": "Тест Тестов",
        "phone": "+996 555 123456",
        "timestamp": "2024-03-01T20:15:00.000Z",
    });

    test_app.post_lead(body.clone()).await;
    test_app.post_lead(body).await;

    let rows = test_app.saved_rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], rows[1]);
}

#[tokio::test]
async fn append_returns_400_when_body_is_malformed() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases = vec![
        ("", "empty body"),
        ("{\"name\": ", "truncated JSON"),
        ("name=Frank&phone=0555123456", "form encoded body"),
        ("{\"name\": 42}", "name is not a string"),
        ("{\"timestamp\": \"yesterday\"}", "timestamp is not RFC 3339"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_raw_lead(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );

        let body: serde_json::Value = response.json().await.unwrap();

        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    assert!(test_app.saved_rows().is_empty());
}
