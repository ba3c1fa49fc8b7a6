//! End-to-end tests for the form flow over real HTTP.
//!
//! Set `TEST_BASE_URL` (e.g. `http://localhost:3001`) to run against a
//! deployed server; otherwise each test starts one in-process on an
//! ephemeral port.

use form_server::{app, config::Config, AppState};
use reqwest::{Client, StatusCode};

async fn base_url() -> String {
    if let Ok(url) = std::env::var("TEST_BASE_URL") {
        return url.trim_end_matches('/').to_string();
    }
    let cfg = Config::from_lookup(|_| None).expect("default config");
    let router = app(AppState::new().expect("state"), &cfg);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server");
    });
    format!("http://{}", addr)
}

fn client() -> Client {
    Client::builder().build().expect("client")
}

/// Submit the form and return (status, final path, body).
async fn submit(client: &Client, base: &str, message: &str) -> (StatusCode, String, String) {
    let resp = client
        .post(format!("{}/submit", base))
        .form(&[("message", message)])
        .send()
        .await
        .expect("submit");
    let status = resp.status();
    let path = resp.url().path().to_string();
    let body = resp.text().await.expect("body");
    (status, path, body)
}

fn assert_blocked(status: StatusCode, path: &str, body: &str, payload: &str) {
    assert_eq!(status, StatusCode::BAD_REQUEST, "{:?} not rejected", payload);
    assert_eq!(path, "/submit", "{:?} navigated away", payload);
    assert!(body.contains(r#"id="secureForm""#));
    assert!(
        body.contains(r#"id="userInput" name="message" maxlength="200" placeholder="Type your message here..." value="""#),
        "input not cleared for {:?}",
        payload
    );
}

#[tokio::test]
async fn page_loads_with_title() {
    let base = base_url().await;
    let resp = client().get(&base).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("<title>Secure Form</title>"));
}

#[tokio::test]
async fn form_elements_present_and_configured() {
    let base = base_url().await;
    let body = client()
        .get(format!("{}/index.html", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(r#"<form id="secureForm""#));
    assert!(body.contains(r#"id="userInput""#));
    assert!(body.contains(r#"<button type="submit">"#));
    assert!(body.contains(r#"<div id="errorMessage""#));
    assert!(body.contains(r#"placeholder="Type your message here...""#));
    assert!(body.contains(r#"maxlength="200""#));
}

#[tokio::test]
async fn empty_submission_shows_error() {
    let base = base_url().await;
    let (status, path, body) = submit(&client(), &base, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(path, "/submit");
    assert!(body.contains(r#"role="alert">Please enter a message.</div>"#));
}

#[tokio::test]
async fn xss_payloads_blocked() {
    let base = base_url().await;
    let c = client();
    for payload in [
        r#"<script>alert("XSS")</script>"#,
        r#"<iframe src="javascript:alert(1)"></iframe>"#,
        r#"<img src=x onerror=alert("XSS")>"#,
    ] {
        let (status, path, body) = submit(&c, &base, payload).await;
        assert_blocked(status, &path, &body, payload);
    }
}

#[tokio::test]
async fn sql_payloads_blocked() {
    let base = base_url().await;
    let c = client();
    for payload in [
        "'; DROP TABLE users; --",
        "' UNION SELECT password FROM users --",
        "admin' OR '1'='1' --",
    ] {
        let (status, path, body) = submit(&c, &base, payload).await;
        assert_blocked(status, &path, &body, payload);
    }
}

#[tokio::test]
async fn valid_input_redirects_to_result_page() {
    let base = base_url().await;
    let (status, path, _) =
        submit(&client(), &base, "Hello World! This is a valid message.").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(path, "/result.html");
}

#[tokio::test]
async fn result_page_displays_submitted_text() {
    let base = base_url().await;
    let c = client();
    for text in [
        "Hello World! This is a valid message.",
        "Test message for display validation",
    ] {
        let (status, path, body) = submit(&c, &base, text).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(path, "/result.html");
        let expected = format!(r#"<p id="userMessage" class="message">{}</p>"#, text);
        assert!(body.contains(&expected), "missing {:?}", text);
    }
}

#[tokio::test]
async fn return_button_leads_home() {
    let base = base_url().await;
    let c = client();
    let (_, path, body) = submit(&c, &base, "Test for return button functionality").await;
    assert_eq!(path, "/result.html");
    assert!(body.contains(r#"<form method="get" action="/index.html">"#));
    assert!(body.contains(r#"<button type="submit">Return to Home Page</button>"#));

    // Follow the button's form target.
    let resp = c.get(format!("{}/index.html", base)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.url().path().ends_with("index.html"));
    assert!(resp.text().await.unwrap().contains(r#"id="secureForm""#));
}

#[tokio::test]
async fn sequence_of_attacks_each_blocked() {
    let base = base_url().await;
    let c = client();
    let attacks = [
        r#"<script>alert("XSS1")</script>"#,
        "'; DELETE FROM users; --",
        "<img src=x onerror=alert(1)>",
        "' OR 1=1 --",
        r#"javascript:alert("XSS2")"#,
    ];
    for attack in attacks {
        let (status, path, body) = submit(&c, &base, attack).await;
        assert_blocked(status, &path, &body, attack);
    }
}

#[tokio::test]
async fn crafted_result_url_returns_home() {
    let base = base_url().await;
    let resp = client()
        .get(format!(
            "{}/result.html?message=%3Cscript%3Ealert(1)%3C%2Fscript%3E",
            base
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/index.html");
}
