//! Integration tests for the request inspection, phone form and posts pages.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;

use web_labs_integration_tests::{TestContext, set_cookie_value};

// =============================================================================
// Basics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::spawn().await.unwrap();

    let response = ctx.get("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_home_shows_request_url() {
    let ctx = TestContext::spawn().await.unwrap();

    let body = ctx.get_text("/?lab=1").await.unwrap();
    assert!(body.contains(&ctx.url("/?lab=1")));
    assert!(body.contains("<title>"));
}

#[tokio::test]
async fn test_static_css_served() {
    let ctx = TestContext::spawn().await.unwrap();

    let response = ctx.get("/static/css/main.css").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Request Inspection
// =============================================================================

#[tokio::test]
async fn test_args_lists_query_parameters() {
    let ctx = TestContext::spawn().await.unwrap();

    let body = ctx.get_text("/args?name=Bob&lab=2").await.unwrap();
    assert!(body.contains("<td>name</td><td>Bob</td>"));
    assert!(body.contains("<td>lab</td><td>2</td>"));
}

#[tokio::test]
async fn test_headers_lists_request_headers() {
    let ctx = TestContext::spawn().await.unwrap();

    let response = ctx
        .client
        .get(ctx.url("/headers"))
        .header("x-lab-header", "hello")
        .send()
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("<td>X-Lab-Header</td><td>hello</td>"));
    assert!(body.contains("<td>Host</td>"));
}

#[tokio::test]
async fn test_cookies_toggle_demo_cookie() {
    let ctx = TestContext::spawn().await.unwrap();

    let response = ctx.get("/cookies").await.unwrap();
    assert_eq!(set_cookie_value(&response, "name").as_deref(), Some("Bob"));

    let response = ctx.get("/cookies").await.unwrap();
    assert_eq!(set_cookie_value(&response, "name").as_deref(), Some(""));
    let body = response.text().await.unwrap();
    assert!(body.contains("<td>name</td><td>Bob</td>"));

    // Removed again, so the next visit sets it.
    let response = ctx.get("/cookies").await.unwrap();
    assert_eq!(set_cookie_value(&response, "name").as_deref(), Some("Bob"));
}

#[tokio::test]
async fn test_form_echoes_fields() {
    let ctx = TestContext::spawn().await.unwrap();

    let body = ctx.get_text("/form").await.unwrap();
    assert!(body.contains("<form"));

    let body = ctx
        .post_form("/form", &[("theme", "Flask"), ("text", "Привет")])
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("<td>theme</td><td>Flask</td>"));
    assert!(body.contains("<td>text</td><td>Привет</td>"));
}

// =============================================================================
// Phone Form
// =============================================================================

async fn check_phone(ctx: &TestContext, phone: &str) -> String {
    ctx.post_form("/phone_form", &[("phone", phone)])
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_phone_form_page() {
    let ctx = TestContext::spawn().await.unwrap();

    let body = ctx.get_text("/phone_form").await.unwrap();
    assert!(body.contains(r#"name="phone""#));
    assert!(!body.contains("Недопустимый ввод"));
}

#[tokio::test]
async fn test_phone_form_formats_valid_numbers() {
    let ctx = TestContext::spawn().await.unwrap();

    for phone in [
        "+7 (123) 456-75-90",
        "8(123)4567590",
        "123.456.75.90",
        "71234567590",
    ] {
        let body = check_phone(&ctx, phone).await;
        assert!(body.contains("8-123-456-75-90"), "phone {phone}");
        assert!(!body.contains("is-invalid"), "phone {phone}");
    }
}

#[tokio::test]
async fn test_phone_form_character_mismatch() {
    let ctx = TestContext::spawn().await.unwrap();

    let body = check_phone(&ctx, "123-abc-4567").await;
    assert!(body.contains("В номере телефона встречаются недопустимые символы."));
    assert!(body.contains("is-invalid"));
}

#[tokio::test]
async fn test_phone_form_length_discrepancy() {
    let ctx = TestContext::spawn().await.unwrap();

    for phone in ["123", "12345678901", "", "   "] {
        let body = check_phone(&ctx, phone).await;
        assert!(body.contains("Неверное количество цифр."), "phone {phone:?}");
        assert!(!body.contains("8-123"), "phone {phone:?}");
    }
}

// =============================================================================
// Posts
// =============================================================================

#[tokio::test]
async fn test_posts_listing() {
    let ctx = TestContext::spawn().await.unwrap();

    let body = ctx.get_text("/posts").await.unwrap();
    assert!(body.contains("Последние посты"));
    assert!(body.contains(r#"href="/posts/0""#));
}

#[tokio::test]
async fn test_post_detail_shows_comments_and_form() {
    let ctx = TestContext::spawn().await.unwrap();

    let response = ctx.get("/posts/0").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Маршрутизация во Flask и Axum"));
    assert!(body.contains("02.09.2024"));
    assert!(body.contains("Иван Петров"));
    assert!(body.contains("Рада, что пригодилось."));
    assert!(body.contains("Оставьте комментарий"));
    assert!(body.contains("images/routing.svg"));
}

#[tokio::test]
async fn test_post_image_served() {
    let ctx = TestContext::spawn().await.unwrap();

    let listing = ctx.get("/posts").await.unwrap().text().await.unwrap();
    assert!(listing.contains("/static/images/templates.svg"));

    let response = ctx.get("/static/images/routing.svg").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().starts_with("<svg"));
}

#[tokio::test]
async fn test_missing_post_is_404() {
    let ctx = TestContext::spawn().await.unwrap();

    let response = ctx.get("/posts/999").await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_about_page() {
    let ctx = TestContext::spawn().await.unwrap();

    let response = ctx.get("/about").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Об авторе"));
}
