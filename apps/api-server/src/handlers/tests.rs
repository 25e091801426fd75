use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use blog_shared::dto::{AuthResponse, CommentDto, PaginatedPostsDto, PostDto};

use super::configure_routes;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::observability::RequestIdMiddleware;
use crate::test_support::test_state;

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new($state))
                .configure(|cfg| configure_routes(cfg, RateLimitMiddleware::disabled())),
        )
        .await
    };
}

const BOUNDARY: &str = "----blog-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"upload\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn register_request(name: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "password": "password123",
        }))
}

fn create_post_request(token: &str, parts: &[Part<'_>]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(token))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart(parts))
}

macro_rules! register {
    ($app:expr, $name:expr) => {{
        let res = test::call_service(&$app, register_request($name).to_request()).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let auth: AuthResponse = test::read_body_json(res).await;
        auth
    }};
}

macro_rules! create_post {
    ($app:expr, $token:expr, $parts:expr $(,)?) => {
        test::call_service(&$app, create_post_request($token, $parts).to_request()).await
    };
}

#[actix_rt::test]
async fn test_register_me_logout_flow() {
    let (state, _) = test_state().await;
    let app = app!(state);

    let auth = register!(app, "Ada");
    assert_eq!(auth.user.name, "Ada");
    assert_eq!(auth.user.email, "ada@example.com");

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&auth.token))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["user"]["id"], auth.user.id);

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(bearer(&auth.token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    // The revoked token no longer authenticates.
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&auth.token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_login() {
    let (state, _) = test_state().await;
    let app = app!(state);
    let registered = register!(app, "Ada");

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "wrong-password" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "password123" }))
        .to_request();
    let auth: AuthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(auth.user, registered.user);
    assert!(!auth.token.is_empty());
}

#[actix_rt::test]
async fn test_register_rejects_duplicates_and_bad_input() {
    let (state, _) = test_state().await;
    let app = app!(state);
    register!(app, "Ada");

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "name": "Ada", "email": "ada@example.com", "password": "password123" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "name": "", "email": "nope", "password": "short" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
    assert!(body["request_id"].is_string());
}

#[actix_rt::test]
async fn test_posts_require_authentication() {
    let (state, _) = test_state().await;
    let app = app!(state);

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/posts")
        .insert_header(bearer("not-a-token"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_create_post_with_image_and_list_it() {
    let (state, storage) = test_state().await;
    let app = app!(state);
    let auth = register!(app, "Ada");

    let res = create_post!(
        app,
        &auth.token,
        &[
            Part::Text("title", "  Hello world  "),
            Part::Text("content", "First post"),
            Part::File {
                name: "image",
                content_type: "image/png",
                bytes: b"\x89PNG fake image",
            },
        ],
    );
    assert_eq!(res.status(), StatusCode::CREATED);
    let post: PostDto = test::read_body_json(res).await;

    assert!(post.id > 0);
    assert_eq!(post.title, "Hello world");
    assert_eq!(post.author.id, auth.user.id);
    assert!(post.comments.is_empty());
    let image = post.image.clone().unwrap();
    assert!(image.starts_with("posts/") && image.ends_with(".png"));
    assert!(storage.join(&image).exists());

    let req = test::TestRequest::get()
        .uri("/api/posts?page=1&per_page=1000")
        .insert_header(bearer(&auth.token))
        .to_request();
    let page: PaginatedPostsDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.meta.per_page, 100);
    assert_eq!(page.data, vec![post]);

    std::fs::remove_dir_all(storage).ok();
}

#[actix_rt::test]
async fn test_listing_far_past_the_last_page() {
    let (state, storage) = test_state().await;
    let app = app!(state);
    let auth = register!(app, "Ada");
    let res = create_post!(
        app,
        &auth.token,
        &[Part::Text("title", "Only"), Part::Text("content", "Body")],
    );
    assert_eq!(res.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/posts?page=18446744073709551615&per_page=100")
        .insert_header(bearer(&auth.token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let page: PaginatedPostsDto = test::read_body_json(res).await;
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.meta.current_page, u64::MAX);
    assert_eq!(page.meta.last_page, 1);
    assert_eq!((page.meta.from, page.meta.to), (None, None));

    std::fs::remove_dir_all(storage).ok();
}

#[actix_rt::test]
async fn test_invalid_post_stores_nothing() {
    let (state, storage) = test_state().await;
    let app = app!(state);
    let auth = register!(app, "Ada");

    let res = create_post!(
        app,
        &auth.token,
        &[
            Part::Text("title", "   "),
            Part::Text("content", "Body"),
            Part::File {
                name: "image",
                content_type: "image/png",
                bytes: b"\x89PNG",
            },
        ],
    );
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["errors"]["title"][0], "The title field is required.");
    assert!(!storage.join("posts").exists());

    let res = create_post!(
        app,
        &auth.token,
        &[
            Part::Text("title", "Title"),
            Part::Text("content", "Body"),
            Part::File {
                name: "image",
                content_type: "application/pdf",
                bytes: b"%PDF",
            },
        ],
    );
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["errors"]["image"][0], "The image field must be an image.");
    assert!(!storage.join("posts").exists());
}

#[actix_rt::test]
async fn test_comments() {
    let (state, _) = test_state().await;
    let app = app!(state);
    let ada = register!(app, "Ada");
    let bob = register!(app, "Bob");

    let res = create_post!(
        app,
        &ada.token,
        &[Part::Text("title", "Title"), Part::Text("content", "Body")],
    );
    let post: PostDto = test::read_body_json(res).await;
    assert_eq!(post.image, None);

    let req = test::TestRequest::post()
        .uri("/api/posts/9999/comments")
        .insert_header(bearer(&bob.token))
        .set_json(json!({ "content": "Hello?" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .insert_header(bearer(&bob.token))
        .set_json(json!({ "content": "" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .insert_header(bearer(&bob.token))
        .set_json(json!({ "content": "  Nice post  " }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let comment: CommentDto = test::read_body_json(res).await;
    assert_eq!(comment.content, "Nice post");
    assert_eq!(comment.post_id, post.id);
    assert_eq!(comment.author.name, "Bob");

    let req = test::TestRequest::get()
        .uri("/api/posts")
        .insert_header(bearer(&ada.token))
        .to_request();
    let page: PaginatedPostsDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page.data[0].comments, vec![comment]);
}

#[actix_rt::test]
async fn test_health() {
    let (state, _) = test_state().await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}
