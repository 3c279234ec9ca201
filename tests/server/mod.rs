use actix_web::{App, HttpResponse, HttpServer, web};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A page with every tag family complete; scores 100 under both scoring laws.
#[allow(dead_code)]
pub const OPTIMIZED_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Rust Meta Tag Auditing Guide for Modern Web Teams</title>
    <meta name="description" content="Learn how to audit, score and improve the meta tags that control how your pages appear in search results and social previews.">
    <link rel="canonical" href="https://example.com/guide">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="robots" content="index, follow">
    <meta name="language" content="en">
    <meta name="author" content="Example Team">
    <meta name="keywords" content="rust, seo, meta tags">
    <meta property="og:title" content="Rust Meta Tag Auditing Guide">
    <meta property="og:description" content="Audit and improve your meta tags.">
    <meta property="og:image" content="https://example.com/cover.png">
    <meta property="og:url" content="https://example.com/guide">
    <meta property="og:type" content="article">
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="Rust Meta Tag Auditing Guide">
    <meta name="twitter:description" content="Audit and improve your meta tags.">
    <meta name="twitter:image" content="https://example.com/cover.png">
</head>
<body><h1>Guide</h1></body>
</html>"#;

/// A page whose `<head>` declares nothing at all.
const EMPTY_HEAD_HTML: &str = "<html><head></head><body><p>Nothing here.</p></body></html>";

/// A page with a too-short title and only part of the Open Graph family.
const PARTIAL_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Tiny</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta property="og:title" content="Tiny Page">
    <meta property="og:description" content="A page that forgot most of its tags.">
</head>
<body></body>
</html>"#;

fn html(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn optimized() -> HttpResponse {
    html(OPTIMIZED_HTML)
}

async fn empty_head() -> HttpResponse {
    html(EMPTY_HEAD_HTML)
}

async fn partial() -> HttpResponse {
    html(PARTIAL_HTML)
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().body("Not Found")
}

async fn server_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("Error")
}

async fn counted(hits: web::Data<AtomicUsize>) -> HttpResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    html(OPTIMIZED_HTML)
}

/// Starts a fixture server on an ephemeral port.
///
/// Returns the base URL and the request counter behind the `/counted`
/// route, so tests can prove whether a request hit the network.
pub async fn spawn_fixture_server() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_data = web::Data::from(hits.clone());

    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(hits_data.clone())
            .route("/optimized", web::get().to(optimized))
            .route("/empty-head", web::get().to(empty_head))
            .route("/partial", web::get().to(partial))
            .route("/not-found", web::get().to(not_found))
            .route("/server-error", web::get().to(server_error))
            .route("/counted", web::get().to(counted))
    })
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    (url, hits)
}
