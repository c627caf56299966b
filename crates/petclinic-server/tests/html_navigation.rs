// SPDX-License-Identifier: Apache-2.0

//! Full-page versus fragment rendering and the htmx history contract.

mod support;

use support::{get, get_htmx, header_value, send_raw, spawn_app, COLEMAN_ID};

#[tokio::test]
async fn welcome_page_renders_with_navbar() {
    let addr = spawn_app().await;
    let (status, _, body) = get(addr, "/").await;
    assert_eq!(status, 200);
    assert!(body.contains("<html"));
    assert!(body.contains("Welcome"));
    assert!(body.contains("Find owners"));
    assert!(body.contains("Veterinarians"));
}

#[tokio::test]
async fn htmx_requests_get_the_bare_fragment() {
    let addr = spawn_app().await;

    let (status, _, page) = get(addr, "/owners/find").await;
    assert_eq!(status, 200);
    assert!(page.contains("<html"));
    assert!(page.contains("Find Owners"));

    let (status, _, fragment) = get_htmx(addr, "/owners/find").await;
    assert_eq!(status, 200);
    assert!(!fragment.contains("<html"));
    assert!(fragment.contains("Find Owners"));
}

#[tokio::test]
async fn history_restore_requests_get_the_full_page() {
    let addr = spawn_app().await;
    // htmx sends HX-Request: false when restoring from history
    let (status, _, body) = send_raw(
        addr,
        "GET",
        "/owners/find",
        &[("HX-Request", "false")],
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains("<html"));
}

#[tokio::test]
async fn navigable_fragments_push_their_url() {
    let addr = spawn_app().await;

    for path in [
        format!("/owners/{COLEMAN_ID}"),
        format!("/owners/{COLEMAN_ID}/edit"),
        format!("/owners/{COLEMAN_ID}/pets/new"),
        format!("/owners/{COLEMAN_ID}/pets/7/edit"),
        format!("/owners/{COLEMAN_ID}/pets/7/visits/new"),
    ] {
        let (status, head, _) = get_htmx(addr, &path).await;
        assert_eq!(status, 200, "{path}");
        assert_eq!(header_value(&head, "hx-push-url"), Some(path.as_str()));
    }

    // The find form is reached by plain navigation; nothing to push.
    let (_, head, _) = get_htmx(addr, "/owners/find").await;
    assert_eq!(header_value(&head, "hx-push-url"), None);

    // Plain requests never get the header.
    let (_, head, _) = get(addr, &format!("/owners/{COLEMAN_ID}")).await;
    assert_eq!(header_value(&head, "hx-push-url"), None);
}

#[tokio::test]
async fn stylesheet_is_served_for_the_layout_link() {
    let addr = spawn_app().await;
    let (status, head, body) = get(addr, "/static/petclinic.css").await;
    assert_eq!(status, 200);
    assert_eq!(header_value(&head, "content-type"), Some("text/css"));
    assert!(body.contains(".navbar-default"));
}

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let addr = spawn_app().await;

    let (_, head, _) = get(addr, "/").await;
    let id = header_value(&head, "x-request-id").expect("generated request id");
    assert!(id.starts_with("req-"));

    let (_, head, _) = send_raw(addr, "GET", "/", &[("x-request-id", "caller-7")], None).await;
    assert_eq!(header_value(&head, "x-request-id"), Some("caller-7"));
}
