// SPDX-License-Identifier: Apache-2.0

//! Pet and visit form round-trips, including the duplicate-name rule and
//! date binding failures.

mod support;

use support::{get, header_value, post_form, spawn_app, COLEMAN_ID, SAMANTHA_ID};

#[tokio::test]
async fn pet_form_offers_the_known_types() {
    let addr = spawn_app().await;
    let (status, _, body) = get(addr, &format!("/owners/{COLEMAN_ID}/pets/new")).await;
    assert_eq!(status, 200);
    assert!(body.contains("Jean Coleman"));
    for option in ["cat", "dog", "lizard", "snake", "bird", "hamster"] {
        assert!(body.contains(option), "missing type option {option}");
    }
}

#[tokio::test]
async fn adding_a_pet_redirects_to_the_owner() {
    let addr = spawn_app().await;
    let (status, head, _) = post_form(
        addr,
        &format!("/owners/{COLEMAN_ID}/pets/new"),
        "name=Rex&birth_date=2020-01-01&type=dog",
    )
    .await;
    assert_eq!(status, 303);
    assert_eq!(
        header_value(&head, "location"),
        Some(format!("/owners/{COLEMAN_ID}").as_str())
    );

    let (_, _, details) = get(addr, &format!("/owners/{COLEMAN_ID}")).await;
    assert!(details.contains("Rex"));
    assert!(details.contains("dog"));
}

#[tokio::test]
async fn a_new_pet_must_not_reuse_an_existing_name() {
    let addr = spawn_app().await;
    let (status, _, body) = post_form(
        addr,
        &format!("/owners/{COLEMAN_ID}/pets/new"),
        "name=Samantha&birth_date=2020-01-01&type=cat",
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains("already exists"));
}

#[tokio::test]
async fn pet_binding_failures_become_field_errors() {
    let addr = spawn_app().await;

    let (status, _, body) = post_form(
        addr,
        &format!("/owners/{COLEMAN_ID}/pets/new"),
        "name=Rex&birth_date=not-a-date&type=dog",
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains("must be a valid date"));

    let (status, _, body) = post_form(
        addr,
        &format!("/owners/{COLEMAN_ID}/pets/new"),
        "name=Rex&birth_date=2999-01-01&type=dog",
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains("must not be in the future"));

    let (status, _, body) = post_form(
        addr,
        &format!("/owners/{COLEMAN_ID}/pets/new"),
        "name=&birth_date=2020-01-01&type=",
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains("must not be blank"));
    assert!(body.contains("is required"));
}

#[tokio::test]
async fn editing_a_pet_keeps_its_own_name_valid() {
    let addr = spawn_app().await;
    // saving under the unchanged name is not a duplicate
    let (status, head, _) = post_form(
        addr,
        &format!("/owners/{COLEMAN_ID}/pets/{SAMANTHA_ID}/edit"),
        "name=Samantha&birth_date=2012-09-04&type=cat",
    )
    .await;
    assert_eq!(status, 303);
    assert_eq!(
        header_value(&head, "location"),
        Some(format!("/owners/{COLEMAN_ID}").as_str())
    );
}

#[tokio::test]
async fn unknown_pet_is_a_not_found_page() {
    let addr = spawn_app().await;
    let (status, _, body) = get(addr, &format!("/owners/{COLEMAN_ID}/pets/999/edit")).await;
    assert_eq!(status, 404);
    assert!(body.contains("pet 999 not found"));
}

#[tokio::test]
async fn visit_form_shows_the_pet_and_its_history() {
    let addr = spawn_app().await;
    let (status, _, body) = get(
        addr,
        &format!("/owners/{COLEMAN_ID}/pets/{SAMANTHA_ID}/visits/new"),
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains("Samantha"));
    assert!(body.contains("rabies shot"));
}

#[tokio::test]
async fn adding_a_visit_redirects_to_the_owner() {
    let addr = spawn_app().await;
    let (status, head, _) = post_form(
        addr,
        &format!("/owners/{COLEMAN_ID}/pets/{SAMANTHA_ID}/visits/new"),
        "date=2024-01-15&description=checkup",
    )
    .await;
    assert_eq!(status, 303);
    assert_eq!(
        header_value(&head, "location"),
        Some(format!("/owners/{COLEMAN_ID}").as_str())
    );

    let (_, _, details) = get(addr, &format!("/owners/{COLEMAN_ID}")).await;
    assert!(details.contains("checkup"));
}

#[tokio::test]
async fn a_visit_requires_a_description() {
    let addr = spawn_app().await;
    let (status, _, body) = post_form(
        addr,
        &format!("/owners/{COLEMAN_ID}/pets/{SAMANTHA_ID}/visits/new"),
        "date=2024-01-15&description=",
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains("must not be blank"));
    // the submitted date survives the round trip
    assert!(body.contains("value=\"2024-01-15\""));
}
