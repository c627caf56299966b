// SPDX-License-Identifier: Apache-2.0

//! Shared harness: a server on an ephemeral port over a seeded fake
//! store, talked to over raw HTTP so header behavior is asserted exactly
//! as a client sees it.

// Not every test file uses every helper.
#![allow(dead_code)]

use chrono::NaiveDate;
use petclinic_model::{Owner, Pet, PetType, Vet, Visit};
use petclinic_server::{build_router, AppState, ServerConfig};
use petclinic_store::FakeStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const COLEMAN_ID: i64 = 6;
pub const SAMANTHA_ID: i64 = 7;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn owner(id: i64, first: &str, last: &str, pets: Vec<Pet>) -> Owner {
    Owner {
        id: Some(id),
        first_name: first.to_string(),
        last_name: last.to_string(),
        address: "110 W. Liberty St.".to_string(),
        city: "Madison".to_string(),
        telephone: "6085551023".to_string(),
        pets,
    }
}

/// Fake store seeded with one uniquely-named owner (Coleman, one cat with
/// one visit) and two owners sharing a last name (Davis), so the owner
/// search can hit all three of its outcomes.
async fn seeded_store() -> FakeStore {
    let store = FakeStore::with_defaults();
    store
        .seed_owner(owner(
            COLEMAN_ID,
            "Jean",
            "Coleman",
            vec![Pet {
                id: Some(SAMANTHA_ID),
                name: "Samantha".to_string(),
                birth_date: date(2012, 9, 4),
                pet_type: PetType {
                    id: 1,
                    name: "cat".to_string(),
                },
                visits: vec![Visit {
                    id: Some(1),
                    date: date(2013, 1, 1),
                    description: "rabies shot".to_string(),
                }],
            }],
        ))
        .await;
    store.seed_owner(owner(2, "Betty", "Davis", Vec::new())).await;
    store.seed_owner(owner(4, "Harold", "Davis", Vec::new())).await;
    store
        .seed_vets(vec![
            Vet {
                id: 1,
                first_name: "James".to_string(),
                last_name: "Carter".to_string(),
                specialties: Vec::new(),
            },
            Vet {
                id: 3,
                first_name: "Linda".to_string(),
                last_name: "Douglas".to_string(),
                specialties: vec!["dentistry".to_string(), "surgery".to_string()],
            },
        ])
        .await;
    store
}

pub async fn spawn_app() -> SocketAddr {
    let state = AppState::new(Arc::new(seeded_store().await), ServerConfig::default());
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

pub async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(payload) = body {
        req.push_str("Content-Type: application/x-www-form-urlencoded\r\n");
        req.push_str(&format!("Content-Length: {}\r\n", payload.len()));
    }
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    req.push_str("\r\n");
    if let Some(payload) = body {
        req.push_str(payload);
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

pub async fn get(addr: SocketAddr, path: &str) -> (u16, String, String) {
    send_raw(addr, "GET", path, &[], None).await
}

pub async fn get_htmx(addr: SocketAddr, path: &str) -> (u16, String, String) {
    send_raw(addr, "GET", path, &[("HX-Request", "true")], None).await
}

pub async fn post_form(addr: SocketAddr, path: &str, body: &str) -> (u16, String, String) {
    send_raw(addr, "POST", path, &[], Some(body)).await
}

pub fn header_value<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        if k.trim().eq_ignore_ascii_case(name) {
            Some(v.trim())
        } else {
            None
        }
    })
}
