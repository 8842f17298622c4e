// SPDX-License-Identifier: Apache-2.0

use pousada_server::{build_router, AppState, ServerConfig};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Twelve rooms; rooms 2 and 4 are the only capacity-2 rooms with Wi-Fi.
const SEED_SQL: &str = "
INSERT INTO rooms (id, name, description, price, capacity, image_url) VALUES
 (1, 'Suíte Master', 'Ampla e arejada', 450.0, 2, NULL),
 (2, 'Quarto Jardim', NULL, 220.0, 2, NULL),
 (3, 'Suíte Família', NULL, 380.0, 4, NULL),
 (4, 'Quarto Térreo', NULL, 260.0, 2, NULL),
 (5, 'Vista do Mar', NULL, 310.0, 3, NULL),
 (6, 'Quarto Simples', NULL, 180.0, 2, NULL),
 (7, 'Suíte Premium', NULL, 520.0, 5, NULL),
 (8, 'Quarto Solteiro', NULL, 120.0, 1, NULL),
 (9, 'Chalé da Serra', NULL, 400.0, 4, NULL),
 (10, 'Quarto Clássico', NULL, 240.0, 2, NULL),
 (11, 'Cobertura do Mar', NULL, 690.0, 6, NULL),
 (12, 'Quarto Colonial', NULL, 300.0, 3, NULL);
INSERT INTO room_features (room_id, feature_id)
 SELECT 2, id FROM features WHERE name = 'Wi-Fi';
INSERT INTO room_features (room_id, feature_id)
 SELECT 4, id FROM features WHERE name = 'Wi-Fi';
INSERT INTO room_features (room_id, feature_id)
 SELECT 3, id FROM features WHERE name = 'Wi-Fi';
INSERT INTO room_features (room_id, feature_id)
 SELECT 3, id FROM features WHERE name = 'Piscina Privativa';
INSERT INTO room_features (room_id, feature_id)
 SELECT 4, id FROM features WHERE name = 'Ar-condicionado';
";

async fn spawn_server() -> (SocketAddr, AppState, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ServerConfig {
        db_path: dir.path().join("test.db"),
        auth_secret: b"test-secret".to_vec(),
        ..ServerConfig::default()
    };
    let state = AppState::new(config);
    state.db.init().await.expect("schema bootstrap");
    state
        .db
        .run(|conn| {
            conn.execute_batch(SEED_SQL)
                .map_err(pousada_query::QueryError::from)
        })
        .await
        .expect("seed catalog");

    let app = build_router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (addr, state, dir)
}

async fn send_raw(addr: SocketAddr, request: String) -> (u16, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .expect("read response");
    let response = String::from_utf8(response).expect("utf8 response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status line");
    (status, body.to_string())
}

async fn get(addr: SocketAddr, path: &str) -> (u16, Value) {
    get_with_token(addr, path, None).await
}

async fn get_with_token(addr: SocketAddr, path: &str, token: Option<&str>) -> (u16, Value) {
    let auth = token
        .map(|t| format!("Authorization: Bearer {t}\r\n"))
        .unwrap_or_default();
    let req =
        format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\n{auth}Connection: close\r\n\r\n");
    let (status, body) = send_raw(addr, req).await;
    let value = serde_json::from_str(&body).unwrap_or(Value::Null);
    (status, value)
}

async fn post_json(
    addr: SocketAddr,
    path: &str,
    body: &Value,
    token: Option<&str>,
) -> (u16, Value) {
    let payload = body.to_string();
    let auth = token
        .map(|t| format!("Authorization: Bearer {t}\r\n"))
        .unwrap_or_default();
    let req = format!(
        "POST {path} HTTP/1.1\r\nHost: {addr}\r\n{auth}Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );
    let (status, body) = send_raw(addr, req).await;
    let value = serde_json::from_str(&body).unwrap_or(Value::Null);
    (status, value)
}

fn room_ids(body: &Value) -> Vec<i64> {
    body["rooms"]
        .as_array()
        .expect("rooms array")
        .iter()
        .map(|r| r["id"].as_i64().expect("room id"))
        .collect()
}

async fn register(addr: SocketAddr, name: &str, email: &str, password: &str) -> (u16, Value) {
    post_json(
        addr,
        "/api/auth/register",
        &json!({"name": name, "email": email, "password": password}),
        None,
    )
    .await
}

#[tokio::test]
async fn pagination_follows_the_total_pages_rule() {
    let (addr, _state, _dir) = spawn_server().await;

    let (status, body) = get(addr, "/rooms").await;
    assert_eq!(status, 200);
    assert_eq!(room_ids(&body), (1..=10).collect::<Vec<_>>());
    assert_eq!(body["pagination"]["totalRooms"], 12);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["limit"], 10);

    let (status, body) = get(addr, "/rooms?page=2").await;
    assert_eq!(status, 200);
    assert_eq!(room_ids(&body), vec![11, 12]);
    assert_eq!(body["pagination"]["currentPage"], 2);

    // Exactly one page when the catalog fits the limit.
    let (_, body) = get(addr, "/rooms?limit=12").await;
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn capacity_and_feature_filters_combine_with_and_semantics() {
    let (addr, _state, _dir) = spawn_server().await;

    let (status, body) = get(addr, "/rooms?capacity=2&wifi=true").await;
    assert_eq!(status, 200);
    assert_eq!(room_ids(&body), vec![2, 4]);

    // The feature list on each hit is the room's full set.
    let room4 = &body["rooms"][1];
    assert_eq!(
        room4["features"],
        json!(["Wi-Fi", "Ar-condicionado"])
    );
}

#[tokio::test]
async fn unknown_parameters_are_ignored() {
    let (addr, _state, _dir) = spawn_server().await;
    let (_, plain) = get(addr, "/rooms").await;
    let (_, noisy) = get(addr, "/rooms?sauna=true&utm_source=ads").await;
    assert_eq!(plain, noisy);
}

#[tokio::test]
async fn sorting_by_price_descending() {
    let (addr, _state, _dir) = spawn_server().await;
    let (status, body) = get(addr, "/rooms?orderBy=price&orderDirection=desc&limit=12").await;
    assert_eq!(status, 200);
    let prices: Vec<f64> = body["rooms"]
        .as_array()
        .expect("rooms array")
        .iter()
        .map(|r| r["price"].as_f64().expect("price"))
        .collect();
    let mut sorted = prices.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).expect("finite prices"));
    assert_eq!(prices, sorted);
    assert_eq!(room_ids(&body)[0], 11);
}

#[tokio::test]
async fn identical_queries_within_the_ttl_hit_the_cache() {
    let (addr, state, _dir) = spawn_server().await;

    let (_, first) = get(addr, "/rooms?name=mar").await;
    assert_eq!(room_ids(&first), vec![5, 11]);

    // Mutate the catalog under the cache; the second response must be served
    // from the stored entry, unchanged.
    state
        .db
        .run(|conn| {
            conn.execute("UPDATE rooms SET price = 999.0 WHERE id = 5", [])
                .map_err(pousada_query::QueryError::from)
        })
        .await
        .expect("mutate catalog");

    let (_, second) = get(addr, "/rooms?name=mar").await;
    assert_eq!(first, second);

    // The same filter spelled in a different key order shares the entry.
    let (_, reordered) = get(addr, "/rooms?limit=10&name=mar&page=1").await;
    assert_eq!(first, reordered);
}

#[tokio::test]
async fn register_login_and_duplicate_email() {
    let (addr, _state, _dir) = spawn_server().await;

    let (status, body) = register(addr, "Ana", "ana@example.com", "senha123").await;
    assert_eq!(status, 201);
    assert_eq!(body["user"]["email"], "ana@example.com");
    assert_eq!(body["favorites"], json!([]));
    assert!(body["token"].as_str().expect("token").contains('.'));

    let (status, body) = register(addr, "Outra Ana", "ana@example.com", "outra").await;
    assert_eq!(status, 409);
    assert_eq!(body, json!({"error": "Email já cadastrado"}));

    let (status, body) = post_json(
        addr,
        "/api/auth/login",
        &json!({"email": "ana@example.com", "password": "senha-errada"}),
        None,
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(body, json!({"error": "Credenciais inválidas"}));

    let (status, body) = post_json(
        addr,
        "/api/auth/login",
        &json!({"email": "ana@example.com", "password": "senha123"}),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["name"], "Ana");
    assert!(body["token"].is_string());

    let (status, body) =
        post_json(addr, "/api/auth/login", &json!({"email": "ana@example.com"}), None).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let (addr, _state, _dir) = spawn_server().await;

    let (status, body) = get(addr, "/api/auth/me").await;
    assert_eq!(status, 401);
    assert_eq!(body, json!({"error": "Token ausente"}));

    let (status, body) = get_with_token(addr, "/api/auth/me", Some("garbage.token")).await;
    assert_eq!(status, 403);
    assert_eq!(body, json!({"error": "Token inválido ou expirado"}));

    let (_, auth) = register(addr, "Ana", "ana@example.com", "senha123").await;
    let token = auth["token"].as_str().expect("token");
    let (status, body) = get_with_token(addr, "/api/auth/me", Some(token)).await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["email"], "ana@example.com");
    assert_eq!(body["favorites"], json!([]));
}

#[tokio::test]
async fn favorites_flow_and_favorite_only_search() {
    let (addr, _state, _dir) = spawn_server().await;
    let (_, auth) = register(addr, "Ana", "ana@example.com", "senha123").await;
    let token = auth["token"].as_str().expect("token");

    let (status, body) =
        post_json(addr, "/api/favorites/add", &json!({"roomId": 3}), Some(token)).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"favorites": [3]}));

    // Adding twice is a no-op.
    let (_, body) =
        post_json(addr, "/api/favorites/add", &json!({"roomId": 3}), Some(token)).await;
    assert_eq!(body, json!({"favorites": [3]}));

    let (status, body) =
        post_json(addr, "/api/favorites/add", &json!({"roomId": 999}), Some(token)).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Quarto não encontrado"}));

    let (status, _) = post_json(addr, "/api/favorites/add", &json!({"roomId": 1}), None).await;
    assert_eq!(status, 401);

    let (status, body) =
        get_with_token(addr, "/rooms?favoriteOnly=true", Some(token)).await;
    assert_eq!(status, 200);
    assert_eq!(room_ids(&body), vec![3]);

    // Without a token the favorite view is an empty page, not an error.
    let (status, body) = get(addr, "/rooms?favoriteOnly=true").await;
    assert_eq!(status, 200);
    assert_eq!(body["rooms"], json!([]));
    assert_eq!(body["pagination"]["totalRooms"], 0);
    assert_eq!(body["pagination"]["totalPages"], 1);

    let (_, body) = post_json(
        addr,
        "/api/favorites/remove",
        &json!({"roomId": 3}),
        Some(token),
    )
    .await;
    assert_eq!(body, json!({"favorites": []}));
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (addr, _state, _dir) = spawn_server().await;
    let (status, body) = get(addr, "/healthz").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "ok"}));
}
