mod common;

use auth::Role;
use common::TestApp;
use common::STRONG_PASSWORD;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_success_returns_guest_without_hash() {
    let app = TestApp::spawn().await;

    let response = app.register("u@x.com", "U", STRONG_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["email"], "u@x.com");
    assert_eq!(body["data"]["name"], "U");
    assert_eq!(body["data"]["role"], "GUEST");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_weak_password_lists_violations() {
    let app = TestApp::spawn().await;

    let response = app.register("a@b.co", "A", "Weak1").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    let message = body["data"]["message"].as_str().unwrap();
    assert!(message.contains("at least 8 characters"));
    assert!(message.contains("special character"));
    assert_eq!(app.identities.count_by_email("a@b.co").await, 0);
}

#[tokio::test]
async fn test_register_requesting_owner_is_forbidden() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "sneaky@x.com",
            "name": "Sneaky",
            "password": STRONG_PASSWORD,
            "role": "OWNER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Cannot create owner via registration"
    );
    assert_eq!(app.identities.count_by_email("sneaky@x.com").await, 0);
}

#[tokio::test]
async fn test_register_requesting_guest_is_allowed() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "guest@x.com",
            "name": "Guest",
            "password": STRONG_PASSWORD,
            "role": "GUEST"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    let first = app.register("dup@x.com", "First", STRONG_PASSWORD).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.register("dup@x.com", "Second", "Another1!").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Email already registered");
    assert_eq!(app.identities.count_by_email("dup@x.com").await, 1);
}

#[tokio::test]
async fn test_concurrent_registrations_one_wins() {
    let app = TestApp::spawn().await;

    let attempts = (0..5).map(|_| app.register("race@x.com", "Racer", STRONG_PASSWORD));
    let responses = futures::future::join_all(attempts).await;

    let created = responses
        .iter()
        .filter(|response| response.status() == StatusCode::CREATED)
        .count();
    let conflicts = responses
        .iter()
        .filter(|response| response.status() == StatusCode::CONFLICT)
        .count();

    assert_eq!(created, 1);
    assert_eq!(conflicts, 4);
    assert_eq!(app.identities.count_by_email("race@x.com").await, 1);
}

#[tokio::test]
async fn test_login_sets_cookie_and_returns_guest_token() {
    let app = TestApp::spawn().await;
    app.register("u@x.com", "U", STRONG_PASSWORD).await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "u@x.com", "password": STRONG_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .expect("Missing Set-Cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("jwt="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=3600"));
    assert!(!cookie.contains("Secure"));

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Login successful");
    assert_eq!(body["data"]["user"]["email"], "u@x.com");

    let token = body["data"]["access_token"].as_str().unwrap();
    let claims = app.jwt_handler.verify(token).expect("Token should verify");
    assert_eq!(claims.role, Role::Guest);
    assert_eq!(claims.email, "u@x.com");
    assert_eq!(claims.name, "U");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("u@x.com", "U", STRONG_PASSWORD).await;

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({ "email": "u@x.com", "password": "Wrong123!" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_email = app
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@x.com", "password": STRONG_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_me_with_cookie_session() {
    let app = TestApp::spawn().await;
    app.register("u@x.com", "U", STRONG_PASSWORD).await;
    app.login_token("u@x.com", STRONG_PASSWORD).await;

    // The shared client now carries the jwt cookie
    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["email"], "u@x.com");
    assert_eq!(body["data"]["role"], "GUEST");
}

#[tokio::test]
async fn test_me_with_bearer_token() {
    let app = TestApp::spawn().await;
    let token = app.guest_token("bearer@x.com").await;

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["email"], "bearer@x.com");
}

#[tokio::test]
async fn test_missing_or_invalid_token_is_unauthenticated() {
    let app = TestApp::spawn().await;

    let missing = TestApp::client()
        .get(app.url("/api/products"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["data"]["message"], "Please login to continue");

    let forged = app
        .get_authenticated("/api/products", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);

    let body: Value = forged.json().await.unwrap();
    assert_eq!(body["data"]["message"], "Please login to continue");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::spawn().await;
    app.register("u@x.com", "U", STRONG_PASSWORD).await;
    app.login_token("u@x.com", STRONG_PASSWORD).await;

    let response = app
        .post("/api/auth/logout")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let after = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_guest_cannot_create_product() {
    let app = TestApp::spawn().await;
    let token = app.guest_token("guest@x.com").await;

    let response = app
        .post_authenticated("/api/products", &token)
        .json(&json!({ "name": "Lamp", "price": 25.0, "category": "Home" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_manages_catalog_and_guest_reads_it() {
    let app = TestApp::spawn().await;
    let owner_token = app.owner_token("owner@x.com").await;
    let guest_token = app.guest_token("guest@x.com").await;

    let owner_id = app.jwt_handler.verify(&owner_token).unwrap().sub;

    let mut product_ids = Vec::new();
    for (name, price, category) in [("Lamp", 40.0, "Home"), ("Mug", 8.5, "Home"), ("Cap", 15.0, "Apparel")] {
        let response = app
            .post_authenticated("/api/products", &owner_token)
            .json(&json!({ "name": name, "price": price, "category": category }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["data"]["owner_id"], owner_id.as_str());
        product_ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let response = app
        .get_authenticated("/api/products?category=Home&sort=asc", &guest_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Mug", "Lamp"]);

    let path = format!("/api/products/{}", product_ids[0]);

    let guest_update = app
        .patch_authenticated(&path, &guest_token)
        .json(&json!({ "price": 1.0 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(guest_update.status(), StatusCode::FORBIDDEN);

    let owner_update = app
        .patch_authenticated(&path, &owner_token)
        .json(&json!({ "price": 42.0 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(owner_update.status(), StatusCode::OK);
    let body: Value = owner_update.json().await.unwrap();
    assert_eq!(body["data"]["price"], 42.0);

    let guest_delete = app
        .delete_authenticated(&path, &guest_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(guest_delete.status(), StatusCode::FORBIDDEN);

    let owner_delete = app
        .delete_authenticated(&path, &owner_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(owner_delete.status(), StatusCode::NO_CONTENT);

    let gone = app
        .get_authenticated(&path, &guest_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_rejects_negative_price() {
    let app = TestApp::spawn().await;
    let owner_token = app.owner_token("owner@x.com").await;

    let response = app
        .post_authenticated("/api/products", &owner_token)
        .json(&json!({ "name": "Lamp", "price": -1.0, "category": "Home" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_identity_endpoints_require_self_or_owner() {
    let app = TestApp::spawn().await;
    let alice_token = app.guest_token("alice@x.com").await;
    let bob_token = app.guest_token("bob@x.com").await;
    let owner_token = app.owner_token("owner@x.com").await;

    let alice_id = app.jwt_handler.verify(&alice_token).unwrap().sub;
    let path = format!("/api/users/{}", alice_id);

    let own = app
        .get_authenticated(&path, &alice_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(own.status(), StatusCode::OK);

    let other = app
        .get_authenticated(&path, &bob_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(other.status(), StatusCode::FORBIDDEN);

    let by_owner = app
        .get_authenticated(&path, &owner_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(by_owner.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_identity_password_is_revalidated() {
    let app = TestApp::spawn().await;
    let token = app.guest_token("u@x.com").await;
    let id = app.jwt_handler.verify(&token).unwrap().sub;
    let path = format!("/api/users/{}", id);

    let weak = app
        .patch_authenticated(&path, &token)
        .json(&json!({ "password": "short" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(weak.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let strong = app
        .patch_authenticated(&path, &token)
        .json(&json!({ "password": "Changed9?" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(strong.status(), StatusCode::OK);

    app.login_token("u@x.com", "Changed9?").await;
}

#[tokio::test]
async fn test_update_identity_email_conflict() {
    let app = TestApp::spawn().await;
    app.guest_token("taken@x.com").await;
    let token = app.guest_token("mover@x.com").await;
    let id = app.jwt_handler.verify(&token).unwrap().sub;

    let response = app
        .patch_authenticated(&format!("/api/users/{}", id), &token)
        .json(&json!({ "email": "taken@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_identity_keeps_token_valid_until_expiry() {
    let app = TestApp::spawn().await;
    let token = app.guest_token("gone@x.com").await;
    let id = app.jwt_handler.verify(&token).unwrap().sub;
    let path = format!("/api/users/{}", id);

    let deleted = app
        .delete_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // Tokens are not revoked; the identity itself is gone
    let me = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(me.status(), StatusCode::OK);

    let lookup = app
        .get_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(lookup.status(), StatusCode::NOT_FOUND);
}
