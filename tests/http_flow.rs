mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use ozinshe_api::{dto::auth::Claims, entity::users::Role, routes::create_app};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{JWT_SECRET, create_user, setup_state};

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

async fn login(app: &Router, email: &str, password: &str) -> anyhow::Result<String> {
    let (status, body) = send(
        app,
        "POST",
        "/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["token"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("no token in {body}"))
}

#[tokio::test]
async fn signup_login_and_profile() -> anyhow::Result<()> {
    let app = create_app(setup_state().await?);

    let (status, body) = send(
        &app,
        "POST",
        "/signup",
        None,
        Some(json!({ "email": "a@x.com", "password": "pass1", "password_repeat": "pass1" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["id"].is_string());
    assert_eq!(body["data"]["role"], "user");

    let (status, _) = send(
        &app,
        "POST",
        "/signup",
        None,
        Some(json!({ "email": "a@x.com", "password": "pass1", "password_repeat": "pass1" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/signup",
        None,
        Some(json!({ "email": "b@x.com", "password": "pass1", "password_repeat": "pass2" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "wrong" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let token = login(&app, "a@x.com", "pass1").await?;

    let (status, _) = send(&app, "GET", "/editprofile", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/editprofile", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "a@x.com");

    let (status, body) = send(
        &app,
        "PUT",
        "/updateprofile",
        Some(&token),
        Some(json!({ "username": "Aigerim", "birth_date": "2000-01-31" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["username"], "Aigerim");
    assert_eq!(body["data"]["birth_date"], "2000-01-31");

    let (status, _) = send(
        &app,
        "POST",
        "/changepassword",
        Some(&token),
        Some(json!({ "password": "pass2", "password_repeat": "pass2" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    login(&app, "a@x.com", "pass2").await?;

    let (status, _) = send(&app, "POST", "/logout", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn admin_routes_require_an_admin() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    create_user(&state, Role::User, "user@x.com", "user1").await?;
    let app = create_app(state);

    let body = json!({ "name": "Horror" });
    let (status, _) = send(&app, "POST", "/admin/category/create", None, Some(body.clone())).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user_token = login(&app, "user@x.com", "user1").await?;
    let (status, _) = send(
        &app,
        "POST",
        "/admin/category/create",
        Some(&user_token),
        Some(body.clone()),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_token = login(&app, "admin@x.com", "admin1").await?;
    let (status, created) = send(
        &app,
        "POST",
        "/admin/category/create",
        Some(&admin_token),
        Some(body.clone()),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{created}");

    let (status, _) = send(
        &app,
        "POST",
        "/admin/category/create",
        Some(&admin_token),
        Some(body),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, listed) = send(&app, "GET", "/categories", Some(&user_token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"][0]["name"], "Horror");

    let (status, _) = send(
        &app,
        "GET",
        "/admin/category/not-a-uuid/edit",
        Some(&admin_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn expired_or_foreign_tokens_are_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, Role::User, "user@x.com", "user1").await?;
    let app = create_app(state);

    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user.user_id.to_string(),
        email: user.email.clone(),
        role: Role::User,
        iat: now - 7200,
        exp: now - 3600,
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )?;
    let (status, _) = send(&app, "GET", "/home", Some(&expired), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let foreign = encode(
        &Header::default(),
        &Claims {
            exp: now + 3600,
            ..claims
        },
        &EncodingKey::from_secret(b"someone-else"),
    )?;
    let (status, _) = send(&app, "GET", "/home", Some(&foreign), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/home", Some("garbage"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn feed_and_favorites_over_http() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    create_user(&state, Role::User, "user@x.com", "user1").await?;
    let app = create_app(state);
    let admin = login(&app, "admin@x.com", "admin1").await?;
    let user = login(&app, "user@x.com", "user1").await?;

    let mut ids = Vec::new();
    for (uri, name) in [
        ("/admin/type/create", "Serial"),
        ("/admin/agecategory/create", "12+"),
        ("/admin/category/create", "Anime"),
    ] {
        let (status, body) =
            send(&app, "POST", uri, Some(&admin), Some(json!({ "name": name }))).await?;
        assert_eq!(status, StatusCode::OK, "{body}");
        ids.push(body["data"]["id"].clone());
    }

    let (status, movie) = send(
        &app,
        "POST",
        "/admin/movie/create",
        Some(&admin),
        Some(json!({
            "name": "Lanterns",
            "type_id": ids[0],
            "age_category_id": ids[1],
            "category_ids": [ids[2]],
            "year": 2019,
            "timing": 24,
            "cover": "https://cdn.example.com/lanterns.jpg"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{movie}");
    let movie_id = movie["data"]["id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/admin/movie/{movie_id}/season/create"),
        Some(&admin),
        Some(json!({ "videos": ["e1", "e2"] })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/movie/{movie_id}/series/1/2"),
        Some(&user),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["link"], "e2");

    let (status, body) = send(&app, "GET", "/serials", Some(&user), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Lanterns");
    assert_eq!(body["data"][0]["categories"][0], "Anime");

    let (status, _) = send(&app, "GET", "/search", Some(&user), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = send(&app, "GET", "/search?search=lant", Some(&user), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let favorite = format!("/movie/{movie_id}/favorite");
    let (status, _) = send(&app, "POST", &favorite, Some(&user), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "POST", &favorite, Some(&user), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "GET", "/movie/favorite", Some(&user), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["movie_id"], movie_id.as_str());

    let (status, body) = send(&app, "GET", &format!("/movie/{movie_id}"), Some(&user), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_favorite"], true);
    assert_eq!(body["data"]["watch_count"], 1);
    assert_eq!(body["data"]["seasons"][0]["videos"][1]["link"], "e2");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/movie/{movie_id}/delete"),
        Some(&admin),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/movie/favorite", Some(&user), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _) = send(&app, "GET", "/nowhere", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
