//! In-memory imitation of a slice of the OneID API.
//!
//! Enough of the real surface to drive the client end to end: resident
//! registration and login with bearer tokens, a profile behind auth,
//! reference data, a PDF download, app-scoped routes, and `/echo/*`, which
//! reflects whatever request it receives. `/redirect/*` answers 302 towards
//! `/echo/followed`.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Bytes served for certificate application 1.
pub const SAMPLE_PDF: &[u8] = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj <<>> endobj\n%%EOF\n";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Resident {
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

pub type Db = Arc<RwLock<HashMap<String, Resident>>>;

pub fn app() -> Router {
    let mut residents = HashMap::new();
    residents.insert(
        "alice".to_string(),
        Resident {
            id: 1,
            username: "alice".to_string(),
            password: "pw".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Reyes".to_string(),
        },
    );
    let db: Db = Arc::new(RwLock::new(residents));
    Router::new()
        .route("/auth/resident/login", post(login))
        .route("/auth/resident/register", post(register))
        .route("/resident/hello", get(hello))
        .route("/resident/profile", get(profile))
        .route("/resident/update_avatar", post(update_avatar))
        .route(
            "/resident/certificates/applications/{id}/download",
            get(download_certificate),
        )
        .route("/genders", get(genders))
        .route("/municipalities", get(municipalities))
        .route("/municipalities/{id}/barangays", get(barangays))
        .route("/apps/{key}/{*endpoint}", any(app_endpoint))
        .route("/echo/{*rest}", any(echo))
        .route("/redirect/{*rest}", any(redirect))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn token_for(username: &str) -> String {
    format!("token-{username}")
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Unauthenticated."})),
    )
        .into_response()
}

async fn login(State(db): State<Db>, Json(input): Json<Credentials>) -> Response {
    let residents = db.read().await;
    match residents.get(&input.username) {
        Some(resident) if resident.password == input.password => {
            tracing::info!(username = %resident.username, "resident logged in");
            Json(json!({"token": token_for(&resident.username), "resident": resident})).into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials."})),
        )
            .into_response(),
    }
}

async fn register(State(db): State<Db>, Json(input): Json<Registration>) -> Response {
    let mut residents = db.write().await;
    if residents.contains_key(&input.username) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "The username has already been taken."})),
        )
            .into_response();
    }
    let resident = Resident {
        id: residents.len() as u64 + 1,
        username: input.username,
        password: input.password,
        first_name: input.first_name,
        last_name: input.last_name,
    };
    residents.insert(resident.username.clone(), resident.clone());
    (StatusCode::CREATED, Json(resident)).into_response()
}

async fn hello() -> &'static str {
    "hello, resident"
}

async fn profile(State(db): State<Db>, headers: HeaderMap) -> Response {
    let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    else {
        return unauthorized();
    };
    let residents = db.read().await;
    match residents.values().find(|r| token_for(&r.username) == token) {
        Some(resident) => Json(resident.clone()).into_response(),
        None => unauthorized(),
    }
}

async fn update_avatar(headers: HeaderMap) -> StatusCode {
    if headers.contains_key(header::AUTHORIZATION) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::UNAUTHORIZED
    }
}

async fn download_certificate(Path(id): Path<u64>) -> Response {
    if id == 1 {
        ([(header::CONTENT_TYPE, "application/pdf")], SAMPLE_PDF).into_response()
    } else {
        (StatusCode::NOT_FOUND, "certificate application not found").into_response()
    }
}

async fn genders() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "Male"},
        {"id": 2, "name": "Female"},
    ]))
}

fn all_municipalities() -> Vec<Value> {
    vec![
        json!({"id": 10, "province_id": 5, "name": "Tagbilaran"}),
        json!({"id": 11, "province_id": 5, "name": "Panglao"}),
        json!({"id": 20, "province_id": 6, "name": "Dumaguete"}),
    ]
}

async fn municipalities(Query(params): Query<HashMap<String, String>>) -> Json<Vec<Value>> {
    let province = params.get("province_id").and_then(|p| p.parse::<u64>().ok());
    let list = all_municipalities()
        .into_iter()
        .filter(|m| province.map_or(true, |p| m["province_id"] == p))
        .collect();
    Json(list)
}

async fn barangays(Path(id): Path<u64>) -> Response {
    if all_municipalities().iter().any(|m| m["id"] == id) {
        Json(json!([{"id": id * 100 + 1, "name": "Poblacion"}])).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Municipality not found."})),
        )
            .into_response()
    }
}

async fn app_endpoint(method: Method, Path((key, endpoint)): Path<(String, String)>) -> Json<Value> {
    Json(json!({"app_key": key, "endpoint": endpoint, "method": method.as_str()}))
}

async fn redirect() -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, "/echo/followed")],
        Json(json!({"moved": true})),
    )
        .into_response()
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let headers: Vec<Value> = headers
        .iter()
        .map(|(name, value)| json!([name.as_str(), value.to_str().unwrap_or_default()]))
        .collect();
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resident_serialization_hides_password() {
        let resident = Resident {
            id: 1,
            username: "alice".to_string(),
            password: "pw".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Reyes".to_string(),
        };
        let json = serde_json::to_value(&resident).unwrap();
        assert_eq!(json["username"], "alice");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn registration_requires_all_fields() {
        let result: Result<Registration, _> = serde_json::from_str(r#"{"username":"bob"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn tokens_are_per_username() {
        assert_eq!(token_for("alice"), "token-alice");
        assert_ne!(token_for("alice"), token_for("bob"));
    }
}
