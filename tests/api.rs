use resume_generator::auth::AuthConfig;
use resume_generator::core::Database;
use resume_generator::web::{build_rocket, AppContext, ScoringService, ServerConfig};
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

async fn client(dir: &TempDir) -> Client {
    let database = Database::new(&dir.path().join("test.db")).await.unwrap();
    let context = AppContext {
        server: ServerConfig {
            output_dir: dir.path().join("out"),
        },
        auth: AuthConfig::new("test-secret".to_string(), 1, 4),
        database,
        scoring: ScoringService { client: None },
    };

    let figment = rocket::Config::figment().merge(("log_level", "off"));
    Client::tracked(build_rocket(figment, context)).await.unwrap()
}

async fn post_json(client: &Client, path: &str, body: Value) -> (Status, Value) {
    let response = client
        .post(path.to_string())
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await;
    let status = response.status();
    let body = response.into_json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

async fn signup(client: &Client, username: &str, password: &str) -> (Status, Value) {
    post_json(
        client,
        "/signup",
        json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": password
        }),
    )
    .await
}

#[rocket::async_test]
async fn test_home_route() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.into_string().await.as_deref(),
        Some("Resume Builder API is running!")
    );
}

#[rocket::async_test]
async fn test_health_reports_ok() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "OK");
}

#[rocket::async_test]
async fn test_generate_returns_docx_attachment() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    let payload = json!({
        "Full Name": "Jane Roe",
        "Email": "jane@example.com",
        "Professional Summary": "Backend engineer.",
        "Experiences": [{
            "companyName": "Acme",
            "jobTitle": "",
            "duration": "2020",
            "description": ""
        }],
        "TechnicalSkills": ["Go", "Rust"],
        "SoftSkills": []
    });

    let response = client
        .post("/generate_resume")
        .header(ContentType::JSON)
        .body(payload.to_string())
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Content-Disposition"),
        Some("attachment; filename=\"jane_roe_resume.docx\"")
    );
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
    let content_type = response.content_type().unwrap();
    assert_eq!(
        content_type.sub().as_str(),
        "vnd.openxmlformats-officedocument.wordprocessingml.document"
    );

    let bytes = response.into_bytes().await.unwrap();
    assert_eq!(&bytes[..2], b"PK");

    // Per-request files are removed once streamed back
    let leftovers = std::fs::read_dir(dir.path().join("out")).unwrap().count();
    assert_eq!(leftovers, 0);
}

#[rocket::async_test]
async fn test_generate_alias_accepts_empty_record() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    let response = client
        .post("/generate")
        .header(ContentType::JSON)
        .body("{}")
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Content-Disposition"),
        Some("attachment; filename=\"resume.docx\"")
    );
}

#[rocket::async_test]
async fn test_generate_rejects_missing_or_non_object_body() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    let response = client.post("/generate_resume").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error_code"], "INVALID_INPUT");
    assert_eq!(body["error"], "No user data provided");

    let (status, body) =
        post_json(&client, "/generate_resume", json!(["not", "a", "record"])).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error_code"], "INVALID_INPUT");
}

#[rocket::async_test]
async fn test_signup_login_and_me() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    let (status, body) = signup(&client, "jane", "s3cret").await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["data"]["username"], "jane");
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) =
        post_json(&client, "/login", json!({"username": "jane", "password": "s3cret"})).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["message"], "Welcome back, jane!");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let response = client
        .get("/me")
        .header(Header::new("Authorization", format!("Bearer {}", token)))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["data"]["email"], "jane@example.com");
}

#[rocket::async_test]
async fn test_login_failures() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;
    signup(&client, "jane", "s3cret").await;

    let (status, body) =
        post_json(&client, "/login", json!({"username": "jane", "password": "nope"})).await;
    assert_eq!(status, Status::Unauthorized);
    assert_eq!(body["error_code"], "INVALID_CREDENTIALS");

    let (status, body) =
        post_json(&client, "/login", json!({"username": "ghost", "password": "x"})).await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(body["error_code"], "USER_NOT_FOUND");

    let (status, body) = post_json(&client, "/login", json!({"username": "jane"})).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error_code"], "INVALID_INPUT");
}

#[rocket::async_test]
async fn test_signup_validation_and_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    let (status, _) = signup(&client, "jane", "s3cret").await;
    assert_eq!(status, Status::Created);

    let (status, body) = signup(&client, "jane", "other").await;
    assert_eq!(status, Status::Conflict);
    assert_eq!(body["error_code"], "USER_EXISTS");

    let (status, body) = post_json(
        &client,
        "/signup",
        json!({"username": "bob", "email": " ", "password": "x"}),
    )
    .await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error_code"], "INVALID_INPUT");
}

#[rocket::async_test]
async fn test_concurrent_signups_yield_one_user_and_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    for round in 0..5 {
        let username = format!("jane{}", round);
        let (a, b, c) = tokio::join!(
            signup(&client, &username, "s3cret"),
            signup(&client, &username, "s3cret"),
            signup(&client, &username, "s3cret"),
        );
        let statuses = [a.0, b.0, c.0];

        let created = statuses.iter().filter(|s| **s == Status::Created).count();
        let conflicts = statuses.iter().filter(|s| **s == Status::Conflict).count();
        assert_eq!(created, 1, "round {}: {:?}", round, statuses);
        assert_eq!(conflicts, 2, "round {}: {:?}", round, statuses);

        for (status, body) in [a, b, c] {
            if status == Status::Conflict {
                assert_eq!(body["error_code"], "USER_EXISTS");
            }
        }
    }
}

#[rocket::async_test]
async fn test_me_requires_valid_token() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    let response = client.get("/me").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);

    let response = client
        .get("/me")
        .header(Header::new("Authorization", "Bearer not-a-jwt"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error_code"], "UNAUTHORIZED");
}

#[rocket::async_test]
async fn test_ats_score_validation_and_disabled_service() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    let (status, body) = post_json(&client, "/ats-score", json!({"resume_text": "Rust"})).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error_code"], "INVALID_INPUT");

    let (status, body) = post_json(
        &client,
        "/ats-score",
        json!({"resume": {"TechnicalSkills": ["Rust"]}, "job_description": "Rust backend"}),
    )
    .await;
    assert_eq!(status, Status::ServiceUnavailable);
    assert_eq!(body["error_code"], "SCORING_DISABLED");
}

#[rocket::async_test]
async fn test_preflight_and_unknown_route() {
    let dir = tempfile::tempdir().unwrap();
    let client = client(&dir).await;

    let response = client.options("/generate_resume").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert!(response
        .headers()
        .get_one("Access-Control-Allow-Methods")
        .unwrap()
        .contains("POST"));

    let response = client.get("/nope").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error_code"], "NOT_FOUND");
}
