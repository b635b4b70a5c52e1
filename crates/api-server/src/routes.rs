use crate::auth::ActingUser;
use crate::error::ApiError;
use application::ProjectApp;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use domain::{ProjectRequest, ProjectView};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub project_app: Arc<ProjectApp>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/projects/get-project/:project_id", get(get_project))
        .route("/projects/create/", post(create_project))
        .route("/projects/update/:project_id", put(update_project))
        .route("/projects/delete/:project_id", delete(delete_project))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<ProjectView>, ApiError> {
    let view = state.project_app.project_service.get_project(&project_id).await?;
    Ok(Json(view))
}

async fn create_project(
    State(state): State<AppState>,
    ActingUser(ctx): ActingUser,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<Json<ProjectView>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let view = state
        .project_app
        .project_service
        .create_project(&ctx, request)
        .await?;

    info!(project_id = ?view.id, "project created via API");
    Ok(Json(view))
}

async fn update_project(
    State(state): State<AppState>,
    ActingUser(ctx): ActingUser,
    Path(project_id): Path<String>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<Json<ProjectView>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let view = state
        .project_app
        .project_service
        .update_project(&ctx, &project_id, request)
        .await?;

    Ok(Json(view))
}

async fn delete_project(
    State(state): State<AppState>,
    ActingUser(ctx): ActingUser,
    Path(project_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .project_app
        .project_service
        .delete_project(&ctx, &project_id)
        .await?;

    if deleted {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::USER_ID_HEADER;
    use axum::body::Body;
    use axum::http::{header, Request};
    use domain::{User, UserId};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestServer {
        _dir: TempDir,
        project_app: Arc<ProjectApp>,
        router: Router,
    }

    fn server() -> TestServer {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.db");
        let project_app = Arc::new(ProjectApp::new(path.to_str().unwrap()).unwrap());
        let router = router(AppState {
            project_app: project_app.clone(),
        });
        TestServer {
            _dir: dir,
            project_app,
            router,
        }
    }

    impl TestServer {
        async fn seed_user(&self, name: &str) -> UserId {
            let user = User::new(UserId::new(), name);
            self.project_app
                .user_directory()
                .upsert_user(&user)
                .await
                .unwrap();
            user.id
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            user: Option<UserId>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(user) = user {
                builder = builder.header(USER_ID_HEADER, user.to_string());
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }
    }

    fn payload(title: &str) -> Value {
        json!({
            "title": title,
            "description": "Y",
            "techRequirements": ["rust"],
            "private": false,
            "githubLink": null
        })
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let server = server();
        let (status, body) = server.send("GET", "/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn create_requires_identity() {
        let server = server();
        let (status, body) = server
            .send("POST", "/projects/create/", None, Some(payload("X")))
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "AUTH_MISSING_IDENTITY");
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let server = server();
        let user = server.seed_user("u1").await;

        let (status, body) = server
            .send("POST", "/projects/create/", Some(user), Some(payload(" ")))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "VALID_INVALID_INPUT");
    }

    #[tokio::test]
    async fn create_without_title_is_a_json_400() {
        let server = server();
        let user = server.seed_user("u1").await;

        let (status, body) = server
            .send(
                "POST",
                "/projects/create/",
                Some(user),
                Some(json!({ "description": "Y" })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "VALID_INVALID_INPUT");
        assert!(body["error"].as_str().unwrap().contains("title"));
    }

    #[tokio::test]
    async fn create_with_null_description_is_a_json_400() {
        let server = server();
        let user = server.seed_user("u1").await;

        let (status, body) = server
            .send(
                "POST",
                "/projects/create/",
                Some(user),
                Some(json!({ "title": "X", "description": null })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "VALID_INVALID_INPUT");
    }

    #[tokio::test]
    async fn update_with_malformed_body_is_a_json_400() {
        let server = server();
        let user = server.seed_user("u1").await;
        let (_, created) = server
            .send("POST", "/projects/create/", Some(user), Some(payload("X")))
            .await;
        let uri = format!("/projects/update/{}", created["id"].as_str().unwrap());

        let request = Request::builder()
            .method("PUT")
            .uri(&uri)
            .header(USER_ID_HEADER, user.to_string())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap();
        let response = server.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error_code"], "VALID_INVALID_INPUT");

        let get_uri = format!("/projects/get-project/{}", created["id"].as_str().unwrap());
        let (_, fetched) = server.send("GET", &get_uri, None, None).await;
        assert_eq!(fetched["title"], "X");
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_404() {
        let server = server();

        let (status, body) = server
            .send("GET", "/projects/get-project/not-an-id", None, None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_code"], "RESOURCE_NOT_FOUND");

        let uri = format!("/projects/get-project/{}", domain::ProjectId::new());
        let (status, _) = server.send("GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn owner_lifecycle_over_http() {
        let server = server();
        let u1 = server.seed_user("u1").await;
        let u2 = server.seed_user("u2").await;

        let (status, created) = server
            .send("POST", "/projects/create/", Some(u1), Some(payload("X")))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["ownerId"], u1.to_string());
        assert_eq!(created["ownerUsername"], "u1");
        assert!(created.get("currentContributors").is_none());
        let id = created["id"].as_str().unwrap().to_string();

        let update_uri = format!("/projects/update/{}", id);
        let (status, body) = server
            .send("PUT", &update_uri, Some(u2), Some(payload("Z")))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error_code"], "AUTHZ_NOT_OWNER");

        let get_uri = format!("/projects/get-project/{}", id);
        let (_, fetched) = server.send("GET", &get_uri, None, None).await;
        assert_eq!(fetched["title"], "X");

        let (status, updated) = server
            .send("PUT", &update_uri, Some(u1), Some(payload("Z")))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Z");
        assert_eq!(updated["ownerId"], u1.to_string());

        let delete_uri = format!("/projects/delete/{}", id);
        let (status, _) = server.send("DELETE", &delete_uri, Some(u2), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = server.send("DELETE", &delete_uri, Some(u1), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);

        let (status, _) = server.send("GET", &get_uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
