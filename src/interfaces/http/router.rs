//! Route table for the admin console

use axum::extract::FromRef;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::interfaces::http::modules::users::{handlers, UserPagesState};

/// Unified state for all routes. Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct ConsoleState {
    pub user_pages: UserPagesState,
}

impl FromRef<ConsoleState> for UserPagesState {
    fn from_ref(s: &ConsoleState) -> Self {
        s.user_pages.clone()
    }
}

pub fn create_router(state: ConsoleState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/admin/users", get(handlers::list_users))
        .route(
            "/admin/users/new",
            get(handlers::new_user_form).post(handlers::create_user),
        )
        .route(
            "/admin/users/{id}",
            get(handlers::edit_user_form).post(handlers::update_user),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Redirect {
    Redirect::to("/admin/users")
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;
    use tower::ServiceExt;

    use crate::application::identity::{Seeder, UserService};
    use crate::config::{AdminConfig, PagingConfig};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::{RoleRepository, UserRepository};

    async fn router() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let users = Arc::new(UserRepository::new(db.clone()));
        let roles = Arc::new(RoleRepository::new(db));
        Seeder::new(users.clone(), roles.clone(), AdminConfig::default())
            .run()
            .await
            .unwrap();

        let service = Arc::new(UserService::new(users, roles, 10));
        create_router(ConsoleState {
            user_pages: UserPagesState {
                service,
                paging: PagingConfig::default(),
            },
        })
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let response = router()
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn root_redirects_to_user_list() {
        let response = router()
            .await
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/admin/users");
    }

    #[tokio::test]
    async fn user_list_shows_seeded_admin() {
        let response = router()
            .await
            .oneshot(Request::get("/admin/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("admin"));
        assert!(html.contains("test@test.com"));
    }

    #[tokio::test]
    async fn invalid_id_search_renders_error_banner() {
        let response = router()
            .await
            .oneshot(
                Request::get("/admin/users?field=id&value=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("not a valid id"));
    }

    #[tokio::test]
    async fn creating_a_user_redirects_to_list() {
        let response = router()
            .await
            .oneshot(form_post(
                "/admin/users/new",
                "name=Jane&surname=Doe&username=jane&email=jane%40example.com&password=secret&enabled=true",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/admin/users?saved=1");
    }

    #[tokio::test]
    async fn duplicate_email_rerenders_form_with_message() {
        let response = router()
            .await
            .oneshot(form_post(
                "/admin/users/new",
                "name=Jane&surname=Doe&username=jane&email=test%40test.com&password=secret&enabled=true",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Email already exists"));
        // Submitted values come back in the inputs.
        assert!(html.contains("value=\"Jane\""));
    }

    #[tokio::test]
    async fn oversized_page_number_does_not_wrap_to_first_page() {
        let response = router()
            .await
            .oneshot(
                // u32::MAX + 2; a wrapping cast would land on page 1.
                Request::get("/admin/users?page=4294967297")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(!html.contains("test@test.com"));
    }

    #[tokio::test]
    async fn forged_role_id_is_dropped_not_fatal() {
        let response = router()
            .await
            .oneshot(form_post(
                "/admin/users/new",
                "name=Jane&surname=Doe&username=jane&email=jane%40example.com&password=secret&enabled=true&role_ids=999",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/admin/users?saved=1");
    }

    #[tokio::test]
    async fn edit_form_premarks_assigned_roles() {
        let response = router()
            .await
            .oneshot(
                Request::get("/admin/users/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The seeded admin holds ROLE_ADMIN (id 1) but not ROLE_USER (id 2).
        let html = body_text(response).await;
        assert!(html.contains("value=\"1\" checked"));
        assert!(!html.contains("value=\"2\" checked"));
    }

    #[tokio::test]
    async fn editing_missing_user_is_not_found() {
        let response = router()
            .await
            .oneshot(
                Request::get("/admin/users/9999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn updating_a_user_redirects_to_list() {
        let app = router().await;

        // Seeded admin has id 1.
        let response = app
            .oneshot(form_post(
                "/admin/users/1",
                "name=Admin&surname=Renamed&username=admin&email=test%40test.com&password=&enabled=true&role_ids=1",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/admin/users?updated=1");
    }
}
