use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::Response,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        admin::{
            categories::{
                create_category, delete_category, get_category, list_categories, update_category,
            },
            cities::{create_city, delete_city, get_city, list_cities, update_city},
            curation::{
                create_featured_item, create_section, delete_featured_item, delete_section,
                get_featured_item, list_featured_items, list_sections, replace_sections,
                update_featured_item, update_section,
            },
            dashboard::dashboard,
            feedback::{get_feedback, list_feedback, set_feedback_status},
            guides::{create_guide, delete_guide, get_guide, list_guides, update_guide},
            notifications::{list_notifications, mark_notification_read},
            qr_codes::{create_qr_code, delete_qr_code, get_qr_code, list_qr_codes, update_qr_code},
            reviews::{create_review, delete_review, get_review, list_reviews, update_review},
            users::{create_user, delete_user, get_user, list_users},
            venues::{create_venue, delete_venue, get_venue, list_venues, update_venue},
        },
        error::not_found_page,
        health::{livez, readyz},
        pages::{
            admin_home, category_page, city_page, guide_page, guides_index, home, login_page,
            review_page, venue_page,
        },
        qr::{download_qr_code, qr_landing, submit_feedback},
        sitemap::{guides_sitemap, reviews_sitemap, sitemap_index, static_sitemap, venues_sitemap},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// When `indexnow_key` is set, the key verification file is served at
/// `/{key}.txt` so search engines can confirm ownership of submitted
/// URLs.
pub fn create_app(state: AppState, indexnow_key: Option<String>) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(tapeo_auth::ADMIN_SECRET_HEADER),
        ]);

    // API routes with CORS
    let api_routes = Router::new()
        // Admin dashboard
        .route("/admin/dashboard", get(dashboard))
        // City routes
        .route("/admin/cities", get(list_cities).post(create_city))
        .route(
            "/admin/cities/{id}",
            get(get_city).put(update_city).delete(delete_city),
        )
        // Venue routes
        .route("/admin/venues", get(list_venues).post(create_venue))
        .route(
            "/admin/venues/{id}",
            get(get_venue).put(update_venue).delete(delete_venue),
        )
        // Review routes
        .route("/admin/reviews", get(list_reviews).post(create_review))
        .route(
            "/admin/reviews/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        // Category routes
        .route(
            "/admin/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/admin/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        // Guide routes
        .route("/admin/guides", get(list_guides).post(create_guide))
        .route(
            "/admin/guides/{id}",
            get(get_guide).put(update_guide).delete(delete_guide),
        )
        // Homepage curation: featured slots and the section layout.
        // PUT on the collection replaces the whole layout at once.
        .route(
            "/admin/featured",
            get(list_featured_items).post(create_featured_item),
        )
        .route(
            "/admin/featured/{id}",
            get(get_featured_item)
                .put(update_featured_item)
                .delete(delete_featured_item),
        )
        .route(
            "/admin/sections",
            get(list_sections)
                .post(create_section)
                .put(replace_sections),
        )
        .route(
            "/admin/sections/{id}",
            put(update_section).delete(delete_section),
        )
        // QR codes and the feedback they collect
        .route("/admin/qr-codes", get(list_qr_codes).post(create_qr_code))
        .route(
            "/admin/qr-codes/{id}",
            get(get_qr_code).put(update_qr_code).delete(delete_qr_code),
        )
        .route("/admin/feedback", get(list_feedback))
        .route(
            "/admin/feedback/{id}",
            get(get_feedback).put(set_feedback_status),
        )
        // User management
        .route("/admin/users", get(list_users).post(create_user))
        .route("/admin/users/{id}", get(get_user).delete(delete_user))
        // Notifications for the signed-in user
        .route("/admin/notifications", get(list_notifications))
        .route(
            "/admin/notifications/{id}/read",
            post(mark_notification_read),
        )
        // Public QR endpoints used by the scan landing page
        .route("/qr/feedback", post(submit_feedback))
        .route("/qr/download/{code}", get(download_qr_code))
        .layer(cors);

    // Main application router. Static segments win over the slug
    // captures, so /guias and /sitemap.xml never shadow a city page.
    let mut app = Router::new()
        .route("/", get(home))
        .route("/login", get(login_page))
        .route("/admin", get(admin_home))
        .route("/guias", get(guides_index))
        .route("/guias/{slug}", get(guide_page))
        .route("/categorias/{slug}", get(category_page))
        .route("/qr/{code}", get(qr_landing))
        .route("/{city_slug}", get(city_page))
        .route("/{city_slug}/{venue_slug}", get(venue_page))
        .route(
            "/{city_slug}/{venue_slug}/review/{review_slug}",
            get(review_page),
        )
        // Sitemaps
        .route("/sitemap.xml", get(sitemap_index))
        .route("/sitemap-venues.xml", get(venues_sitemap))
        .route("/sitemap-reviews.xml", get(reviews_sitemap))
        .route("/sitemap-guides.xml", get(guides_sitemap))
        .route("/sitemap-static.xml", get(static_sitemap))
        // Probes
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .merge(tapeo_auth::auth_routes::<AppState>())
        .fallback(not_found);

    if let Some(key) = indexnow_key {
        let body = key.clone();
        app = app.route(
            &format!("/{key}.txt"),
            get(move || {
                let body = body.clone();
                async move { body }
            }),
        );
    }

    app.layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

/// Unknown paths render the HTML 404 page.
async fn not_found() -> Response {
    not_found_page()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use tapeo_auth::{AuthConfig, AuthState};
    use tapeo_core::content::{City, Review, Venue};
    use tapeo_core::qr::QrCode;

    use crate::state::test_support::{admin_session, editor_session};

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_homepage_renders() {
        let state = AppState::default();
        let app = create_app(state, None);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("Tapeo"));
    }

    #[tokio::test]
    async fn test_unknown_path_renders_404_page() {
        let state = AppState::default();
        let app = create_app(state, None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/una/ruta/que/no/existe")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = body_string(response).await;
        assert!(html.contains("Página no encontrada"));
    }

    #[tokio::test]
    async fn test_create_category_requires_session() {
        let state = AppState::default();
        let app = create_app(state, None);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/admin/categories",
                serde_json::json!({"title": "Tapas"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_category_and_reject_duplicate_slug() {
        let state = AppState::default();
        let cookie = editor_session(&state).await;
        let app = create_app(state, None);

        let mut request = json_request(
            "POST",
            "/api/admin/categories",
            serde_json::json!({"title": "Tapas"}),
        );
        request
            .headers_mut()
            .insert("Cookie", cookie.parse().unwrap());

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["category"]["slug"], "tapas");

        // Same title again derives the same slug and must be refused.
        let mut request = json_request(
            "POST",
            "/api/admin/categories",
            serde_json::json!({"title": "Tapas"}),
        );
        request
            .headers_mut()
            .insert("Cookie", cookie.parse().unwrap());

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Ya existe una categoría con este slug");
    }

    #[tokio::test]
    async fn test_delete_venue_with_reviews_is_refused() {
        let state = AppState::default();

        let city = City::new("Sevilla", "sevilla");
        let venue = Venue::new(city.id, "Casa Paco", "casa-paco", "Calle Sierpes 12");
        let review = Review::new(venue.id, "Tapas de otoño", "tapas-de-otono", "Marta");
        state.content.create_city(&city).await.unwrap();
        state.content.create_venue(&venue).await.unwrap();
        state.content.create_review(&review).await.unwrap();

        let cookie = editor_session(&state).await;
        let app = create_app(state, None);

        let mut request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/admin/venues/{}", venue.id))
            .body(Body::empty())
            .unwrap();
        request
            .headers_mut()
            .insert("Cookie", cookie.parse().unwrap());

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(
            json["error"],
            "No se puede eliminar un local que tiene reseñas asociadas"
        );
    }

    #[tokio::test]
    async fn test_venue_sitemap_on_empty_store() {
        let state = AppState::default();
        let app = create_app(state, None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sitemap-venues.xml")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "application/xml; charset=utf-8"
        );

        let xml = body_string(response).await;
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<urlset"));
    }

    #[tokio::test]
    async fn test_probes() {
        let state = AppState::default();
        let app = create_app(state, None);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/livez")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/readyz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_editor_cannot_manage_users() {
        let state = AppState::default();
        let cookie = editor_session(&state).await;
        let app = create_app(state, None);

        let mut request = Request::builder()
            .uri("/api/admin/users")
            .body(Body::empty())
            .unwrap();
        request
            .headers_mut()
            .insert("Cookie", cookie.parse().unwrap());

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_lists_users() {
        let state = AppState::default();
        let cookie = admin_session(&state).await;
        let app = create_app(state, None);

        let mut request = Request::builder()
            .uri("/api/admin/users")
            .body(Body::empty())
            .unwrap();
        request
            .headers_mut()
            .insert("Cookie", cookie.parse().unwrap());

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(!json.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provisioning_secret_creates_user() {
        let state = AppState::default();
        let state = AppState {
            auth: AuthState::new(
                state.auth.sessions.clone(),
                state.auth.users.clone(),
                state.auth.notifications.clone(),
                AuthConfig {
                    admin_api_secret: Some("clave-de-despliegue".to_string()),
                    ..AuthConfig::default()
                },
            ),
            ..state
        };
        let app = create_app(state, None);

        let mut request = json_request(
            "POST",
            "/api/admin/users",
            serde_json::json!({
                "email": "ana@tapeo.example",
                "password": "contraseña-larga",
            }),
        );
        request
            .headers_mut()
            .insert("x-admin-secret", "clave-de-despliegue".parse().unwrap());

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["user"]["email"], "ana@tapeo.example");
    }

    #[tokio::test]
    async fn test_qr_landing() {
        let state = AppState::default();

        let city = City::new("Madrid", "madrid");
        let venue = Venue::new(city.id, "Bodega de la Ardosa", "la-ardosa", "Calle Colón 13");
        let qr = QrCode::new(venue.id, "mesa-3");
        state.content.create_city(&city).await.unwrap();
        state.content.create_venue(&venue).await.unwrap();
        state.content.create_qr_code(&qr).await.unwrap();

        let app = create_app(state, None);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/qr/mesa-3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Bodega de la Ardosa"));

        // Unknown codes get the 404 page, not an error.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/qr/desconocido")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_me_requires_session() {
        let state = AppState::default();
        let app = create_app(state, None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/auth/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_indexnow_key_file_is_served() {
        let state = AppState::default();
        let app = create_app(state, Some("a1b2c3d4".to_string()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/a1b2c3d4.txt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert_eq!(body, "a1b2c3d4");
    }
}
