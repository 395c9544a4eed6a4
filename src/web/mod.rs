//! # Módulo Web — A Entrevista no Navegador
//!
//! Camada de apresentação construída com **Axum** + **HTMX** + **Maud**.
//! O núcleo (controlador + motor de dicas) não sabe que existe HTTP:
//! cada request avança um passo do [`Interview`](crate::interview::Interview)
//! da sessão.
//!
//! ## Arquitetura Web
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Browser (HTMX)                                               │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Axum Router (este módulo)                                    │
//! │  ├── GET  /                          → redirect p/ sessão    │
//! │  ├── GET  /entrevista/{id}           → página do passo atual │
//! │  ├── POST /entrevista/{id}/responder → HTMX fragment         │
//! │  ├── POST /entrevista/{id}/reiniciar → HTMX fragment         │
//! │  ├── POST /api/diagnostico           → JSON                  │
//! │  └── GET  /status                    → JSON                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │ TraceLayer (tower_http) — um span por request                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Sessões (`AppState`, `Session`) |
//! | [`handlers`] | Handlers Axum para cada rota |
//! | [`templates`] | Templates Maud (HTML server-side) |

pub mod handlers;
pub mod state;
pub mod templates;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Cria o router Axum com todas as rotas da aplicação.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // ── Entrevista (HTML / HTMX) ──────────────────────────
        .route("/", get(handlers::index))
        .route("/entrevista/{id}", get(handlers::show_interview))
        .route("/entrevista/{id}/responder", post(handlers::answer))
        .route("/entrevista/{id}/reiniciar", post(handlers::restart))
        // ── API JSON ──────────────────────────────────────────
        .route("/api/diagnostico", post(handlers::diagnose))
        .route("/status", get(handlers::status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderMap, Method, Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn post_answer(id: Uuid, key: &str, value: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(format!("/entrevista/{id}/responder"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("hx-request", "true")
            .body(Body::from(format!("pregunta={key}&valor={value}")))
            .unwrap()
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/diagnostico")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn app() -> (AppState, Router) {
        let state = AppState::new(chrono::Duration::minutes(30));
        (state.clone(), create_router(state))
    }

    async fn open_session(app: &Router) -> Uuid {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, headers, _) = send(app, req).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let location = headers[header::LOCATION].to_str().unwrap();
        location.trim_start_matches("/entrevista/").parse().unwrap()
    }

    #[tokio::test]
    async fn full_gira_interview_over_http() {
        let (state, app) = app();
        let id = open_session(&app).await;

        let req = Request::builder()
            .uri(format!("/entrevista/{id}"))
            .body(Body::empty())
            .unwrap();
        let (_, _, page) = send(&app, req).await;
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("data-key=\"arranque_estado\""));

        let steps = [
            ("arranque_estado", "gira"),
            ("vel_burro", "lento"),
            ("intentos_explosion", "no"),
            ("olor_nafta", "fuerte"),
            ("bomba_suena", "no"),
            ("check", "ok"),
            ("combustible", "nafta"),
            ("edad_bateria", "mayor"),
            ("bornes", "ok"),
            ("notas", ""),
        ];
        let mut body = String::new();
        for (key, value) in steps {
            let (status, _, html) = send(&app, post_answer(id, key, value)).await;
            assert_eq!(status, StatusCode::OK);
            body = html;
        }

        assert!(!body.contains("<!DOCTYPE html>"));
        assert!(body.contains("Resultado orientativo"));
        assert!(body.contains("<strong>Burro lento</strong>"));
        assert!(body.contains("tip-fuel_pump"));
        assert!(!body.contains("data-key=\"tablero\""));
        assert_eq!(state.session_count(), 1);
    }

    #[tokio::test]
    async fn invalid_answer_aborts_session() {
        let (state, app) = app();
        let id = open_session(&app).await;

        let (_, _, html) = send(&app, post_answer(id, "arranque_estado", "volar")).await;
        assert!(html.contains("No se pudo continuar la entrevista."));
        assert_eq!(state.session_count(), 0);

        let (_, _, html) = send(&app, post_answer(id, "arranque_estado", "gira")).await;
        assert!(html.contains("ya no existe"));
    }

    #[tokio::test]
    async fn answer_without_htmx_redirects_to_session_page() {
        let (_, app) = app();
        let id = open_session(&app).await;
        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("/entrevista/{id}/responder"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("pregunta=arranque_estado&valor=no_gira"))
            .unwrap();
        let (status, headers, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], format!("/entrevista/{id}").as_str());

        let req = Request::builder()
            .uri(format!("/entrevista/{id}"))
            .body(Body::empty())
            .unwrap();
        let (_, _, html) = send(&app, req).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("data-key=\"tablero\""));
    }

    #[tokio::test]
    async fn repeated_submit_is_recorded_once() {
        let (state, app) = app();
        let id = open_session(&app).await;
        let steps = [
            ("arranque_estado", "arranca_ok"),
            ("bomba_suena", "si"),
            ("bomba_suena", "si"),
            ("check", "ok"),
            ("combustible", "nafta"),
            ("edad_bateria", "menor"),
            ("bornes", "ok"),
            ("bornes", "ok"),
        ];
        let mut last = String::new();
        for (key, value) in steps {
            let (status, _, html) = send(&app, post_answer(id, key, value)).await;
            assert_eq!(status, StatusCode::OK);
            last = html;
        }

        // Segundo "bornes" não vira nota: a pergunta atual continua sendo notas.
        assert!(last.contains("data-key=\"notas\""));
        let sessions = state.sessions.read();
        let interview = &sessions[&id].interview;
        assert_eq!(interview.answers().len(), 6);
        assert_eq!(interview.answers().get(crate::core::QuestionKey::BombaSuena), Some("si"));
        assert_eq!(interview.answers().get(crate::core::QuestionKey::Notas), None);
        assert!(!interview.is_complete());
    }

    #[tokio::test]
    async fn viewing_the_page_keeps_session_alive() {
        let (state, app) = app();
        let id = open_session(&app).await;
        let now = chrono::Utc::now();
        state.sessions.write().get_mut(&id).unwrap().last_seen = now - chrono::Duration::minutes(29);

        let req = Request::builder()
            .uri(format!("/entrevista/{id}"))
            .body(Body::empty())
            .unwrap();
        send(&app, req).await;

        assert_eq!(state.sweep_expired(now + chrono::Duration::minutes(2)), 0);
        assert_eq!(state.session_count(), 1);
    }

    #[tokio::test]
    async fn restart_replaces_session() {
        let (state, app) = app();
        let old = open_session(&app).await;
        send(&app, post_answer(old, "arranque_estado", "gira")).await;

        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("/entrevista/{old}/reiniciar"))
            .header("hx-request", "true")
            .body(Body::empty())
            .unwrap();
        let (status, headers, html) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Pregunta 1"));

        let pushed = headers["hx-push-url"].to_str().unwrap();
        let new: Uuid = pushed.trim_start_matches("/entrevista/").parse().unwrap();
        assert_ne!(new, old);

        let sessions = state.sessions.read();
        assert!(!sessions.contains_key(&old));
        assert!(sessions[&new].interview.answers().is_empty());
    }

    #[tokio::test]
    async fn api_returns_tips_in_order() {
        let (_, app) = app();
        let body = r#"{
            "arranque_estado": "gira", "vel_burro": "normal", "intentos_explosion": "no",
            "olor_nafta": "fuerte", "bomba_suena": "si", "check": "ok",
            "combustible": "gnc", "edad_bateria": "media", "bornes": "ok"
        }"#;
        let (status, _, json) = send(&app, post_json(body)).await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let tips = value["tips"].as_array().unwrap();
        assert_eq!(tips.len(), 2);
        assert_eq!(tips[0]["topic"], "fuel");
        assert_eq!(tips[1]["topic"], "gas");
        assert!(!tips[0]["text"].as_str().unwrap().contains("**"));
    }

    #[tokio::test]
    async fn api_rejects_missing_required_answer() {
        let (_, app) = app();
        let body = r#"{ "arranque_estado": "arranca_ok", "bomba_suena": "si", "check": "ok", "bornes": "ok" }"#;
        let (status, _, json) = send(&app, post_json(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json.contains("combustible"));
    }

    #[tokio::test]
    async fn api_rejects_undeclared_value() {
        let (_, app) = app();
        let (status, _, json) = send(&app, post_json(r#"{ "bornes": "brillantes" }"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json.contains("bornes"));
    }

    #[tokio::test]
    async fn status_counts_sessions() {
        let (_, app) = app();
        open_session(&app).await;
        open_session(&app).await;
        let req = Request::builder().uri("/status").body(Body::empty()).unwrap();
        let (_, _, json) = send(&app, req).await;
        assert_eq!(json, r#"{"sessions":2}"#);
    }
}
