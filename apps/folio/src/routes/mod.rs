pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contact::handlers as contact;
use crate::content::handlers as content;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Résumé
        .route("/api/v1/resume", get(resume::handle_get_resume))
        .route(
            "/api/v1/resume/experience",
            get(resume::handle_get_experience),
        )
        // Blog and case studies
        .route("/api/v1/posts", get(content::handle_list_posts))
        .route("/api/v1/posts/:slug", get(content::handle_get_post))
        .route("/api/v1/studies", get(content::handle_list_studies))
        .route("/api/v1/studies/:slug", get(content::handle_get_study))
        // Contact form
        .route("/api/v1/contact", post(contact::handle_contact))
        .with_state(state)
}
