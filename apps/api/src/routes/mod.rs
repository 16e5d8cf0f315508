pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::analytics;
use crate::documents::handlers as documents;
use crate::judge;
use crate::navigation;
use crate::profile::handlers as profile;
use crate::render::handlers as render;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile & sections
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_upsert_profile),
        )
        .route(
            "/api/v1/profile/completeness",
            get(profile::handle_completeness),
        )
        .route(
            "/api/v1/education",
            get(profile::handle_list_education).post(profile::handle_create_education),
        )
        .route(
            "/api/v1/education/:id",
            put(profile::handle_update_education).delete(profile::handle_delete_education),
        )
        .route(
            "/api/v1/projects",
            get(profile::handle_list_projects).post(profile::handle_create_project),
        )
        .route(
            "/api/v1/projects/:id",
            put(profile::handle_update_project).delete(profile::handle_delete_project),
        )
        .route(
            "/api/v1/skills",
            get(profile::handle_list_skills).post(profile::handle_create_skill),
        )
        .route(
            "/api/v1/skills/:id",
            put(profile::handle_update_skill).delete(profile::handle_delete_skill),
        )
        .route(
            "/api/v1/certifications",
            get(profile::handle_list_certifications).post(profile::handle_create_certification),
        )
        .route(
            "/api/v1/certifications/:id",
            put(profile::handle_update_certification)
                .delete(profile::handle_delete_certification),
        )
        .route(
            "/api/v1/achievements",
            get(profile::handle_list_achievements).post(profile::handle_create_achievement),
        )
        .route(
            "/api/v1/achievements/:id",
            put(profile::handle_update_achievement).delete(profile::handle_delete_achievement),
        )
        .route(
            "/api/v1/extracurricular",
            get(profile::handle_list_extracurricular)
                .post(profile::handle_create_extracurricular),
        )
        .route(
            "/api/v1/extracurricular/:id",
            put(profile::handle_update_extracurricular)
                .delete(profile::handle_delete_extracurricular),
        )
        .route(
            "/api/v1/hobbies",
            get(profile::handle_list_hobbies).post(profile::handle_create_hobby),
        )
        .route(
            "/api/v1/hobbies/:id",
            put(profile::handle_update_hobby).delete(profile::handle_delete_hobby),
        )
        // Resume features
        .route("/api/v1/resume/generate", post(resume::handle_generate))
        .route("/api/v1/resume/ats", post(resume::handle_ats))
        .route(
            "/api/v1/resume/cover-letter",
            post(resume::handle_cover_letter),
        )
        .route("/api/v1/resume/versions", get(resume::handle_versions))
        .route("/api/v1/resume/:id/pdf", post(render::handle_render_pdf))
        // Documents
        .route(
            "/api/v1/documents/upload",
            post(documents::handle_upload)
                .layer(DefaultBodyLimit::max(documents::MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        .route("/api/v1/documents/parse", post(documents::handle_parse))
        // Coding practice
        .route("/api/v1/code/execute", post(judge::handle_execute))
        // Analytics & navigation
        .route("/api/v1/analytics/summary", get(analytics::handle_summary))
        .route("/api/v1/navigation", get(navigation::handle_navigation))
        .with_state(state)
}
