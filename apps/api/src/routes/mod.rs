pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{assessment, careers, jobs, mentors, messaging, roadmap, users};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Assessment
        .route(
            "/api/assessment/questions",
            get(assessment::handlers::handle_get_questions),
        )
        .route(
            "/api/assessment/submit",
            post(assessment::handlers::handle_submit),
        )
        .route(
            "/api/assessment/history",
            get(assessment::handlers::handle_get_history),
        )
        .route(
            "/api/assessment/recommendations",
            post(assessment::handlers::handle_recommendations),
        )
        // Roadmap
        .route("/api/roadmap", get(roadmap::handlers::handle_get_roadmap))
        .route(
            "/api/roadmap/generate",
            post(roadmap::handlers::handle_generate_roadmap),
        )
        // Jobs
        .route("/api/jobs/trends", get(jobs::handlers::handle_trending_jobs))
        // Careers
        .route("/api/careers", get(careers::handlers::handle_list_careers))
        .route(
            "/api/careers/matches",
            get(careers::handlers::handle_get_matches),
        )
        .route("/api/careers/:id", get(careers::handlers::handle_get_career))
        // Mentors
        .route("/api/mentors", get(mentors::handlers::handle_list_mentors))
        .route("/api/mentors/:id", get(mentors::handlers::handle_get_mentor))
        // Users
        .route(
            "/api/users/profile",
            get(users::handlers::handle_get_profile).put(users::handlers::handle_update_profile),
        )
        // Messages
        .route("/api/messages", post(messaging::handlers::handle_send_message))
        .route(
            "/api/messages/:peer_id",
            get(messaging::handlers::handle_get_conversation),
        )
        .route(
            "/api/messages/:peer_id/read",
            post(messaging::handlers::handle_mark_read),
        )
        .route(
            "/api/messages/:peer_id/stream",
            get(messaging::handlers::handle_message_stream),
        )
        .with_state(state)
}
