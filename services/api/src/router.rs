use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use bookreview_core::health::healthz;
use bookreview_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    comment::{
        create_comment, delete_comment, get_comment, list_comments, patch_comment, put_comment,
    },
    health::readyz,
    profile::{
        create_profile, delete_profile, get_profile, list_profiles, my_profile, patch_profile,
        put_profile,
    },
    review::{create_review, delete_review, get_review, list_reviews, patch_review, put_review},
    token::{create_token, refresh_token},
    user::register,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/register/", post(register))
        .route("/authen/jwt/create/", post(create_token))
        .route("/authen/jwt/refresh/", post(refresh_token))
        // Profiles
        .route("/profile/", get(list_profiles).post(create_profile))
        .route(
            "/profile/{id}/",
            get(get_profile)
                .put(put_profile)
                .patch(patch_profile)
                .delete(delete_profile),
        )
        .route("/myprofile/", get(my_profile))
        // Reviews
        .route("/review/", get(list_reviews).post(create_review))
        .route(
            "/review/{id}/",
            get(get_review)
                .put(put_review)
                .patch(patch_review)
                .delete(delete_review),
        )
        // Comments
        .route("/comment/", get(list_comments).post(create_comment))
        .route(
            "/comment/{id}/",
            get(get_comment)
                .put(put_comment)
                .patch(patch_comment)
                .delete(delete_comment),
        )
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
