//! Route definitions for the `/auth` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Multipart overhead allowed on top of the photo itself.
const PHOTO_BODY_SLACK: usize = 64 * 1024;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /register                   -> register (public)
/// POST   /verify-email               -> verify_email (public)
/// POST   /resend-verification        -> resend_verification (public)
/// POST   /login                      -> login (public)
/// GET    /check-email                -> check_email (public)
/// POST   /forgotpassword             -> forgot_password (public)
/// GET    /check-reset-token/{token}  -> check_reset_token (public)
/// PUT    /resetpassword/{token}      -> reset_password (public)
/// GET    /me                         -> get_me
/// PUT    /me                         -> update_me
/// PUT    /me/photo                   -> upload_photo (multipart)
/// PUT    /updatepassword             -> update_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/verify-email", post(auth::verify_email))
        .route("/resend-verification", post(auth::resend_verification))
        .route("/login", post(auth::login))
        .route("/check-email", get(auth::check_email))
        .route("/forgotpassword", post(auth::forgot_password))
        .route("/check-reset-token/{token}", get(auth::check_reset_token))
        .route("/resetpassword/{token}", put(auth::reset_password))
        .route("/me", get(auth::get_me).put(auth::update_me))
        .route(
            "/me/photo",
            put(auth::upload_photo)
                .layer(DefaultBodyLimit::max(auth::MAX_PHOTO_BYTES + PHOTO_BODY_SLACK)),
        )
        .route("/updatepassword", put(auth::update_password))
}
