pub mod actor;
pub mod admin;
pub mod auth;
pub mod casting;
pub mod health;
pub mod messages;
pub mod prediction;
pub mod profile;
pub mod videos;

use axum::routing::get;
use axum::Router;

use crate::signaling;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws/calls                                        call signaling WebSocket (?token= optional)
///
/// /auth/register                                   register (public)
/// /auth/verify-email                               confirm emailed code (public)
/// /auth/resend-verification                        new code (public)
/// /auth/login                                      login (public)
/// /auth/check-email                                email availability (public)
/// /auth/forgotpassword                             request reset link (public)
/// /auth/check-reset-token/{token}                  validate reset link (public)
/// /auth/resetpassword/{token}                      set new password (public)
/// /auth/me                                         get, update (auth)
/// /auth/me/photo                                   upload profile photo (auth)
/// /auth/updatepassword                             change password (auth)
///
/// /casting                                         list open (public), create (producer)
/// /casting/{id}                                    get (public), update, delete (owner)
/// /casting/{id}/videos                             list (owner), submit (actor)
///
/// /videos/mine                                     own submissions (actor)
/// /videos/upload-signature                         signed upload params (actor)
/// /videos/{id}/status                              review (owning producer)
/// /videos/{id}                                     withdraw (owning actor)
///
/// /actor/request-switch                            request producer role (actor)
///
/// /admin/switch-requests                           list (admin only)
/// /admin/switch-requests/{id}/approve              approve (PUT)
/// /admin/switch-requests/{id}/reject               reject (PUT)
/// /admin/users                                     list
/// /admin/users/{id}                                update, delete
/// /admin/castingcalls                              list (including expired)
/// /admin/castingcalls/{id}                         update, delete
/// /admin/videos                                    list
/// /admin/videos/{id}                               update, delete
///
/// /profile/me                                      get with stats, update (auth)
/// /profile/search                                  search by name (public)
/// /profile/videos                                  add portfolio video (actor)
/// /profile/videos/{id}/view                        count a view (public)
/// /profile/videos/{id}                             delete (admin)
/// /profile/{id}                                    public profile
/// /profile/{id}/follow                             follow (auth)
/// /profile/{id}/unfollow                           unfollow (auth)
///
/// /messages                                        send (auth)
/// /messages/conversations                          conversation list
/// /messages/unread-count                           senders with unread messages
/// /messages/{conversation_id}                      thread, marks incoming read
/// /messages/{message_id}/read                      mark one read (recipient)
///
/// /prediction/predict                              attendance prediction (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Call signaling.
        .route("/ws/calls", get(signaling::call_ws_handler))
        // Registration, login, password reset, own account.
        .nest("/auth", auth::router())
        // Casting calls and their submissions.
        .nest("/casting", casting::router())
        .nest("/videos", videos::router())
        .nest("/actor", actor::router())
        .nest("/admin", admin::router())
        .nest("/profile", profile::router())
        .nest("/messages", messages::router())
        .nest("/prediction", prediction::router())
}
