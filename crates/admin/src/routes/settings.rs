//! Settings page: the signed-in admin's own profile.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use bluewater_core::UserId;

use super::{NoticeQuery, ShellView, failure_message, redirect_with, render, users::UserForm};
use crate::{
    filters,
    middleware::{RequireAdminAuth, set_current_admin},
    models::CurrentAdmin,
    state::AppState,
};

const PATH: &str = "/settings";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(index))
        .route("/settings/profile", post(update_profile))
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub shell: ShellView,
    pub form: UserForm,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Profile form, pre-filled from the session.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(notice): Query<NoticeQuery>,
) -> Html<String> {
    let form = UserForm {
        name: admin.name.clone(),
        email: admin.email.clone(),
        password: String::new(),
    };
    settings_page(&state, &admin, form, notice.success, notice.error).await
}

/// Save name and email, then refresh the session record. The token is kept.
#[instrument(skip(admin, state, session, form))]
pub async fn update_profile(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UserForm>,
) -> Response {
    let update = match form.validate_update() {
        Ok(update) => update,
        Err(e) => {
            return settings_page(&state, &admin, form, None, Some(e.to_string()))
                .await
                .into_response();
        }
    };

    let user_id = UserId::new(admin.id.as_str());
    if let Err(e) = state
        .api()
        .users(&admin.credentials())
        .update(&user_id, &update)
        .await
    {
        tracing::error!(admin_id = %admin.id, "Failed to update profile: {e}");
        let message = failure_message("update your profile", &e);
        return settings_page(&state, &admin, form, None, Some(message))
            .await
            .into_response();
    }

    let updated = CurrentAdmin {
        name: update.name,
        email: update.email,
        ..admin
    };
    if let Err(e) = set_current_admin(&session, &updated).await {
        tracing::error!(admin_id = %updated.id, "Failed to refresh session: {e}");
        return redirect_with(
            PATH,
            "error",
            "Profile saved, but your session could not be refreshed. Sign in again.",
        );
    }

    tracing::info!(admin_id = %updated.id, "Profile updated");
    redirect_with(PATH, "success", "Profile updated.")
}

async fn settings_page(
    state: &AppState,
    admin: &CurrentAdmin,
    form: UserForm,
    success: Option<String>,
    error: Option<String>,
) -> Html<String> {
    let template = SettingsTemplate {
        shell: ShellView::load(state, admin, PATH).await,
        form,
        success,
        error,
    };
    render(&template)
}
