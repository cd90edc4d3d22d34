//! Users & Roles pages.
//!
//! The signed-in admin never appears in the listing; their own account is
//! edited from Settings.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use bluewater_core::{Email, UserId};

use super::{NoticeQuery, ShellView, failure_message, redirect_with, render};
use crate::{
    error::FormError,
    filters,
    middleware::RequireAdminAuth,
    models::{CurrentAdmin, NewUser, User, UserUpdate, user::without_current},
    state::AppState,
};

const PATH: &str = "/users";

const MIN_NAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(index).post(create))
        .route("/users/new", get(new_page))
        .route("/users/{id}/edit", get(edit_page))
        .route("/users/{id}", post(update))
        .route("/users/{id}/delete", post(delete))
}

#[derive(Debug, Clone)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UsersIndexTemplate {
    pub shell: ShellView,
    pub users: Vec<UserView>,
    pub success: Option<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "users/form.html")]
pub struct UserFormTemplate {
    pub shell: ShellView,
    pub user_id: Option<String>,
    pub form: UserForm,
    pub error: Option<String>,
}

/// User form as submitted. `password` is only read on create.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl UserForm {
    /// Validate a new account.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: name length, email shape, password length.
    pub fn validate_new(&self) -> Result<NewUser, FormError> {
        let UserUpdate { name, email } = self.validate_update()?;
        let password = self.password.trim();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort);
        }
        Ok(NewUser {
            name,
            email,
            password: password.to_string(),
        })
    }

    /// Validate an edit (name and email only).
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NameTooShort`] or [`FormError::InvalidEmail`].
    pub fn validate_update(&self) -> Result<UserUpdate, FormError> {
        let name = self.name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            return Err(FormError::NameTooShort);
        }
        let email = Email::parse(self.email.trim()).map_err(|_| FormError::InvalidEmail)?;
        Ok(UserUpdate {
            name: name.to_string(),
            email: email.into_inner(),
        })
    }

    fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
        }
    }

    /// Copy for re-rendering; the password is never echoed back.
    fn without_password(mut self) -> Self {
        self.password.clear();
        self
    }
}

#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(notice): Query<NoticeQuery>,
) -> Html<String> {
    let mut error = notice.error;
    let users = match state.api().users(&admin.credentials()).list().await {
        Ok(users) => without_current(users, &admin.email)
            .iter()
            .map(UserView::from)
            .collect(),
        Err(e) => {
            tracing::error!("Failed to fetch users: {e}");
            error = Some(failure_message("load users", &e));
            vec![]
        }
    };

    let template = UsersIndexTemplate {
        shell: ShellView::load(&state, &admin, PATH).await,
        users,
        success: notice.success,
        error,
    };
    render(&template)
}

#[instrument(skip(admin, state))]
pub async fn new_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    form_page(&state, &admin, None, UserForm::default(), None).await
}

#[instrument(skip(admin, state))]
pub async fn edit_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = UserId::new(id);
    let users = match state.api().users(&admin.credentials()).list().await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!(user_id = %id, "Failed to fetch users: {e}");
            return redirect_with(PATH, "error", &failure_message("load the user", &e));
        }
    };

    match users.iter().find(|u| u.id == id) {
        Some(user) => form_page(&state, &admin, Some(&id), UserForm::from_user(user), None)
            .await
            .into_response(),
        None => redirect_with(PATH, "error", "User not found."),
    }
}

#[instrument(skip(admin, state, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<UserForm>,
) -> Response {
    let user = match form.validate_new() {
        Ok(user) => user,
        Err(e) => {
            return form_page(&state, &admin, None, form.without_password(), Some(e.to_string()))
                .await
                .into_response();
        }
    };

    match state.api().users(&admin.credentials()).create(&user).await {
        Ok(()) => {
            tracing::info!(email = %user.email, "User created");
            redirect_with(PATH, "success", "User created.")
        }
        Err(e) => {
            tracing::error!("Failed to create user: {e}");
            let message = failure_message("create the user", &e);
            form_page(&state, &admin, None, form.without_password(), Some(message))
                .await
                .into_response()
        }
    }
}

#[instrument(skip(admin, state, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UserForm>,
) -> Response {
    let id = UserId::new(id);
    let update = match form.validate_update() {
        Ok(update) => update,
        Err(e) => {
            return form_page(&state, &admin, Some(&id), form, Some(e.to_string()))
                .await
                .into_response();
        }
    };

    match state
        .api()
        .users(&admin.credentials())
        .update(&id, &update)
        .await
    {
        Ok(()) => {
            tracing::info!(user_id = %id, "User updated");
            redirect_with(PATH, "success", "User updated.")
        }
        Err(e) => {
            tracing::error!(user_id = %id, "Failed to update user: {e}");
            let message = failure_message("update the user", &e);
            form_page(&state, &admin, Some(&id), form, Some(message))
                .await
                .into_response()
        }
    }
}

#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = UserId::new(id);
    match state.api().users(&admin.credentials()).delete(&id).await {
        Ok(()) => {
            tracing::info!(user_id = %id, "User deleted");
            redirect_with(PATH, "success", "User deleted.")
        }
        Err(e) => {
            tracing::error!(user_id = %id, "Failed to delete user: {e}");
            redirect_with(PATH, "error", &failure_message("delete the user", &e))
        }
    }
}

async fn form_page(
    state: &AppState,
    admin: &CurrentAdmin,
    user_id: Option<&UserId>,
    form: UserForm,
    error: Option<String>,
) -> Html<String> {
    let template = UserFormTemplate {
        shell: ShellView::load(state, admin, PATH).await,
        user_id: user_id.map(ToString::to_string),
        form,
        error,
    };
    render(&template)
}
