//! User page handlers
//!
//! Thin wrappers over `UserService`: parse the request, delegate,
//! and render the matching template. Validation failures re-render
//! the form with the submitted values and inline messages instead
//! of redirecting.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::Form;
use validator::Validate;

use super::dto::{flatten_errors, CreateUserForm, EditUserForm, ListParams};
use super::views::{
    role_options, EditUserPage, FormErrors, NewUserPage, RoleOption, SizeOption, UserFormView,
    UserListPage, UserRow,
};
use crate::application::identity::{UserSearchQuery, UserService};
use crate::config::PagingConfig;
use crate::domain::{CreateUserDto, Role, UpdateUserDto};
use crate::infrastructure::database::repositories::{RoleRepository, UserRepository};
use crate::interfaces::http::common::{render, AppError};
use crate::shared::Pager;

/// Handler state — concrete over the SeaORM repositories for Axum
/// compatibility.
#[derive(Clone)]
pub struct UserPagesState {
    pub service: Arc<UserService<UserRepository, RoleRepository>>,
    pub paging: PagingConfig,
}

// ── List & search ───────────────────────────────────────────────

pub async fn list_users(
    State(state): State<UserPagesState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    let outcome = state
        .service
        .search_users(UserSearchQuery {
            field: params.field.clone(),
            value: params.value.clone(),
            page: u32::try_from(params.page.max(1)).unwrap_or(u32::MAX),
            size: params.size,
        })
        .await?;

    let size = outcome.page.limit;
    let pager = Pager::new(
        outcome.page.total_pages,
        outcome.page.page.saturating_sub(1),
        state.paging.buttons_to_show,
    );
    let sizes = state
        .paging
        .page_sizes
        .iter()
        .map(|&value| SizeOption {
            value,
            selected: value == size,
        })
        .collect();

    let page = UserListPage {
        rows: outcome.page.items.into_iter().map(UserRow::from).collect(),
        pager,
        total: outcome.page.total,
        field: params.field.unwrap_or_default(),
        value: params.value.unwrap_or_default(),
        size,
        sizes,
        invalid_id: outcome.invalid_id,
        no_matches: outcome.no_matches,
        saved: params.saved.is_some(),
        updated: params.updated.is_some(),
    };
    render(&page)
}

// ── Create ──────────────────────────────────────────────────────

pub async fn new_user_form(
    State(state): State<UserPagesState>,
) -> Result<Html<String>, AppError> {
    let roles = state.service.all_roles().await?;
    let page = NewUserPage {
        form: UserFormView {
            enabled: true,
            ..Default::default()
        },
        roles: role_options(roles, &[]),
        errors: FormErrors::default(),
    };
    render(&page)
}

pub async fn create_user(
    State(state): State<UserPagesState>,
    Form(form): Form<CreateUserForm>,
) -> Result<Response, AppError> {
    let roles = state.service.all_roles().await?;

    let mut errors = match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(e) => flatten_errors(&e),
    };

    if errors.username.is_empty() && state.service.username_taken(&form.username, None).await? {
        errors.username = "Username already exists".to_string();
    }
    if errors.email.is_empty() && state.service.email_taken(&form.email, None).await? {
        errors.email = "Email already exists".to_string();
    }

    if errors.any() {
        let page = NewUserPage {
            form: UserFormView {
                name: form.name,
                surname: form.surname,
                username: form.username,
                email: form.email,
                enabled: form.enabled,
            },
            roles: role_options(roles, &form.role_ids),
            errors,
        };
        return Ok(render(&page)?.into_response());
    }

    state
        .service
        .create_user(CreateUserDto {
            name: form.name,
            surname: form.surname,
            username: form.username,
            email: form.email,
            password: form.password,
            enabled: form.enabled,
            role_ids: known_role_ids(&roles, form.role_ids),
        })
        .await?;

    Ok(Redirect::to("/admin/users?saved=1").into_response())
}

/// Drop submitted role ids that do not belong to any known role, so a
/// forged checkbox value cannot trip the foreign key.
fn known_role_ids(roles: &[Role], submitted: Vec<i32>) -> Vec<i32> {
    submitted
        .into_iter()
        .filter(|id| roles.iter().any(|r| r.id == *id))
        .collect()
}

// ── Edit ────────────────────────────────────────────────────────

pub async fn edit_user_form(
    State(state): State<UserPagesState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let user = state.service.find_user(id).await?;
    let roles = state
        .service
        .all_roles()
        .await?
        .into_iter()
        .map(|role| RoleOption {
            checked: user.has_role(role.id),
            id: role.id,
            name: role.name,
        })
        .collect();

    let page = EditUserPage {
        user_id: user.id,
        form: UserFormView {
            name: user.name,
            surname: user.surname,
            username: user.username,
            email: user.email,
            enabled: user.enabled,
        },
        roles,
        errors: FormErrors::default(),
    };
    render(&page)
}

pub async fn update_user(
    State(state): State<UserPagesState>,
    Path(id): Path<i32>,
    Form(form): Form<EditUserForm>,
) -> Result<Response, AppError> {
    // Make sure the account exists before anything else so a bad id
    // still yields a 404, not a validation page.
    state.service.find_user(id).await?;
    let roles = state.service.all_roles().await?;

    let mut errors = match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(e) => flatten_errors(&e),
    };
    if let Some(message) = form.password_error() {
        errors.password = message.to_string();
    }

    if errors.username.is_empty()
        && state
            .service
            .username_taken(&form.username, Some(id))
            .await?
    {
        errors.username = "Username already exists".to_string();
    }
    if errors.email.is_empty() && state.service.email_taken(&form.email, Some(id)).await? {
        errors.email = "Email already exists".to_string();
    }

    if errors.any() {
        let page = EditUserPage {
            user_id: id,
            form: UserFormView {
                name: form.name,
                surname: form.surname,
                username: form.username,
                email: form.email,
                enabled: form.enabled,
            },
            roles: role_options(roles, &form.role_ids),
            errors,
        };
        return Ok(render(&page)?.into_response());
    }

    state
        .service
        .update_user(
            id,
            UpdateUserDto {
                name: form.name,
                surname: form.surname,
                username: form.username,
                email: form.email,
                password: form.password,
                enabled: form.enabled,
                role_ids: known_role_ids(&roles, form.role_ids),
            },
        )
        .await?;

    Ok(Redirect::to("/admin/users?updated=1").into_response())
}
