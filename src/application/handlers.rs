use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::auth::jwt::{AdminUser, AuthUser};
use crate::error::AppError;
use crate::state::AppState;
use crate::users::merge::merge_section;
use crate::users::model::User;

use super::dto::{ProfileDto, ProfileResponse, SaveApplicationRequest, SaveApplicationResponse};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/application", get(get_application).post(save_application))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/admin/users/:id/application",
        get(get_user_application_by_id),
    )
}

/// Merge the payload into the document, section by section. Sections the
/// payload omits keep their stored fields; after the first save all four
/// exist (possibly empty), matching the form's read shape.
fn apply_payload(user: &mut User, payload: &SaveApplicationRequest) -> Result<(), AppError> {
    user.personal_info = Some(merge_section(
        user.personal_info.as_ref(),
        payload.personal_info.as_ref(),
    )?);
    user.address = Some(merge_section(user.address.as_ref(), payload.address.as_ref())?);
    user.other_info = Some(merge_section(
        user.other_info.as_ref(),
        payload.other_info.as_ref(),
    )?);
    user.family = Some(merge_section(user.family.as_ref(), payload.family.as_ref())?);
    Ok(())
}

fn read_failure(err: AppError) -> Response {
    error!(error = %err, "application read failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Server error" })),
    )
        .into_response()
}

fn write_failure(err: AppError) -> Response {
    error!(error = %err, "application save failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "message": "Server error" })),
    )
        .into_response()
}

/// Current user's application form.
#[instrument(skip(state))]
pub async fn get_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Response {
    match state.store.find_by_id(user_id).await {
        Ok(Some(user)) => match ProfileDto::from_user(&user) {
            Ok(profile) => Json(ProfileResponse {
                profile: Some(profile),
            })
            .into_response(),
            Err(err) => read_failure(err),
        },
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ProfileResponse { profile: None }),
        )
            .into_response(),
        Err(err) => read_failure(err),
    }
}

/// Save or update the current user's application form.
#[instrument(skip(state, payload))]
pub async fn save_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SaveApplicationRequest>,
) -> Response {
    let mut user = match state.store.find_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return AppError::NotFound.into_response(),
        Err(err) => return write_failure(err),
    };

    if let Err(err) = apply_payload(&mut user, &payload) {
        return write_failure(err);
    }

    let saved = match state.store.save(&user).await {
        Ok(saved) => saved,
        Err(err) => return write_failure(err),
    };

    match ProfileDto::from_user(&saved) {
        Ok(profile) => {
            info!(user_id = %saved.id, "application form saved");
            Json(SaveApplicationResponse {
                success: true,
                message: "Application form saved successfully".into(),
                profile,
            })
            .into_response()
        }
        Err(err) => write_failure(err),
    }
}

/// Admin read of any user's application form by id.
#[instrument(skip(state))]
pub async fn get_user_application_by_id(
    State(state): State<AppState>,
    AdminUser(_admin_id): AdminUser,
    Path(id): Path<Uuid>,
) -> Response {
    match state.store.find_by_id(id).await {
        Ok(Some(user)) => match ProfileDto::from_user(&user) {
            Ok(profile) => Json(ProfileResponse {
                profile: Some(profile),
            })
            .into_response(),
            Err(err) => read_failure(err),
        },
        Ok(None) => AppError::NotFound.into_response(),
        Err(err) => read_failure(err),
    }
}
