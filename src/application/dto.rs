use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::users::merge::FieldMap;
use crate::users::model::User;

/// The four application-form sections, each an object (`{}` when unset).
#[derive(Debug, Serialize)]
pub struct ProfileDto {
    pub personal_info: Value,
    pub address: Value,
    pub other_info: Value,
    pub family: Value,
}

fn section_json<T: serde::Serialize>(section: Option<&T>) -> Result<Value, AppError> {
    match section {
        Some(section) => {
            serde_json::to_value(section).map_err(|e| AppError::Validation(e.to_string()))
        }
        None => Ok(Value::Object(Default::default())),
    }
}

impl ProfileDto {
    pub fn from_user(user: &User) -> Result<Self, AppError> {
        Ok(Self {
            personal_info: section_json(user.personal_info.as_ref())?,
            address: section_json(user.address.as_ref())?,
            other_info: section_json(user.other_info.as_ref())?,
            family: section_json(user.family.as_ref())?,
        })
    }
}

/// Read-path envelope: `profile` is `null` when the document is absent.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<ProfileDto>,
}

/// Partial update payload. Sections arrive as raw field maps so that merging
/// sees exactly the keys the client sent.
#[derive(Debug, Default, Deserialize)]
pub struct SaveApplicationRequest {
    pub personal_info: Option<FieldMap>,
    pub address: Option<FieldMap>,
    pub other_info: Option<FieldMap>,
    pub family: Option<FieldMap>,
}

#[derive(Debug, Serialize)]
pub struct SaveApplicationResponse {
    pub success: bool,
    pub message: String,
    pub profile: ProfileDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::model::{AccountStatus, PersonalInfo, Role};
    use serde_json::json;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn bare_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "ana.cruz@example.com".into(),
            password: "$2b$10$hash".into(),
            profile_image: String::new(),
            personal_info: None,
            address: None,
            family: None,
            other_info: None,
            status: AccountStatus::Active,
            role: Role::User,
            appointments: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn unset_sections_render_as_empty_objects() {
        let profile = ProfileDto::from_user(&bare_user()).unwrap();
        let out = serde_json::to_value(&profile).unwrap();
        assert_eq!(out["personal_info"], json!({}));
        assert_eq!(out["address"], json!({}));
        assert_eq!(out["other_info"], json!({}));
        assert_eq!(out["family"], json!({}));
    }

    #[test]
    fn missing_document_serializes_profile_null() {
        let response = ProfileResponse { profile: None };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "profile": null })
        );
    }

    #[test]
    fn populated_section_keeps_wire_names() {
        let mut user = bare_user();
        user.personal_info = Some(PersonalInfo {
            given_name: Some("Ana".into()),
            ..PersonalInfo::default()
        });
        let profile = ProfileDto::from_user(&user).unwrap();
        let out = serde_json::to_value(&profile).unwrap();
        assert_eq!(out["personal_info"]["givenName"], "Ana");
        assert_eq!(out["personal_info"]["isPWD"], false);
    }

    #[test]
    fn save_request_tolerates_omitted_sections() {
        let request: SaveApplicationRequest =
            serde_json::from_value(json!({ "address": { "city": "Cebu" } })).unwrap();
        assert!(request.personal_info.is_none());
        assert!(request.family.is_none());
        let address = request.address.unwrap();
        assert_eq!(address["city"], "Cebu");
    }
}
