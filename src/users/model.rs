use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Account status. Suspended accounts keep their data but are locked out
/// by the auth layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Inactive => "Inactive",
            AccountStatus::Suspended => "Suspended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(AccountStatus::Active),
            "Inactive" => Some(AccountStatus::Inactive),
            "Suspended" => Some(AccountStatus::Suspended),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// The `personal_info` profile sub-object. Wire names match the original
/// application form exactly (camelCase, `isPWD` included).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub civil_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(rename = "isPWD", default)]
    pub is_pwd: bool,
    #[serde(default)]
    pub is_first_time_job_seeker: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barangay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

/// Parent name group inside `family`. Parents carry birth place fields,
/// the spouse group does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpouseInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Family {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father: Option<ParentInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother: Option<ParentInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse: Option<SpouseInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifying_marks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

fn default_amount() -> f64 {
    250.0
}

/// One clearance appointment. Appended by the booking flow; this model only
/// carries the records and their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub police_station: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub appointment_date: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default = "default_amount")]
    pub amount: f64,
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The user document. One row per registered individual; the profile
/// sub-objects stay unset until the application form first writes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Always a bcrypt hash at rest; the store's save pipeline re-hashes
    /// whenever this differs from the persisted value.
    #[serde(skip_serializing)]
    pub password: String,
    pub profile_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<Family>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_info: Option<OtherInfo>,
    pub status: AccountStatus,
    pub role: Role,
    pub appointments: Vec<Appointment>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn personal_info_uses_original_wire_names() {
        let info: PersonalInfo = serde_json::from_value(json!({
            "givenName": "Ana",
            "surname": "Cruz",
            "isPWD": true,
            "isFirstTimeJobSeeker": false,
            "civilStatus": "Single"
        }))
        .unwrap();
        assert_eq!(info.given_name.as_deref(), Some("Ana"));
        assert_eq!(info.surname.as_deref(), Some("Cruz"));
        assert!(info.is_pwd);
        assert!(!info.is_first_time_job_seeker);
        assert_eq!(info.civil_status.as_deref(), Some("Single"));

        let out = serde_json::to_value(&info).unwrap();
        assert_eq!(out["givenName"], "Ana");
        assert_eq!(out["isPWD"], true);
        // unset optionals stay off the wire
        assert!(out.get("middleName").is_none());
    }

    #[test]
    fn boolean_flags_default_to_false() {
        let info: PersonalInfo = serde_json::from_value(json!({ "givenName": "Ana" })).unwrap();
        assert!(!info.is_pwd);
        assert!(!info.is_first_time_job_seeker);
    }

    #[test]
    fn sex_rejects_unknown_variant() {
        let result: Result<PersonalInfo, _> =
            serde_json::from_value(json!({ "sex": "Other" }));
        assert!(result.is_err());
    }

    #[test]
    fn appointment_defaults_apply() {
        let appt: Appointment = serde_json::from_value(json!({
            "purpose": "Local employment",
            "policeStation": "Station 4"
        }))
        .unwrap();
        assert_eq!(appt.status, AppointmentStatus::Pending);
        assert_eq!(appt.payment_status, PaymentStatus::Unpaid);
        assert_eq!(appt.amount, 250.0);
        assert_eq!(appt.police_station.as_deref(), Some("Station 4"));
    }

    #[test]
    fn appointment_status_round_trips_lowercase() {
        let appt: Appointment = serde_json::from_value(json!({
            "status": "confirmed",
            "paymentStatus": "paid",
            "amount": 180
        }))
        .unwrap();
        assert_eq!(appt.status, AppointmentStatus::Confirmed);
        assert_eq!(appt.payment_status, PaymentStatus::Paid);
        assert_eq!(appt.amount, 180.0);

        let out = serde_json::to_value(&appt).unwrap();
        assert_eq!(out["status"], "confirmed");
        assert_eq!(out["paymentStatus"], "paid");
    }

    #[test]
    fn status_and_role_parse_round_trip() {
        for status in [
            AccountStatus::Active,
            AccountStatus::Inactive,
            AccountStatus::Suspended,
        ] {
            assert_eq!(AccountStatus::parse(status.as_str()), Some(status));
        }
        for role in [Role::User, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(AccountStatus::parse("active"), None);
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn empty_family_serializes_to_empty_object() {
        let family = Family::default();
        assert_eq!(serde_json::to_value(&family).unwrap(), json!({}));
    }
}
