use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;
use crate::users::model::{AccountStatus, Appointment, Role, User};
use crate::users::password;

/// Raw `users` row. Sub-objects and the appointment list come back as JSONB
/// and are validated into typed values before leaving the adapter.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password: String,
    profile_image: String,
    personal_info: Option<serde_json::Value>,
    address: Option<serde_json::Value>,
    family: Option<serde_json::Value>,
    other_info: Option<serde_json::Value>,
    status: String,
    role: String,
    appointments: serde_json::Value,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, email, password, profile_image, personal_info, address, family, \
                            other_info, status, role, appointments, created_at, updated_at";

fn decode_section<T: DeserializeOwned>(
    value: Option<serde_json::Value>,
    field: &str,
) -> Result<Option<T>, AppError> {
    value
        .map(|v| {
            serde_json::from_value(v)
                .map_err(|e| AppError::Validation(format!("invalid {field}: {e}")))
        })
        .transpose()
}

fn encode_section<T: Serialize>(section: Option<&T>) -> Result<Option<serde_json::Value>, AppError> {
    section
        .map(|s| serde_json::to_value(s).map_err(|e| AppError::Validation(e.to_string())))
        .transpose()
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, AppError> {
        let status = AccountStatus::parse(&row.status)
            .ok_or_else(|| AppError::Validation(format!("unknown account status {:?}", row.status)))?;
        let role = Role::parse(&row.role)
            .ok_or_else(|| AppError::Validation(format!("unknown role {:?}", row.role)))?;
        let appointments: Vec<Appointment> = serde_json::from_value(row.appointments)
            .map_err(|e| AppError::Validation(format!("invalid appointments: {e}")))?;
        Ok(User {
            id: row.id,
            email: row.email,
            password: row.password,
            profile_image: row.profile_image,
            personal_info: decode_section(row.personal_info, "personal_info")?,
            address: decode_section(row.address, "address")?,
            family: decode_section(row.family, "family")?,
            other_info: decode_section(row.other_info, "other_info")?,
            status,
            role,
            appointments,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_store_err(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::EmailTaken;
        }
    }
    AppError::Store(err)
}

/// Keep the stored hash when the credential was not touched; hash otherwise.
/// A handler that only edited the profile carries the persisted hash through
/// unchanged, so saving it again never re-hashes.
fn resolve_credential(current: &str, persisted: Option<&str>) -> Result<String, AppError> {
    match persisted {
        Some(stored) if stored == current => Ok(stored.to_owned()),
        _ => password::hash_password(current),
    }
}

/// Document store for `User`. One row per user, addressed by id, with the
/// unique-email constraint enforced at write time.
#[derive(Clone)]
pub struct UserStore {
    db: PgPool,
}

impl UserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }

    /// Emails are stored trimmed and lowercased; uniqueness is checked on the
    /// normalized form.
    pub fn normalize_email(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        row.map(User::try_from).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(Self::normalize_email(email))
        .fetch_optional(&self.db)
        .await?;
        row.map(User::try_from).transpose()
    }

    /// Insert a new user with a hashed credential and schema defaults.
    /// A duplicate email (after normalization) surfaces as `EmailTaken`.
    pub async fn create(&self, email: &str, plain_password: &str) -> Result<User, AppError> {
        let email = Self::normalize_email(email);
        let hash = password::hash_password(plain_password)?;
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(&email)
        .bind(&hash)
        .fetch_one(&self.db)
        .await
        .map_err(map_store_err)?;
        User::try_from(row)
    }

    /// Persist the whole document. The save pipeline is explicit: resolve the
    /// credential against the persisted value (hash only if changed or new),
    /// then write every field and bump `updated_at`.
    pub async fn save(&self, user: &User) -> Result<User, AppError> {
        let persisted: Option<String> =
            sqlx::query_scalar("SELECT password FROM users WHERE id = $1")
                .bind(user.id)
                .fetch_optional(&self.db)
                .await?;
        let credential = resolve_credential(&user.password, persisted.as_deref())?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, email, password, profile_image, personal_info, address,
                               family, other_info, status, role, appointments)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                password = EXCLUDED.password,
                profile_image = EXCLUDED.profile_image,
                personal_info = EXCLUDED.personal_info,
                address = EXCLUDED.address,
                family = EXCLUDED.family,
                other_info = EXCLUDED.other_info,
                status = EXCLUDED.status,
                role = EXCLUDED.role,
                appointments = EXCLUDED.appointments,
                updated_at = now()
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(Self::normalize_email(&user.email))
        .bind(&credential)
        .bind(&user.profile_image)
        .bind(encode_section(user.personal_info.as_ref())?)
        .bind(encode_section(user.address.as_ref())?)
        .bind(encode_section(user.family.as_ref())?)
        .bind(encode_section(user.other_info.as_ref())?)
        .bind(user.status.as_str())
        .bind(user.role.as_str())
        .bind(serde_json::to_value(&user.appointments).map_err(|e| AppError::Validation(e.to_string()))?)
        .fetch_one(&self.db)
        .await
        .map_err(map_store_err)?;
        User::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            UserStore::normalize_email("  Ana.Cruz@Example.COM  "),
            "ana.cruz@example.com"
        );
    }

    #[test]
    fn unchanged_credential_keeps_the_stored_hash_bit_for_bit() {
        let stored = password::hash_password("secret-pw").unwrap();
        let resolved = resolve_credential(&stored, Some(&stored)).unwrap();
        assert_eq!(resolved, stored);
    }

    #[test]
    fn changed_credential_is_rehashed() {
        let stored = password::hash_password("old-pw").unwrap();
        let resolved = resolve_credential("new-pw", Some(&stored)).unwrap();
        assert_ne!(resolved, "new-pw");
        assert_ne!(resolved, stored);
        assert!(password::verify_password("new-pw", &resolved).unwrap());
    }

    #[test]
    fn new_document_credential_is_hashed() {
        let resolved = resolve_credential("fresh-pw", None).unwrap();
        assert_ne!(resolved, "fresh-pw");
        assert!(password::verify_password("fresh-pw", &resolved).unwrap());
    }

    fn row(status: &str, role: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "ana.cruz@example.com".into(),
            password: "$2b$10$hash".into(),
            profile_image: String::new(),
            personal_info: Some(json!({ "givenName": "Ana", "surname": "Cruz" })),
            address: None,
            family: None,
            other_info: None,
            status: status.into(),
            role: role.into(),
            appointments: json!([]),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn row_decodes_into_a_typed_document() {
        let user = User::try_from(row("Active", "user")).unwrap();
        assert_eq!(user.status, AccountStatus::Active);
        assert_eq!(user.role, Role::User);
        let info = user.personal_info.unwrap();
        assert_eq!(info.given_name.as_deref(), Some("Ana"));
        assert!(user.address.is_none());
        assert!(user.appointments.is_empty());
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let err = User::try_from(row("Banned", "user")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn row_with_unknown_role_is_rejected() {
        let err = User::try_from(row("Active", "root")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
