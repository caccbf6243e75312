use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;
use uuid::Uuid;

pub const MIN_BIRTH_YEAR: i32 = 1900;
pub const MIN_AGE_YEARS: i64 = 18;
pub const MAX_INFO_LENGTH: usize = 250;
pub const MAX_AVATAR_LENGTH: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub bio: String,
    pub info: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("Invalid birth date - year must be greater than 1900.")]
    BirthYearTooEarly,

    #[error("Invalid birth date - your age must be at least 18 years old.")]
    TooYoung,

    #[error("Info must be at most 250 characters")]
    InfoTooLong,

    #[error("Avatar URL must be at most 255 characters")]
    AvatarTooLong,
}

/// Editable part of a profile, checked against `today`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub bio: String,
    pub info: String,
    pub avatar: Option<String>,
}

impl ProfileFields {
    pub fn validate(&self, today: NaiveDate) -> Result<(), ProfileValidationError> {
        validate_birth_date(self.date_of_birth, today)?;

        if self.info.chars().count() > MAX_INFO_LENGTH {
            return Err(ProfileValidationError::InfoTooLong);
        }

        if let Some(avatar) = &self.avatar {
            if avatar.chars().count() > MAX_AVATAR_LENGTH {
                return Err(ProfileValidationError::AvatarTooLong);
            }
        }

        Ok(())
    }

    /// The supplied avatar, or the Gravatar identicon for `email` when it is
    /// missing or blank.
    pub fn resolved_avatar(&self, email: &str) -> String {
        match self.avatar.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => gravatar_url(email),
        }
    }
}

/// Age counts whole days since birth divided by 365, floored.
pub fn validate_birth_date(birth: NaiveDate, today: NaiveDate) -> Result<(), ProfileValidationError> {
    if birth.year() < MIN_BIRTH_YEAR {
        return Err(ProfileValidationError::BirthYearTooEarly);
    }

    let age = (today - birth).num_days().div_euclid(365);
    if age < MIN_AGE_YEARS {
        return Err(ProfileValidationError::TooYoung);
    }

    Ok(())
}

pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("https://www.gravatar.com/avatar/{:x}?d=identicon", digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn fields(date_of_birth: NaiveDate) -> ProfileFields {
        ProfileFields {
            gender: Gender::Female,
            date_of_birth,
            bio: "Writes about tea".to_string(),
            info: "Tea enthusiast".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn test_birth_year_1850_rejected() {
        let birth = NaiveDate::from_ymd_opt(1850, 1, 1).unwrap();
        assert_eq!(
            validate_birth_date(birth, today()),
            Err(ProfileValidationError::BirthYearTooEarly)
        );
    }

    #[test]
    fn test_year_1900_is_allowed() {
        let birth = NaiveDate::from_ymd_opt(1900, 6, 1).unwrap();
        assert!(validate_birth_date(birth, today()).is_ok());
    }

    #[test]
    fn test_seventeen_years_old_rejected() {
        let birth = today() - Duration::days(17 * 365);
        assert_eq!(
            validate_birth_date(birth, today()),
            Err(ProfileValidationError::TooYoung)
        );
    }

    #[test]
    fn test_nineteen_years_old_accepted() {
        let birth = today() - Duration::days(19 * 365);
        assert!(validate_birth_date(birth, today()).is_ok());
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let birth = today() + Duration::days(10);
        assert_eq!(
            validate_birth_date(birth, today()),
            Err(ProfileValidationError::TooYoung)
        );
    }

    #[test]
    fn test_info_length_limit() {
        let mut f = fields(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        f.info = "x".repeat(MAX_INFO_LENGTH);
        assert!(f.validate(today()).is_ok());

        f.info.push('x');
        assert_eq!(f.validate(today()), Err(ProfileValidationError::InfoTooLong));
    }

    #[test]
    fn test_gravatar_is_sha256_of_normalized_email() {
        assert_eq!(
            gravatar_url("  ABC "),
            "https://www.gravatar.com/avatar/ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad?d=identicon"
        );
    }

    #[test]
    fn test_resolved_avatar_prefers_supplied_url() {
        let mut f = fields(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert!(f.resolved_avatar("a@b.com").starts_with("https://www.gravatar.com/avatar/"));

        f.avatar = Some("   ".to_string());
        assert!(f.resolved_avatar("a@b.com").starts_with("https://www.gravatar.com/avatar/"));

        f.avatar = Some("https://cdn.example.com/me.png".to_string());
        assert_eq!(f.resolved_avatar("a@b.com"), "https://cdn.example.com/me.png");
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse("other"), None);
        assert_eq!(serde_json::to_value(Gender::Female).unwrap(), "female");
    }
}
