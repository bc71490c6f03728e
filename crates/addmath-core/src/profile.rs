//! Profile creation from the sign-in form.
//!
//! There is no authentication: "login" and "register" both just build a
//! [`User`] from what was typed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{iso_timestamp, User, UserRole};

/// Age recorded when none (or garbage) is given.
pub const DEFAULT_AGE: u32 = 17;

const USER_ID_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Sila isi semua ruangan mandatory.")]
    MissingFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub age: String,
    pub role: UserRole,
}

/// Build a profile from `form`.
///
/// Email is always required; registering also needs a name and an age.
pub fn register_profile(
    form: &ProfileForm,
    user_id: String,
    now: DateTime<Utc>,
) -> Result<User, ProfileError> {
    let email = form.email.trim();
    let name = form.name.trim();
    let age = form.age.trim();

    let missing = match form.mode {
        AuthMode::Login => email.is_empty(),
        AuthMode::Register => email.is_empty() || name.is_empty() || age.is_empty(),
    };
    if missing {
        return Err(ProfileError::MissingFields);
    }

    let name = match form.mode {
        AuthMode::Register => name.to_string(),
        AuthMode::Login => email.split('@').next().unwrap_or(email).to_string(),
    };

    Ok(User {
        user_id,
        name,
        email: email.to_string(),
        age: parse_age(age),
        role: form.role,
        joined_at: iso_timestamp(now),
        is_premium: false,
    })
}

/// Leading decimal digits, falling back to [`DEFAULT_AGE`].
fn parse_age(raw: &str) -> u32 {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u32>() {
        Ok(age) if age > 0 => age,
        _ => DEFAULT_AGE,
    }
}

/// Short base-36 identifier from a uniform random fraction in `[0, 1)`.
pub fn user_id_from_fraction(fraction: f64) -> String {
    let fraction = if fraction.is_finite() {
        fraction.abs().fract()
    } else {
        0.0
    };
    let mut value = (fraction * 36f64.powi(USER_ID_LEN as i32)) as u64;

    let mut id = vec![b'0'; USER_ID_LEN];
    for slot in id.iter_mut().rev() {
        let digit = (value % 36) as u8;
        *slot = if digit < 10 {
            b'0' + digit
        } else {
            b'a' + digit - 10
        };
        value /= 36;
    }
    String::from_utf8_lossy(&id).into_owned()
}
