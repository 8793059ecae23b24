use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::FieldValidationError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            pub fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }
    };
}

id_newtype!(AttemptId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Status,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Status,
    ];

    /// Form key, also used as the JSON key on the wire.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Status => "status",
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            FormField::Name => "Please enter your full name.",
            FormField::Email => "Please enter a valid email address.",
            FormField::Phone => "Please enter your phone number.",
            FormField::Status => "Please select your status.",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Confirmed,
    Tentative,
    Declined,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Tentative => "tentative",
            RegistrationStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = FieldValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "tentative" => Ok(RegistrationStatus::Tentative),
            "declined" => Ok(RegistrationStatus::Declined),
            _ => Err(FieldValidationError::required(FormField::Status)),
        }
    }
}

/// Raw values as read from the form, before trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Status => &self.status,
        }
    }
}

/// The body of one registration attempt.
///
/// Built fresh from the form at submission time and never mutated afterwards;
/// the fields are private so the only way in is [`RegistrationPayload::from_form`],
/// which guarantees every field is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationPayload {
    name: String,
    email: String,
    phone: String,
    status: RegistrationStatus,
}

impl RegistrationPayload {
    pub fn from_form(fields: &FormFields) -> Result<Self, FieldValidationError> {
        let name = required_trimmed(fields, FormField::Name)?;
        let email = required_trimmed(fields, FormField::Email)?;
        let phone = required_trimmed(fields, FormField::Phone)?;
        let status = fields.status.parse::<RegistrationStatus>()?;

        Ok(Self {
            name,
            email,
            phone,
            status,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn status(&self) -> RegistrationStatus {
        self.status
    }
}

fn required_trimmed(fields: &FormFields, field: FormField) -> Result<String, FieldValidationError> {
    let value = fields.get(field).trim();
    if value.is_empty() {
        return Err(FieldValidationError::required(field));
    }
    Ok(value.to_string())
}
