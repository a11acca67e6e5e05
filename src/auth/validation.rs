//! Input validation for user signup and profile edits.
//!
//! Every rule is evaluated; failures accumulate into [`FieldErrors`] keyed by
//! field name, so a form can show all of its problems at once.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::AuthConfig;
use crate::db::UserRepository;
use crate::Result;

/// Maximum name length in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// Default minimum password length.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Field is missing or whitespace-only.
pub const BLANK: &str = "can't be blank";

/// Field does not match its format.
pub const INVALID: &str = "is invalid";

/// Another record already uses this value.
pub const TAKEN: &str = "has already been taken";

/// Password and confirmation differ.
pub const CONFIRMATION_MISMATCH: &str = "doesn't match confirmation";

/// `local@domain.tld`, ASCII letters/digits/hyphens in domain labels.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)^[\w+\-.]+@[a-z\d\-]+(\.[a-z\d\-]+)*\.[a-z]+$").expect("valid email regex")
});

/// Message for a value longer than `max` characters.
pub fn too_long(max: usize) -> String {
    format!("is too long (maximum is {max} characters)")
}

/// Message for a value shorter than `min` characters.
pub fn too_short(min: usize) -> String {
    format!("is too short (minimum is {min} characters)")
}

/// Normalize an email for storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// Check an email against the accepted format.
///
/// # Examples
///
/// ```
/// use microblog::auth::validation::is_valid_email;
///
/// assert!(is_valid_email("user@foo.COM"));
/// assert!(!is_valid_email("foo@bar..com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Field-level validation errors.
///
/// Fields are kept in name order; messages in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// True when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages for one field (empty when the field is valid).
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a field has at least one error.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Names of the fields that failed.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// `(field, messages)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Merge another error set into this one.
    pub fn extend(&mut self, other: FieldErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
    }

    /// Human-readable messages, e.g. `"Password confirmation can't be blank"`.
    pub fn full_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                let label = humanize(field);
                messages.iter().map(move |m| format!("{label} {m}"))
            })
            .collect()
    }

    /// `Ok(())` when empty, otherwise a validation error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Signup input. Has no `admin` field.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: Option<String>,
}

impl SignupForm {
    /// Create a signup form with a matching confirmation.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            name: name.into(),
            email: email.into(),
            password_confirmation: Some(password.clone()),
            password,
        }
    }

    /// Override the confirmation.
    pub fn with_confirmation(mut self, confirmation: Option<&str>) -> Self {
        self.password_confirmation = confirmation.map(str::to_string);
        self
    }
}

/// Profile edit input. Has no `admin` field.
///
/// Password fields are optional: leaving both out keeps the current password.
#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl ProfileForm {
    /// Create a profile form that leaves the password unchanged.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: None,
            password_confirmation: None,
        }
    }

    /// Set a new password and its confirmation.
    pub fn with_password(mut self, password: &str, confirmation: &str) -> Self {
        self.password = Some(password.to_string());
        self.password_confirmation = Some(confirmation.to_string());
        self
    }

    /// Whether the form asks to change the password.
    ///
    /// An empty string counts as not supplied, as HTML forms send one for an
    /// untouched password box.
    pub fn changes_password(&self) -> bool {
        let supplied = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        supplied(&self.password) || supplied(&self.password_confirmation)
    }
}

/// Field rules for users.
#[derive(Debug, Clone)]
pub struct UserValidator {
    min_password_length: usize,
}

impl Default for UserValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PASSWORD_LENGTH)
    }
}

impl UserValidator {
    /// Create a validator with the given minimum password length.
    pub fn new(min_password_length: usize) -> Self {
        Self {
            min_password_length,
        }
    }

    /// Create a validator from the `[auth]` configuration section.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.min_password_length)
    }

    /// Minimum accepted password length.
    pub fn min_password_length(&self) -> usize {
        self.min_password_length
    }

    fn check_name(&self, name: &str, errors: &mut FieldErrors) {
        if is_blank(name) {
            errors.add("name", BLANK);
        }
        if name.trim().chars().count() > MAX_NAME_LENGTH {
            errors.add("name", too_long(MAX_NAME_LENGTH));
        }
    }

    fn check_email(&self, email: &str, errors: &mut FieldErrors) {
        if is_blank(email) {
            errors.add("email", BLANK);
        } else if !is_valid_email(email) {
            errors.add("email", INVALID);
        }
    }

    fn check_password(&self, password: &str, confirmation: Option<&str>, errors: &mut FieldErrors) {
        if is_blank(password) {
            errors.add("password", BLANK);
        }
        if password.chars().count() < self.min_password_length {
            errors.add("password", too_short(self.min_password_length));
        }
        match confirmation {
            None => errors.add("password_confirmation", BLANK),
            Some(confirmation) if confirmation != password => {
                errors.add("password_confirmation", CONFIRMATION_MISMATCH);
            }
            Some(_) => {}
        }
    }

    /// Field rules for signup, without the uniqueness check.
    pub fn check_signup(&self, form: &SignupForm) -> FieldErrors {
        let mut errors = FieldErrors::new();
        self.check_name(&form.name, &mut errors);
        self.check_email(&form.email, &mut errors);
        self.check_password(
            &form.password,
            form.password_confirmation.as_deref(),
            &mut errors,
        );
        errors
    }

    /// Field rules for a profile edit, without the uniqueness check.
    pub fn check_profile(&self, form: &ProfileForm) -> FieldErrors {
        let mut errors = FieldErrors::new();
        self.check_name(&form.name, &mut errors);
        self.check_email(&form.email, &mut errors);
        if form.changes_password() {
            self.check_password(
                form.password.as_deref().unwrap_or_default(),
                form.password_confirmation.as_deref(),
                &mut errors,
            );
        }
        errors
    }

    /// All signup rules, including email uniqueness.
    pub async fn validate_signup(
        &self,
        repo: &UserRepository<'_>,
        form: &SignupForm,
    ) -> Result<()> {
        let mut errors = self.check_signup(form);
        if !errors.contains("email") && repo.email_taken(&form.email, None).await? {
            errors.add("email", TAKEN);
        }
        errors.into_result()
    }

    /// All profile rules; uniqueness ignores the user being edited.
    pub async fn validate_profile(
        &self,
        repo: &UserRepository<'_>,
        user_id: i64,
        form: &ProfileForm,
    ) -> Result<()> {
        let mut errors = self.check_profile(form);
        if !errors.contains("email") && repo.email_taken(&form.email, Some(user_id)).await? {
            errors.add("email", TAKEN);
        }
        errors.into_result()
    }
}
