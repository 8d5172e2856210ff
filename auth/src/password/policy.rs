use std::fmt;

/// A single rule a password failed to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordViolation {
    TooShort,
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
    MissingSpecialCharacter,
}

impl PasswordViolation {
    /// Stable machine-readable code for the violation.
    pub fn code(&self) -> &'static str {
        match self {
            PasswordViolation::TooShort => "too_short",
            PasswordViolation::MissingLowercase => "missing_lowercase",
            PasswordViolation::MissingUppercase => "missing_uppercase",
            PasswordViolation::MissingDigit => "missing_digit",
            PasswordViolation::MissingSpecialCharacter => "missing_special_character",
        }
    }
}

impl fmt::Display for PasswordViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            PasswordViolation::TooShort => "Password must be at least 8 characters long",
            PasswordViolation::MissingLowercase => {
                "Password must contain at least one lowercase letter"
            }
            PasswordViolation::MissingUppercase => {
                "Password must contain at least one uppercase letter"
            }
            PasswordViolation::MissingDigit => "Password must contain at least one number",
            PasswordViolation::MissingSpecialCharacter => {
                "Password must contain at least one special character (@$!%*?&)"
            }
        };
        f.write_str(message)
    }
}

/// Outcome of checking a password against [`PasswordPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordValidation {
    violations: Vec<PasswordViolation>,
}

impl PasswordValidation {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violated rules in rule order.
    pub fn violations(&self) -> &[PasswordViolation] {
        &self.violations
    }

    /// Convert into a `Result`, yielding every violation on failure.
    pub fn into_result(self) -> Result<(), Vec<PasswordViolation>> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self.violations)
        }
    }
}

/// Fixed password strength rules.
///
/// Every rule is checked independently so callers get the complete list of
/// problems in one pass.
pub struct PasswordPolicy;

impl PasswordPolicy {
    pub const MIN_LENGTH: usize = 8;
    pub const SPECIAL_CHARACTERS: [char; 7] = ['@', '$', '!', '%', '*', '?', '&'];

    /// Validate a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to check
    ///
    /// # Returns
    /// PasswordValidation listing every violated rule in rule order
    pub fn validate(password: &str) -> PasswordValidation {
        let mut violations = Vec::new();

        if password.chars().count() < Self::MIN_LENGTH {
            violations.push(PasswordViolation::TooShort);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            violations.push(PasswordViolation::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            violations.push(PasswordViolation::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PasswordViolation::MissingDigit);
        }
        if !password
            .chars()
            .any(|c| Self::SPECIAL_CHARACTERS.contains(&c))
        {
            violations.push(PasswordViolation::MissingSpecialCharacter);
        }

        PasswordValidation { violations }
    }
}
