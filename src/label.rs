use std::fmt::Display;

/// What a code is issued for. Part of the label, so a code issued for one
/// purpose never validates for another.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    #[default]
    TwoFactor,
    EmailConfirmation,
    PasswordReset,
    ChangeEmail,
}

impl Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TwoFactor => write!(f, "TwoFactor"),
            Self::EmailConfirmation => write!(f, "EmailConfirmation"),
            Self::PasswordReset => write!(f, "PasswordReset"),
            Self::ChangeEmail => write!(f, "ChangeEmail"),
        }
    }
}

/// Builds the label binding a code to a subject and a purpose: `Totp:<subject>:<purpose>`
pub fn modifier(subject: impl Display, purpose: Purpose) -> String {
    format!("Totp:{subject}:{purpose}")
}
