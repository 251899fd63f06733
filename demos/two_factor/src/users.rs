use anyhow::{anyhow, Result};
use stamp_totp::{generate_code, modifier, Clock, OtpCode, Purpose, TotpOptions};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Rotating this invalidates every code issued to the user
    pub security_stamp: String,
}

/// Issues and checks two-factor codes for the users of a directory.
pub struct UserService<C> {
    users: Vec<User>,
    options: TotpOptions,
    clock: C,
}

impl<C: Clock> UserService<C> {
    pub fn new(users: Vec<User>, options: TotpOptions, clock: C) -> Self {
        Self {
            users,
            options,
            clock,
        }
    }

    pub fn user_by_email(&self, email: &str) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .ok_or_else(|| anyhow!("No user with email {email}"))
    }

    pub fn two_factor_code(&self, email: &str) -> Result<OtpCode> {
        let user = self.user_by_email(email)?;
        let label = modifier(user.id, Purpose::TwoFactor);

        let code = generate_code(
            &self.clock,
            Some(user.security_stamp.as_bytes()),
            Some(label.as_bytes()),
        )?;
        tracing::info!(user = user.id, "issued two-factor code");

        Ok(code)
    }

    pub fn validate_two_factor_code(&self, email: &str, code: i64) -> Result<bool> {
        let user = self.user_by_email(email)?;
        let label = modifier(user.id, Purpose::TwoFactor);

        let valid = self.options.validate(
            &self.clock,
            Some(user.security_stamp.as_bytes()),
            code,
            Some(label.as_bytes()),
        )?;
        tracing::info!(user = user.id, valid, "checked two-factor code");

        Ok(valid)
    }
}

pub fn sample_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Farhad".into(),
            email: "farhad@example.com".into(),
            security_stamp: "87214ac2-ba59-41e7-8d18-e868560925be".into(),
        },
        User {
            id: 2,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            security_stamp: "5f0c1d2e-9a7b-4c3d-8e6f-1a2b3c4d5e6f".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use stamp_totp::{FixedClock, TotpOptions};

    use crate::users::{sample_users, UserService};

    fn service(clock: FixedClock) -> UserService<FixedClock> {
        UserService::new(sample_users(), TotpOptions::new(), clock)
    }

    #[test]
    fn issued_code_validates() {
        let users = service(FixedClock::at_unix_seconds(1_700_000_000));

        let code = users.two_factor_code("farhad@example.com").unwrap();

        assert!(users
            .validate_two_factor_code("Farhad@Example.com", code.integer().into())
            .unwrap());
    }

    #[test]
    fn unknown_user_is_an_error() {
        let users = service(FixedClock::at_unix_seconds(0));

        assert!(users.two_factor_code("nobody@example.com").is_err());
        assert!(users
            .validate_two_factor_code("nobody@example.com", 0)
            .is_err());
    }

    #[test]
    fn codes_expire() {
        let mut clock = FixedClock::at_unix_seconds(1_700_000_000);
        let code = service(clock)
            .two_factor_code("ada@example.com")
            .unwrap();

        clock.advance(Duration::from_secs(10 * 60));

        assert!(!service(clock)
            .validate_two_factor_code("ada@example.com", code.integer().into())
            .unwrap());
    }
}
