mod users;

use anyhow::{bail, Context};
use stamp_totp::{SystemClock, TotpOptions};
use tracing_subscriber::EnvFilter;

use crate::users::{sample_users, UserService};

const OPTIONS_VAR: &str = "TWO_FACTOR_OPTIONS";

/// Reads validation options as JSON from the environment, e.g.
/// `{"tolerance_minutes": 3, "window": "anchored"}`
fn load_options() -> anyhow::Result<TotpOptions> {
    match std::env::var(OPTIONS_VAR) {
        Ok(json) => serde_json::from_str(&json).with_context(|| format!("Invalid {OPTIONS_VAR}")),
        Err(_) => Ok(TotpOptions::default()),
    }
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = load_options()?;
    let users = UserService::new(sample_users(), options, SystemClock);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["issue", email] => {
            let code = users.two_factor_code(email)?;
            let name = &users.user_by_email(email)?.name;

            println!("Code for {name}: {code}");
        }
        ["verify", email, code] => {
            let code: i64 = code
                .parse()
                .with_context(|| format!("{code} is not a number"))?;

            println!("{}", users.validate_two_factor_code(email, code)?);
        }
        _ => bail!("usage: two_factor issue <email> | two_factor verify <email> <code>"),
    }

    Ok(())
}
