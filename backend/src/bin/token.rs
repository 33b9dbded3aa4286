//! Issue an access token for the tracker API.
//!
//! Usage: `cargo run --bin fitness-tracker-token -- [subject]`
//!
//! Uses the same configuration sources as the server (defaults, config
//! file, `FT__` environment variables), so the token is signed with the
//! secret the server will validate against.

use fitness_tracker_backend::{auth::JwtService, config::AppConfig};

const DEFAULT_SUBJECT: &str = "owner";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let subject = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

    let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry_secs);
    let token = jwt.generate_access_token(&subject)?;

    eprintln!(
        "Access token for '{}' (expires in {}s):",
        subject,
        jwt.access_token_expiry_secs()
    );
    println!("{token}");

    Ok(())
}
