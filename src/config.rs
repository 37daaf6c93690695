use std::net::SocketAddr;

use anyhow::Context;
use jiff::tz::TimeZone;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_rps: u32,
    pub request_timeout_secs: u64,
    pub display_tz: TimeZone,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        let non_empty = |key: &str| var(key).filter(|s| !s.trim().is_empty());
        let supabase_url = non_empty("SUPABASE_URL")
            .or_else(|| non_empty("PUBLIC_SUPABASE_URL"))
            .context("SUPABASE_URL must be set")?;
        let supabase_anon_key = non_empty("SUPABASE_ANON_KEY")
            .or_else(|| non_empty("PUBLIC_SUPABASE_ANON_KEY"))
            .context("SUPABASE_ANON_KEY must be set")?;

        let supabase_rps: u32 = var("SUPABASE_RPS").and_then(|s| s.parse().ok()).unwrap_or(10);

        let request_timeout_secs: u64 =
            var("REQUEST_TIMEOUT_SECS").and_then(|s| s.parse().ok()).unwrap_or(30);

        let tz_name = var("DISPLAY_TZ").unwrap_or_else(|| "Africa/Lagos".to_string());
        let display_tz = if tz_name.eq_ignore_ascii_case("UTC") {
            TimeZone::UTC
        } else {
            TimeZone::get(&tz_name).with_context(|| format!("DISPLAY_TZ: unknown zone {tz_name}"))?
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            supabase_url,
            supabase_anon_key,
            supabase_rps,
            request_timeout_secs,
            display_tz,
        })
    }
}
