use std::env;

pub const DEFAULT_JWT_SECRET: &str = "capital-care-secret-key-change-this";

// one year
pub const MAX_JWT_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub bcrypt_cost: u32,

    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: Option<u64>,

    pub yahoo_base_url: String,
    pub quote_cache_ttl_secs: u64,
    pub quote_cache_max_entries: u64,
}

impl Settings {
    pub fn uses_memory_store(&self) -> bool {
        self.mongodb_uri.eq_ignore_ascii_case("memory")
    }

    pub fn has_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// Keeps token lifetimes between one hour and one year.
pub fn clamp_jwt_ttl_hours(hours: i64) -> i64 {
    hours.clamp(1, MAX_JWT_TTL_HOURS)
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .or_else(|_| env::var("MONGO_URI"))
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "capital-care".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "0.0.0.0".to_string());

    let port = parsed::<u16>("PORT").unwrap_or(3001);

    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
    let jwt_ttl_hours = clamp_jwt_ttl_hours(parsed::<i64>("JWT_TTL_HOURS").unwrap_or(24));
    let bcrypt_cost = parsed::<u32>("BCRYPT_COST").unwrap_or(10);

    let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
    let gemini_model = env::var("GEMINI_MODEL")
        .unwrap_or_else(|_| "gemini-2.5-flash".to_string());
    let gemini_base_url = env::var("GEMINI_BASE_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
    let gemini_timeout_secs = parsed::<u64>("GEMINI_TIMEOUT_SECS");

    let yahoo_base_url = env::var("YAHOO_BASE_URL")
        .unwrap_or_else(|_| "https://query1.finance.yahoo.com".to_string());
    let quote_cache_ttl_secs = parsed::<u64>("QUOTE_CACHE_TTL_SECS").unwrap_or(60);
    let quote_cache_max_entries = parsed::<u64>("QUOTE_CACHE_MAX_ENTRIES")
        .unwrap_or(crate::services::quote_cache::DEFAULT_MAX_ENTRIES);

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        jwt_secret,
        jwt_ttl_hours,
        bcrypt_cost,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        gemini_timeout_secs,
        yahoo_base_url,
        quote_cache_ttl_secs,
        quote_cache_max_entries,
    }
}
