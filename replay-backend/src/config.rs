// src/config.rs
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    /// 表示名の解決に使う外部認証APIのベースURL
    pub identity_api_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        let database_url = env::var("DATABASE_URL")?;
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let identity_api_url = env::var("IDENTITY_API_URL")
            .unwrap_or_else(|_| "https://auth.spacestation14.com".to_string());
        let jwt_secret = env::var("JWT_SECRET")?;
        let jwt_expiry_hours = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        Ok(Config {
            database_url,
            server_addr,
            identity_api_url,
            jwt_secret,
            jwt_expiry_hours,
        })
    }
}
