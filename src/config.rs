use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

const MIN_SECRET_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Sqlite,
}

impl std::str::FromStr for SessionBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(SessionBackend::Memory),
            "sqlite" => Ok(SessionBackend::Sqlite),
            other => Err(format!("unknown session backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub questions_path: String,
    pub shuffle_questions: bool,
    pub session_backend: SessionBackend,
    pub database_url: String,
    pub session_secret: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let session_secret = get_env("SESSION_SECRET")?;
        if session_secret.len() < MIN_SECRET_LEN {
            return Err(Error::Config(format!(
                "SESSION_SECRET must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8080"),
            questions_path: get_env_or("QUESTIONS_PATH", "questions.json"),
            shuffle_questions: get_env_parse_or("SHUFFLE_QUESTIONS", true)?,
            session_backend: get_env_parse_or("SESSION_BACKEND", SessionBackend::Memory)?,
            database_url: get_env_or("DATABASE_URL", "sqlite::memory:"),
            session_secret,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
