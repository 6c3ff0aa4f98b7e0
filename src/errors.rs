//! Unified application error type.
//! All modules (db, store, auth, core, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::models::status::Status;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Failed to save activity: {0}")]
    RemoteWrite(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Clock-in ({clock_in}) must be earlier than clock-out ({clock_out})")]
    InvalidTimeRange { clock_in: String, clock_out: String },

    #[error("Invalid status: {0} (use {list})", list = Status::writable_list())]
    InvalidStatus(String),

    #[error("Invalid page size: {0} (use 5, 10, 50 or 100)")]
    InvalidPageSize(usize),

    #[error("Invalid page number: {0}")]
    InvalidPage(usize),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {0} characters long")]
    WeakPassword(usize),

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("Login failed. Wrong email or password.")]
    AuthFailed,

    #[error("User not logged in.")]
    NotLoggedIn,

    #[error("Still loading user session.")]
    SessionLoading,

    #[error("A user with email {0} already exists")]
    UserExists(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("No activity found for {email} on {date}")]
    RecordNotFound { email: String, date: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type AppResult<T> = Result<T, AppError>;
