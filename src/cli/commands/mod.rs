pub mod auth;
pub mod config;
pub mod db;
pub mod init;
pub mod list;
pub mod log;
pub mod note;
pub mod submit;
pub mod watch;
