pub mod auth_retry;
