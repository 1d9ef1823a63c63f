pub mod common;

mod credentials_from_env;
