// Credential fallback through the real process environment.

#[cfg(test)]
mod test {
    use serial_test::serial;

    use crate::api::{OversightAgencyApi, TransferringAgencyApi};
    use crate::config::credentials::Credentials;
    use crate::config::settings::ClientConfig;
    use crate::error::ApiError;
    use crate::utils::constants::{ENV_APP_KEY, ENV_CLIENT_ID, ENV_CLIENT_SECRET};

    fn clear_env() {
        for name in [ENV_APP_KEY, ENV_CLIENT_ID, ENV_CLIENT_SECRET] {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn environment_fills_missing_fields() {
        clear_env();
        std::env::set_var(ENV_APP_KEY, "env-app-key");
        std::env::set_var(ENV_CLIENT_ID, "env-id");
        std::env::set_var(ENV_CLIENT_SECRET, "env-secret");

        let credentials = Credentials::resolve(None, Some("explicit-id".to_string()), None).unwrap();

        assert_eq!(credentials.app_key(), "env-app-key");
        assert_eq!(credentials.client_id(), "explicit-id");
        assert_eq!(
            credentials,
            Credentials::new("env-app-key", "explicit-id", "env-secret")
        );
        clear_env();
    }

    #[test]
    #[serial]
    fn from_env_names_the_first_missing_variable() {
        clear_env();
        std::env::set_var(ENV_APP_KEY, "env-app-key");

        let err = TransferringAgencyApi::from_env(&ClientConfig::default()).err().unwrap();
        match err {
            ApiError::MissingCredential { field, env_var } => {
                assert_eq!(field, "client_id");
                assert_eq!(env_var, ENV_CLIENT_ID);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        clear_env();
    }

    #[test]
    #[serial]
    fn from_env_builds_both_roles() {
        clear_env();
        std::env::set_var(ENV_APP_KEY, "k");
        std::env::set_var(ENV_CLIENT_ID, "i");
        std::env::set_var(ENV_CLIENT_SECRET, "s");

        assert!(TransferringAgencyApi::from_env(&ClientConfig::default()).is_ok());
        assert!(OversightAgencyApi::from_env(&ClientConfig::default()).is_ok());
        clear_env();
    }
}
