use clap::ValueEnum;
use serde::Deserialize;

/// Remote environment the client talks to.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    #[default]
    Homologation,
    HomologationAlternative,
    Production,
}

impl Environment {
    pub fn oauth_domain(&self) -> &'static str {
        match self {
            Environment::Development => "https://oauth.desenv.bb.com.br",
            Environment::Homologation => "https://oauth.hm.bb.com.br",
            Environment::HomologationAlternative => "https://oauth.sandbox.bb.com.br",
            Environment::Production => "https://oauth.bb.com.br",
        }
    }

    pub fn api_domain(&self) -> &'static str {
        match self {
            Environment::Development => "https://api.desenv.bb.com.br",
            Environment::Homologation => "https://api.hm.bb.com.br",
            Environment::HomologationAlternative => "https://api.sandbox.bb.com.br",
            Environment::Production => "https://api.bb.com.br",
        }
    }
}
