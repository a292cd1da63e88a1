use serde::Deserialize;

/// Environment prefix for every setting, e.g. `INTERLEAVING_PER_PAGE`
pub const ENV_PREFIX: &str = "INTERLEAVING_";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Page size when the caller does not pick one
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    /// Size of the synthetic candidate set
    #[serde(default = "default_candidate_count")]
    pub candidate_count: usize,
    /// Seeds candidate scores and the first-turn coin
    #[serde(default)]
    pub seed: Option<u64>,
    /// Clicks the simulation runner issues against the first page
    #[serde(default = "default_simulated_clicks")]
    pub simulated_clicks: usize,
    /// Candidate fetches slower than this are served as empty
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_service_name() -> String {
    "interleaving-service".to_string()
}

fn default_per_page() -> usize {
    20
}

fn default_candidate_count() -> usize {
    100
}

fn default_simulated_clicks() -> usize {
    5
}

fn default_fetch_timeout_ms() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            per_page: default_per_page(),
            candidate_count: default_candidate_count(),
            seed: None,
            simulated_clicks: default_simulated_clicks(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build from explicit key/value pairs (prefixed keys only)
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }
}
