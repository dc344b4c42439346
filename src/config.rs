use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

pub const DEFAULT_SOURCES: &str = "Sources.tab.json";
pub const DEFAULT_OUT_DIR: &str = ".";
pub const DEFAULT_WIKI_URL: &str = "https://en.wikipedia.org/w/index.php";
pub const DEFAULT_USER_AGENT: &str = concat!("covid_tabular/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Run settings shared by every subcommand. Each option can also come from
/// a `COVID_*` environment variable.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Source registry: a tab.json file whose data rows are [country code, page]
    #[arg(long, env = "COVID_SOURCES", default_value = DEFAULT_SOURCES, global = true)]
    pub sources: PathBuf,

    /// Directory that receives the <cc>.tab.json files
    #[arg(long, env = "COVID_OUT_DIR", default_value = DEFAULT_OUT_DIR, global = true)]
    pub out_dir: PathBuf,

    /// index.php endpoint of the wiki to read raw page markup from
    #[arg(long, env = "COVID_WIKI_URL", default_value = DEFAULT_WIKI_URL, global = true)]
    pub wiki_url: String,

    /// User-Agent sent with every request (public wikis block anonymous bots)
    #[arg(long, env = "COVID_USER_AGENT", default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", env = "COVID_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sources: PathBuf::from(DEFAULT_SOURCES),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            wiki_url: DEFAULT_WIKI_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
