//! CLI-side configuration: turns `GlobalOpts` into figment overrides.

use meraki_config::{Overrides, Settings};

use crate::cli::GlobalOpts;
use crate::error::CliError;

impl From<&GlobalOpts> for Overrides {
    fn from(global: &GlobalOpts) -> Self {
        Self {
            api_key: global.api_key.clone(),
            base_url: global.base_url.clone(),
            timeout: global.timeout,
            retry_attempts: global.retry_attempts,
        }
    }
}

/// Load settings with the flags in `global` layered over the environment.
pub fn load(global: &GlobalOpts) -> Result<Settings, CliError> {
    Ok(Settings::load(&Overrides::from(global))?)
}
