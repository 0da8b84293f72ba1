use tracing::debug;

use meraki_core::{AppleTvMatcher, Enumerator, search_apple_tvs};

use crate::cli::{AppleTvsArgs, GlobalOpts};
use crate::error::CliError;

pub async fn handle(args: AppleTvsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let timespan = super::timespan(&args.window)?;
    let client = super::connect(global)?;

    debug!(%timespan, "searching for apple tvs");
    let enumerator = Enumerator::new(&client, timespan);
    super::report(search_apple_tvs(&enumerator, AppleTvMatcher), global).await
}
