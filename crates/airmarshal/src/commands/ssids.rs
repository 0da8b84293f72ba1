use tracing::debug;

use meraki_core::{Enumerator, SsidMatcher, search_ssids};

use crate::cli::{GlobalOpts, SsidsArgs};
use crate::error::CliError;

pub async fn handle(args: SsidsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let timespan = super::timespan(&args.window)?;
    let matcher = SsidMatcher::new(&args.pattern)?;
    let client = super::connect(global)?;

    debug!(pattern = matcher.pattern(), %timespan, "searching air marshal SSIDs");
    let enumerator = Enumerator::new(&client, timespan);
    super::report(search_ssids(&enumerator, &matcher), global).await
}
