//! Search subcommand handlers.

pub mod apple_tvs;
pub mod ssids;

use std::io;
use std::pin::pin;

use futures_util::{Stream, TryStreamExt};
use tracing::info;

use meraki_core::{CoreError, DashboardClient, ReportRow, Timespan};

use crate::cli::{GlobalOpts, WindowArgs};
use crate::config;
use crate::error::CliError;
use crate::output::{Reporter, TableView};

/// Validate the look-back window. Runs before any config is loaded.
fn timespan(window: &WindowArgs) -> Result<Timespan, CliError> {
    Ok(Timespan::try_from(window.timespan)?)
}

fn connect(global: &GlobalOpts) -> Result<DashboardClient, CliError> {
    let settings = config::load(global)?;
    Ok(settings.client()?)
}

/// Drain a match stream into stdout in the selected format.
async fn report<T, S>(matches: S, global: &GlobalOpts) -> Result<(), CliError>
where
    T: ReportRow + TableView,
    S: Stream<Item = Result<T, CoreError>>,
{
    let mut matches = pin!(matches);
    let mut reporter = Reporter::new(global.output, global.quiet, io::stdout());

    while let Some(row) = matches.try_next().await? {
        reporter.push(row)?;
        if reporter.is_closed() {
            break;
        }
    }

    info!(matches = reporter.count(), "search finished");
    reporter.finish()
}
