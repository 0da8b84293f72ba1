// ── Search pipelines ──
//
// Enumerator stream -> matcher -> report row. Each match is yielded as soon
// as it is found so the CLI can print while the walk continues.

use futures_util::future::ready;
use futures_util::{Stream, TryStreamExt};

use crate::enumerate::Enumerator;
use crate::error::CoreError;
use crate::matcher::{AppleTvMatcher, SsidMatcher};
use crate::report::{AppleTvMatch, SsidMatch};

/// Air Marshal SSIDs whose name matches `matcher`.
pub fn search_ssids<'a>(
    enumerator: &Enumerator<'a>,
    matcher: &'a SsidMatcher,
) -> impl Stream<Item = Result<SsidMatch, CoreError>> + use<'a> {
    enumerator.air_marshal().try_filter_map(move |sighting| {
        ready(Ok(matcher
            .matches(&sighting.record)
            .then(|| SsidMatch::from(&sighting))))
    })
}

/// Clients that look like Apple TVs.
pub fn search_apple_tvs<'a>(
    enumerator: &Enumerator<'a>,
    matcher: AppleTvMatcher,
) -> impl Stream<Item = Result<AppleTvMatch, CoreError>> + use<'a> {
    enumerator.device_clients().try_filter_map(move |sighting| {
        ready(Ok(matcher
            .match_reason(&sighting.client)
            .map(|reason| AppleTvMatch::new(&sighting, reason))))
    })
}
