use anyhow::Result;
use log::info;

use super::VideoPlatform;
use crate::domain::ChannelLookup;

/// Map a user-supplied channel name or `@handle` to a channel id.
///
/// `Ok(None)` means the platform answered with no match. Transport and API
/// failures are returned as errors so callers can tell them apart from absence.
pub async fn resolve_channel_id<P: VideoPlatform>(platform: &P, input: &str) -> Result<Option<String>> {
    let channel_id = match ChannelLookup::parse(input) {
        ChannelLookup::Handle(handle) => platform.search_channel_by_handle(&handle).await?,
        ChannelLookup::Username(username) if username.is_empty() => None,
        ChannelLookup::Username(username) => platform.find_channel_by_username(&username).await?,
    };

    match &channel_id {
        Some(id) => info!("Resolved {:?} to channel {}", input, id),
        None => info!("No channel found for {:?}", input),
    }
    Ok(channel_id)
}
