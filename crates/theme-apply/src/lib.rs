//! Resolve MIUI theme share links and apply theme packages through the MIUI theme manager.

pub mod api_client;
pub mod applier;
pub mod display_mode;
pub mod link;
pub mod messages;
pub mod util;
