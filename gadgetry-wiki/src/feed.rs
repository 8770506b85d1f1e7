//! Plain-text downloads outside the Action API.

use crate::error::WikiError;

/// Fetch the body of `url` as text.
///
/// Used for the wikistats table feed; a one-shot agent is enough since the
/// feed lives on a different host than the wiki.
pub fn fetch_text(url: &str) -> Result<String, WikiError> {
    let agent = ureq::AgentBuilder::new()
        .user_agent(concat!("gadgetry/", env!("CARGO_PKG_VERSION")))
        .build();
    Ok(agent.get(url).call()?.into_string()?)
}
