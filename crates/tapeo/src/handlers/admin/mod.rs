//! Admin JSON API handlers, mounted under `/api/admin`.
//!
//! Every route requires an editor session; user management also
//! accepts the provisioning secret header. Mutation handlers answer
//! with the `{"success", "<entity>", "message"}` envelope and queue
//! the affected public pages for IndexNow.

pub mod categories;
pub mod cities;
pub mod curation;
pub mod dashboard;
pub mod feedback;
pub mod guides;
pub mod notifications;
pub mod qr_codes;
pub mod reviews;
pub mod users;
pub mod venues;

use crate::{state::AppState, urls};

/// Queue the public pages touched by a mutation for IndexNow.
///
/// Paths are site-relative; the sink is a no-op when IndexNow is not
/// configured, so callers never need to guard this.
pub(crate) fn ping_indexnow(state: &AppState, paths: Vec<String>) {
    let absolute = paths
        .iter()
        .map(|path| urls::absolute(&state.base_url, path))
        .collect();
    state.indexnow.submit(absolute);
}
