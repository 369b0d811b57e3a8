//! `enet status`: registry metadata for cheap polling.

use chrono::Local;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Execute `enet status`.
///
/// # Errors
///
/// Returns an error if the registry lock cannot be acquired.
pub fn run_status(ctx: &Context) -> anyhow::Result<()> {
    let metadata = ctx.store.status().map_err(|e| ctx.store_failure(e))?;

    render_mode(
        ctx.output,
        &metadata,
        |m, w| {
            pretty_kv(w, "last_updated", m.last_updated.to_rfc3339())?;
            pretty_kv(w, "total_registrations", m.total_registrations.to_string())
        },
        |m, w| {
            pretty_section(w, "Registry")?;
            pretty_kv(w, "File", ctx.store.data_file().display().to_string())?;
            pretty_kv(
                w,
                "Last updated",
                m.last_updated
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            )?;
            pretty_kv(w, "Registrations", m.total_registrations.to_string())
        },
    )
}
