//! `enet remove`: drop a student's registration.

use clap::Args;
use enrollnet_core::error::ErrorCode;
use enrollnet_core::model::normalize_student_id;
use serde::Serialize;

use super::Context;
use crate::output::{CliError, pretty_kv, render, render_error};

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Student ID to remove.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct RemoveResult {
    success: bool,
    student_id: String,
}

/// Execute `enet remove <id>`.
///
/// # Errors
///
/// Returns an error if the ID is malformed, no student has it, or the
/// registry cannot be written.
pub fn run_remove(args: &RemoveArgs, ctx: &Context) -> anyhow::Result<()> {
    let student_id = match normalize_student_id(&args.id) {
        Ok(id) => id,
        Err(e) => {
            render_error(ctx.output, &CliError::from(&e))?;
            anyhow::bail!(e);
        }
    };

    let removed = ctx
        .store
        .remove_student(&student_id, &ctx.engine)
        .map_err(|e| ctx.store_failure(e))?;

    if !removed {
        render_error(
            ctx.output,
            &CliError::from_code(
                ErrorCode::StudentNotFound,
                format!("student '{student_id}' not found"),
            ),
        )?;
        anyhow::bail!("student '{student_id}' not found");
    }

    let result = RemoveResult {
        success: true,
        student_id,
    };
    render(ctx.output, &result, |r, w| pretty_kv(w, "removed", &r.student_id))
}
