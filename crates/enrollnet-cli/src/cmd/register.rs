//! `enet register`: add or replace a student's registration.

use std::io::Write;

use clap::Args;
use enrollnet_core::model::{StudentRecord, normalize_courses, normalize_student_id};
use serde::Serialize;

use super::Context;
use crate::output::{CliError, pretty_kv, render, render_error};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Student ID: one letter followed by four digits (e.g. C1234).
    pub id: String,

    /// Course codes such as "SOCI 101", "psyc210" or "ECON 101.002".
    #[arg(required = true, num_args = 1..)]
    pub courses: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RegisterResult {
    success: bool,
    student_id: String,
    courses: Vec<String>,
}

/// Execute `enet register <id> <course>...`.
///
/// # Errors
///
/// Returns an error if the ID or any course code is malformed, or if the
/// registry cannot be written.
pub fn run_register(args: &RegisterArgs, ctx: &Context) -> anyhow::Result<()> {
    let normalized = normalize_student_id(&args.id)
        .and_then(|id| normalize_courses(&args.courses).map(|courses| (id, courses)));
    let (student_id, courses) = match normalized {
        Ok(pair) => pair,
        Err(e) => {
            render_error(ctx.output, &CliError::from(&e))?;
            anyhow::bail!(e);
        }
    };

    ctx.store
        .add_student(StudentRecord::new(student_id.clone(), courses.clone()), &ctx.engine)
        .map_err(|e| ctx.store_failure(e))?;

    let result = RegisterResult {
        success: true,
        student_id,
        courses,
    };
    render(ctx.output, &result, |r, w| {
        pretty_kv(w, "registered", &r.student_id)?;
        writeln!(w, "{}", r.courses.join(", "))
    })
}
