//! `enet list`: all registered students.

use std::io::{self, Write};

use chrono::Local;
use enrollnet_core::model::StudentRecord;

use super::Context;
use crate::output::{Renderable, render_list};

struct StudentRow<'a>(&'a StudentRecord);

impl Renderable for StudentRow<'_> {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let record = self.0;
        match record.registered_at {
            Some(at) => writeln!(
                w,
                "{}  {}  ({})",
                record.id,
                record.courses.join(", "),
                at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            ),
            None => writeln!(w, "{}  {}", record.id, record.courses.join(", ")),
        }
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, self.0)?;
        writeln!(w)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}\t{}", self.0.id, self.0.courses.join(","))
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "COURSES"]
    }
}

/// Execute `enet list`.
///
/// # Errors
///
/// Returns an error if the registry lock cannot be acquired.
pub fn run_list(ctx: &Context) -> anyhow::Result<()> {
    let students = ctx.store.students().map_err(|e| ctx.store_failure(e))?;
    let rows: Vec<StudentRow<'_>> = students.iter().map(StudentRow).collect();
    render_list(&rows, ctx.output)?;
    Ok(())
}
