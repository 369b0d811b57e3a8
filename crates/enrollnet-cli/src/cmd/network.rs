//! `enet network`: node/link export of either co-enrollment graph.

use std::io::Write;

use clap::{Args, ValueEnum};
use enrollnet_network::{course_network_export, student_network_export};

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkKind {
    /// Students joined by shared courses.
    Students,
    /// Courses joined by shared students.
    Courses,
}

#[derive(Args, Debug)]
pub struct NetworkArgs {
    /// Which graph to export.
    #[arg(value_enum)]
    pub kind: NetworkKind,

    /// Drop links lighter than this (default: 2 for students, 3 for courses,
    /// or the configured value).
    #[arg(long)]
    pub min_weight: Option<u32>,
}

/// Execute `enet network <students|courses>`.
///
/// # Errors
///
/// Returns an error if the registry cannot be read.
pub fn run_network(args: &NetworkArgs, ctx: &Context) -> anyhow::Result<()> {
    let students = ctx.store.students().map_err(|e| ctx.store_failure(e))?;
    let excluded = &ctx.network.excluded_courses;

    match args.kind {
        NetworkKind::Students => {
            let min = args.min_weight.unwrap_or(ctx.network.student_min_edge_weight);
            let export = student_network_export(&students, excluded, min);
            render_mode(
                ctx.output,
                &export,
                |e, w| {
                    for n in &e.nodes {
                        writeln!(w, "node\t{}\t{}", n.id, n.course_count)?;
                    }
                    for l in &e.links {
                        writeln!(w, "link\t{}\t{}\t{}", l.source, l.target, l.weight)?;
                    }
                    Ok(())
                },
                |e, w| {
                    pretty_section(w, "Student network")?;
                    pretty_kv(w, "Nodes", e.nodes.len().to_string())?;
                    pretty_kv(w, "Links", format!("{} (weight >= {min})", e.links.len()))?;
                    for l in &e.links {
                        writeln!(w, "  {} -- {}  ({})", l.source, l.target, l.weight)?;
                    }
                    Ok(())
                },
            )
        }
        NetworkKind::Courses => {
            let min = args.min_weight.unwrap_or(ctx.network.course_min_edge_weight);
            let export = course_network_export(&students, excluded, min);
            render_mode(
                ctx.output,
                &export,
                |e, w| {
                    for n in &e.nodes {
                        writeln!(w, "node\t{}\t{}", n.id, n.enrollment)?;
                    }
                    for l in &e.links {
                        writeln!(w, "link\t{}\t{}\t{}", l.source, l.target, l.weight)?;
                    }
                    Ok(())
                },
                |e, w| {
                    pretty_section(w, "Course network")?;
                    pretty_kv(w, "Nodes", e.nodes.len().to_string())?;
                    pretty_kv(w, "Links", format!("{} (weight >= {min})", e.links.len()))?;
                    for l in &e.links {
                        writeln!(w, "  {} -- {}  ({})", l.source, l.target, l.weight)?;
                    }
                    Ok(())
                },
            )
        }
    }
}
