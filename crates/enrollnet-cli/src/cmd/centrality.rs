//! `enet centrality`: one node's scores, from the cache while it is current.

use clap::{Args, Subcommand};
use enrollnet_core::error::ErrorCode;
use enrollnet_core::model::{NodeCentrality, normalize_student_id, parse_course_code};
use serde::Serialize;

use super::Context;
use crate::output::{CliError, pretty_kv, pretty_section, render_mode, render_error};

#[derive(Args, Debug)]
pub struct CentralityArgs {
    #[command(subcommand)]
    pub target: CentralityTarget,
}

#[derive(Subcommand, Debug)]
pub enum CentralityTarget {
    /// Scores for a student in the student network.
    Student {
        /// Student ID.
        id: String,
    },
    /// Scores for a course in the course network.
    Course {
        /// Course code, e.g. "PSYC 210".
        code: String,
    },
}

#[derive(Debug, Serialize)]
struct NodeReport {
    id: String,
    centrality: NodeCentrality,
}

/// Execute `enet centrality <student|course> <id>`.
///
/// # Errors
///
/// Returns an error if the node has no cached scores or the registry cannot
/// be read.
pub fn run_centrality(args: &CentralityArgs, ctx: &Context) -> anyhow::Result<()> {
    let (_, cached) = ctx.current_centrality()?;

    let (id, scores, missing) = match &args.target {
        CentralityTarget::Student { id } => {
            let id = normalize_student_id(id).unwrap_or_else(|_| id.trim().to_uppercase());
            let scores = cached.students.get(&id).copied();
            (id, scores, ErrorCode::StudentNotFound)
        }
        CentralityTarget::Course { code } => {
            let id = parse_course_code(code).unwrap_or_else(|_| code.trim().to_uppercase());
            let scores = cached.courses.get(&id).copied();
            (id, scores, ErrorCode::CourseNotFound)
        }
    };

    let Some(centrality) = scores else {
        let message = format!("{} '{id}'", missing.message().to_lowercase());
        render_error(ctx.output, &CliError::from_code(missing, message.clone()))?;
        anyhow::bail!(message);
    };

    let report = NodeReport { id, centrality };
    render_mode(
        ctx.output,
        &report,
        |r, w| {
            pretty_kv(w, "id", &r.id)?;
            write_scores(w, &r.centrality)
        },
        |r, w| {
            pretty_section(w, &r.id)?;
            write_scores(w, &r.centrality)
        },
    )
}

fn write_scores(w: &mut dyn std::io::Write, c: &NodeCentrality) -> std::io::Result<()> {
    pretty_kv(w, "betweenness", format!("{:.4}", c.betweenness))?;
    pretty_kv(w, "closeness", format!("{:.4}", c.closeness))?;
    pretty_kv(w, "eigenvector", format!("{:.4}", c.eigenvector))?;
    pretty_kv(w, "avg_separation", format!("{:.2}", c.avg_separation))
}
