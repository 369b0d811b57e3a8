//! `enet stats`: network overview plus per-node centrality.
//!
//! The overview is always computed from the current records. Centralities
//! come from the registry cache unless it is stale (records or engine
//! settings changed) or `--fresh` is given.

use std::io::{self, Write};

use clap::Args;
use enrollnet_core::model::{CentralityResult, NetworkStatsSummary, NodeCentrality};
use enrollnet_network::{FullCentrality, network_stats};
use tracing::info;

use super::Context;
use crate::output::{pretty_kv, pretty_rule, pretty_section, render_mode};

/// Rows shown per graph in pretty output.
const PRETTY_TOP_N: usize = 10;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Recompute centrality now and rewrite the cache.
    #[arg(long)]
    pub fresh: bool,
}

/// Execute `enet stats`.
///
/// # Errors
///
/// Returns an error if the registry cannot be read, or with `--fresh`,
/// written.
pub fn run_stats(args: &StatsArgs, ctx: &Context) -> anyhow::Result<()> {
    let (students, cached) = if args.fresh {
        let data = ctx
            .store
            .refresh_cache(&ctx.engine)
            .map_err(|e| ctx.store_failure(e))?;
        info!("centrality cache refreshed");
        (data.students, data.cached_centrality)
    } else {
        ctx.current_centrality()?
    };

    let result = FullCentrality {
        overview: network_stats(&students, &ctx.engine.excluded),
        student_centralities: cached.students,
        course_centralities: cached.courses,
    };

    render_mode(ctx.output, &result, write_text, write_pretty)
}

fn write_overview(w: &mut dyn Write, overview: &NetworkStatsSummary) -> io::Result<()> {
    pretty_kv(w, "total_students", overview.total_students.to_string())?;
    pretty_kv(w, "total_courses", overview.total_courses.to_string())?;
    pretty_kv(
        w,
        "avg_courses_per_student",
        format!("{:.2}", overview.avg_courses_per_student),
    )?;
    pretty_kv(w, "network_density", format!("{:.4}", overview.network_density))?;
    pretty_kv(w, "student_edges", overview.student_edges.to_string())?;
    pretty_kv(w, "course_edges", overview.course_edges.to_string())
}

fn write_text(result: &FullCentrality, w: &mut dyn Write) -> io::Result<()> {
    write_overview(w, &result.overview)?;
    writeln!(w, "KIND\tID\tBETWEENNESS\tCLOSENESS\tEIGENVECTOR\tAVG_SEPARATION")?;
    for (kind, map) in [
        ("student", &result.student_centralities),
        ("course", &result.course_centralities),
    ] {
        for (id, c) in map {
            writeln!(
                w,
                "{kind}\t{id}\t{:.4}\t{:.4}\t{:.4}\t{:.2}",
                c.betweenness, c.closeness, c.eigenvector, c.avg_separation
            )?;
        }
    }
    Ok(())
}

fn write_pretty(result: &FullCentrality, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Network overview")?;
    write_overview(w, &result.overview)?;
    writeln!(w)?;
    write_ranking(w, "Students by betweenness", &result.student_centralities)?;
    writeln!(w)?;
    write_ranking(w, "Courses by betweenness", &result.course_centralities)
}

fn write_ranking(w: &mut dyn Write, heading: &str, map: &CentralityResult) -> io::Result<()> {
    pretty_section(w, heading)?;
    if map.is_empty() {
        return writeln!(w, "(none)");
    }
    writeln!(
        w,
        "{:<12} {:>11} {:>10} {:>12} {:>10}",
        "ID", "betweenness", "closeness", "eigenvector", "avg sep"
    )?;
    for (id, c) in ranked(map).into_iter().take(PRETTY_TOP_N) {
        writeln!(
            w,
            "{id:<12} {:>11.4} {:>10.4} {:>12.4} {:>10.2}",
            c.betweenness, c.closeness, c.eigenvector, c.avg_separation
        )?;
    }
    if map.len() > PRETTY_TOP_N {
        writeln!(w, "... {} more", map.len() - PRETTY_TOP_N)?;
    }
    pretty_rule(w)
}

/// Highest betweenness first; ties broken by eigenvector, then id.
fn ranked(map: &CentralityResult) -> Vec<(&str, NodeCentrality)> {
    let mut rows: Vec<(&str, NodeCentrality)> =
        map.iter().map(|(id, c)| (id.as_str(), *c)).collect();
    rows.sort_by(|(a_id, a), (b_id, b)| {
        b.betweenness
            .total_cmp(&a.betweenness)
            .then_with(|| b.eigenvector.total_cmp(&a.eigenvector))
            .then_with(|| a_id.cmp(b_id))
    });
    rows
}
