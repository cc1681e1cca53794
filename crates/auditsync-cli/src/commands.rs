use anyhow::Context;
use auditsync_diff::{compare_audits, diff_notes, ChangeType, ComparisonSummary, NoteLine};
use auditsync_merge::{
    apply_resolutions, merge_findings, MergeConflict, MergeOptions, MergeOutcome,
    ResolutionMode, Resolutions,
};
use colored::Colorize;

use crate::cli::*;
use crate::snapshot::Snapshot;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Merge(args) => cmd_merge(args, cli.format),
        Command::Resolve(args) => cmd_resolve(args, cli.format),
        Command::Compare(args) => cmd_compare(args, cli.format),
    }
}

/// Defaults, then the config file, then command-line flags.
fn load_options(args: &MergeOptionArgs) -> anyhow::Result<MergeOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            MergeOptions::from_toml_str(&raw)
                .with_context(|| format!("loading merge options from {}", path.display()))?
        }
        None => MergeOptions::default(),
    };
    if let Some(prefer_newer) = args.prefer_newer {
        options.prefer_newer = prefer_newer;
    }
    if let Some(hours) = args.threshold_hours {
        options.auto_merge_threshold_hours = hours;
    }
    options.validate()?;
    Ok(options)
}

fn merge_snapshots(
    local: &Snapshot,
    incoming: &Snapshot,
    options: &MergeOptions,
) -> anyhow::Result<MergeOutcome> {
    let outcome = merge_findings(
        &local.findings,
        &incoming.findings,
        &local.team_members,
        &incoming.team_members,
        options,
    )?;
    Ok(outcome)
}

fn cmd_merge(args: MergeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let options = load_options(&args.options)?;
    let local = Snapshot::load(&args.local)?;
    let incoming = Snapshot::load(&args.incoming)?;
    let outcome = merge_snapshots(&local, &incoming, &options)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_merge_summary(&outcome);
    for conflict in &outcome.conflicts {
        print_conflict(conflict);
    }
    Ok(())
}

fn cmd_resolve(args: ResolveArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut options = load_options(&args.options)?;
    if args.allow_unresolved {
        options.resolution_mode = ResolutionMode::OmitUnresolved;
    }

    let local = Snapshot::load(&args.local)?;
    let incoming = Snapshot::load(&args.incoming)?;
    let outcome = merge_snapshots(&local, &incoming, &options)?;

    let resolutions: Resolutions = match &args.resolutions {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => Resolutions::new(),
    };

    let findings = apply_resolutions(&outcome, &resolutions, options.resolution_mode)?;
    let merged = Snapshot {
        findings,
        team_members: outcome.team_members.clone(),
        ..local
    };

    match &args.output {
        Some(path) => {
            merged.save(path)?;
            if format == OutputFormat::Text {
                println!(
                    "{} Wrote {} findings to {}",
                    "✓".green().bold(),
                    merged.findings.len(),
                    path.display().to_string().bold()
                );
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&merged)?),
    }
    Ok(())
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<()> {
    let base = Snapshot::load(&args.base)?;
    let target = Snapshot::load(&args.target)?;
    let summary = compare_audits(
        &base.audit_ref(&args.base, args.base_name.as_deref()),
        &base.findings,
        &target.audit_ref(&args.target, args.target_name.as_deref()),
        &target.findings,
    )?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print_comparison(&summary),
    }
    Ok(())
}

fn print_merge_summary(outcome: &MergeOutcome) {
    let s = &outcome.summary;
    println!("{} items", s.total_items.to_string().bold());
    println!("  unchanged:   {}", s.unchanged);
    println!("  auto-merged: {}", s.auto_merged.to_string().cyan());
    println!("  new:         {}", s.new_from_incoming.to_string().green());
    println!("  team:        {}", s.team_members);
    if outcome.has_conflicts() {
        println!("  conflicts:   {}", s.conflicts.to_string().red().bold());
    } else {
        println!("{} No conflicts.", "✓".green().bold());
    }
}

fn print_conflict(conflict: &MergeConflict) {
    println!();
    println!(
        "{} {}  ({:.1}h apart)",
        "conflict".red().bold(),
        conflict.item_id.to_string().yellow().bold(),
        conflict.time_diff_hours
    );
    println!(
        "  local:    {} {}",
        conflict.local.conformance.label(),
        attribution(&conflict.local.tested_by).dimmed()
    );
    println!(
        "  incoming: {} {}",
        conflict.incoming.conformance.label(),
        attribution(&conflict.incoming.tested_by).dimmed()
    );
    if conflict.differences.notes {
        for line in diff_notes(&conflict.local.notes, &conflict.incoming.notes).lines {
            match line {
                NoteLine::Same(text) => println!("    {text}"),
                NoteLine::Removed(text) => println!("  {} {}", "-".red(), text.red()),
                NoteLine::Added(text) => println!("  {} {}", "+".green(), text.green()),
            }
        }
    }
}

fn attribution(tested_by: &str) -> String {
    if tested_by.trim().is_empty() {
        String::new()
    } else {
        format!("by {tested_by}")
    }
}

fn print_comparison(summary: &ComparisonSummary) {
    println!(
        "{} → {}",
        summary.base.name.bold(),
        summary.target.name.bold()
    );
    println!(
        "  {} improved, {} regressed, {} new, {} removed",
        summary.improved_count.to_string().green(),
        summary.regressed_count.to_string().red(),
        summary.new_count.to_string().cyan(),
        summary.removed_count.to_string().dimmed()
    );
    if summary.is_empty() {
        println!("No changes.");
        return;
    }
    for diff in &summary.diffs {
        let tag = match diff.change_type {
            ChangeType::Improved => diff.change_type.to_string().green(),
            ChangeType::Regressed => diff.change_type.to_string().red(),
            ChangeType::New => diff.change_type.to_string().cyan(),
            ChangeType::Removed => diff.change_type.to_string().dimmed(),
        };
        println!(
            "  {:<10} {:<4} {:<10} {} → {}",
            diff.item_id.to_string().yellow(),
            diff.level,
            tag,
            diff.old_status.label(),
            diff.new_status.label()
        );
    }
}
