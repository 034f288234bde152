use clap::{Parser, Subcommand};

use orgreport::report::{
    ProjectScopeReport, Report, StatusCounts, StatusPercentages, TaskScopeReport, TeamPerformance,
};
use orgreport::{ReportEngine, Snapshot};

#[derive(Parser)]
#[command(name = "orgreport", about = "Management report CLI")]
struct Cli {
    /// Snapshot path (default: ~/.orgreport/snapshot.json)
    #[arg(long)]
    snapshot: Option<String>,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a management report
    Report {
        #[command(subcommand)]
        target: ReportTarget,
    },
    /// Show snapshot status
    Status,
}

#[derive(Subcommand)]
enum ReportTarget {
    /// Report for a single department
    Department {
        /// Department id (24-char hex)
        department_id: String,
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report for the whole organization
    Organization {
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_as_of(as_of: Option<&str>) -> anyhow::Result<chrono::DateTime<chrono::Utc>> {
    match as_of {
        None => Ok(chrono::Utc::now()),
        Some(s) => {
            let day = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| anyhow::anyhow!("invalid --as-of date: {s} (expected YYYY-MM-DD)"))?;
            let midnight = day
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| anyhow::anyhow!("invalid --as-of date: {s}"))?;
            Ok(midnight.and_utc())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let path = match &cli.snapshot {
        Some(p) => std::path::PathBuf::from(p),
        None => Snapshot::default_path()?,
    };
    log::info!("loading snapshot from {}", path.display());
    let snapshot = Snapshot::load(&path)?;
    let engine = ReportEngine::new(snapshot);

    match cli.command {
        Commands::Status => {
            print_status(engine.snapshot());
        }
        Commands::Report { target } => match target {
            ReportTarget::Department {
                department_id,
                as_of,
                json,
            } => {
                let now = parse_as_of(as_of.as_deref())?;
                let report = engine.department_report(&department_id, now)?;
                emit_report(&report, json)?;
            }
            ReportTarget::Organization { as_of, json } => {
                let now = parse_as_of(as_of.as_deref())?;
                let report = engine.organization_report(now);
                emit_report(&report, json)?;
            }
        },
    }

    Ok(())
}

fn emit_report(report: &Report, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(report);
    }
    Ok(())
}

fn print_status(snapshot: &Snapshot) {
    println!("Snapshot Status");
    println!("  Projects:    {}", snapshot.projects.len());
    println!(
        "  Tasks:       {} ({} subtasks)",
        snapshot.tasks.len(),
        snapshot.subtask_count()
    );
    println!("  Users:       {}", snapshot.users.len());
    println!("  Departments: {}", snapshot.departments.len());
    for dept in &snapshot.departments {
        println!("    {} ({})", dept.name, dept.id);
    }
}

fn print_report(report: &Report) {
    println!(
        "Report: {} ({})",
        report.scope_info.scope_name, report.scope_info.scope_id
    );
    println!(
        "  Avg completion: tasks {:.1} days, projects {:.1} days",
        report.avg_task_completion_days, report.avg_project_completion_days
    );
    println!(
        "  Trend: {} (this month {:.1}%, last month {:.1}%)",
        report.productivity_trend,
        report.completion_rate_this_month,
        report.completion_rate_last_month
    );
    print_project_scope(&report.project_scope);
    print_task_scope(&report.task_scope);
    print_team(&report.team_performance);
}

fn print_table(label: &str, counts: &StatusCounts, pcts: &StatusPercentages) {
    println!("  {label}:");
    println!("    To Do:       {} ({:.1}%)", counts.to_do, pcts.to_do);
    println!(
        "    In Progress: {} ({:.1}%)",
        counts.in_progress, pcts.in_progress
    );
    println!("    Done:        {} ({:.1}%)", counts.done, pcts.done);
    println!("    Overdue:     {} ({:.1}%)", counts.overdue, pcts.overdue);
}

fn print_project_scope(scope: &ProjectScopeReport) {
    println!("  Projects: {}", scope.total_projects);
    print_table(
        "Project status",
        &scope.project_status_counts,
        &scope.project_status_percentages,
    );
    if !scope.milestones.is_empty() {
        println!("  Milestones:");
        for m in &scope.milestones {
            let due = m.deadline.as_deref().unwrap_or("no deadline");
            println!("    [{}] {} (due: {})", m.status, m.project_name, due);
            for group in &m.overdue_responsibility {
                println!(
                    "      late work: {} ({} tasks)",
                    group.department_name, group.count
                );
            }
            if m.has_overdue_from_other_depts {
                println!("      includes overdue work owed by other departments");
            }
        }
    }
}

fn print_task_scope(scope: &TaskScopeReport) {
    println!("  Tasks: {}", scope.total_tasks);
    print_table(
        "Task status",
        &scope.task_status_counts,
        &scope.task_status_percentages,
    );
    println!(
        "  Overdue: {} ({:.1}%)",
        scope.overdue_count, scope.overdue_percentage
    );
    for project in &scope.overdue_tasks_by_project {
        println!(
            "    {} ({} overdue)",
            project.project_name, project.overdue_count
        );
        for task in &project.overdue_tasks {
            let assignees: Vec<&str> = task
                .assigned_members
                .iter()
                .map(|m| m.name.as_deref().unwrap_or(m.id.as_str()))
                .collect();
            let assignees = if assignees.is_empty() {
                "unassigned in scope".to_string()
            } else {
                assignees.join(", ")
            };
            println!(
                "      {} - {} days late (due {}) - {}",
                task.title, task.days_past_due, task.deadline, assignees
            );
        }
    }
}

fn print_team(team: &TeamPerformance) {
    println!("  Team: {} members", team.team_size);
    for row in &team.department_team {
        let role = row.role.as_deref().unwrap_or("-");
        println!(
            "    {} [{}]: {} involved (todo {}, in progress {}, done {}), {} overdue ({:.1}%)",
            row.name,
            role,
            row.tasks_involved,
            row.todo,
            row.in_progress,
            row.completed,
            row.overdue_tasks,
            row.overdue_rate
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_as_of() {
        let dt = parse_as_of(Some("2025-06-15")).unwrap();
        assert_eq!(
            dt.date_naive(),
            chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
        );
        assert!(parse_as_of(Some("June 15th")).is_err());
        assert!(parse_as_of(None).is_ok());
    }
}
