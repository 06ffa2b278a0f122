use std::{
    error::Error,
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use engine::{Event, MemberBalance, Report, Totals, settlement, validate};
use settings::Format;

mod settings;

#[derive(Parser, Debug)]
#[command(name = "equalizer")]
#[command(about = "Settle the shared expenses of an event snapshot")]
struct Cli {
    /// Settings file (defaults to `settings.toml` when present).
    #[arg(long, env = "EQUALIZER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level, overrides `app.level`.
    #[arg(long)]
    level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the event totals.
    Totals(SnapshotArgs),
    /// Print the balance breakdown of every member.
    Balances(SnapshotArgs),
    /// Print the settlement report.
    Settle(SettleArgs),
    /// Audit the snapshot against the mutation rules.
    Check(SnapshotArgs),
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    /// Event snapshot (JSON).
    file: PathBuf,
}

#[derive(Args, Debug)]
struct SettleArgs {
    #[command(flatten)]
    snapshot: SnapshotArgs,
    /// Output format, overrides `report.format`.
    #[arg(long, value_enum)]
    format: Option<Format>,
    /// Print the generation time, overrides `report.timestamp`.
    #[arg(long)]
    timestamp: bool,
}

fn main() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(cli.config.as_deref())?;

    let level = cli.level.as_deref().unwrap_or(&settings.app.level);
    tracing_subscriber::fmt()
        .with_env_filter(format!("equalizer={level},engine={level}"))
        .with_writer(std::io::stderr)
        .init();

    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Totals(args) => {
            let event = load_event(&args.file)?;
            out.write_all(render_totals(&event).as_bytes())?;
        }
        Command::Balances(args) => {
            let event = load_event(&args.file)?;
            out.write_all(render_balances(&event).as_bytes())?;
        }
        Command::Settle(args) => {
            let event = load_event(&args.snapshot.file)?;
            let format = args.format.unwrap_or(settings.report.format);
            let mut report = Report::new(&event);
            if args.timestamp || settings.report.timestamp {
                report = report.generated_at(Utc::now());
            }
            match format {
                Format::Text => out.write_all(report.to_text().as_bytes())?,
                Format::Csv => out.write_all(&report.to_csv()?)?,
                Format::Json => {
                    serde_json::to_writer_pretty(&mut out, &report)?;
                    writeln!(out)?;
                }
            }
        }
        Command::Check(args) => {
            let event = load_event(&args.file)?;
            let issues = validate::snapshot(event.snapshot());
            if issues.is_empty() {
                writeln!(out, "{}: no issues", event.name)?;
                return Ok(ExitCode::SUCCESS);
            }
            for issue in &issues {
                tracing::error!("{issue}");
                writeln!(out, "{issue}")?;
            }
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_event(path: &Path) -> Result<Event, Box<dyn Error + Send + Sync>> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        tracing::error!("failed to read {}: {err}", path.display());
        err
    })?;
    let event: Event = serde_json::from_str(&raw)?;
    tracing::info!(
        event = %event.name,
        members = event.members.len(),
        expenses = event.expenses.len(),
        donations = event.donations.len(),
        "snapshot loaded"
    );
    Ok(event)
}

fn render_totals(event: &Event) -> String {
    let totals = Totals::compute(event.snapshot());
    let money = |amount: engine::Money| amount.format(event.currency);

    let mut text = format!(
        "Total Expenses: {}\n\
         Reimbursable Expenses: {}\n\
         Treasury Donations: {}\n\
         Direct Contributions: {}\n\
         Amount to Share: {}\n\
         Contributing Members: {}\n\
         Share per Contributing Member: {}\n",
        money(totals.total_expenses),
        money(totals.reimbursable_expenses),
        money(totals.total_donations),
        money(totals.direct_contributions),
        money(totals.amount_to_share),
        event.contributing_members().count(),
        money(totals.share_per_person),
    );
    if let Some(surplus) = totals.treasury_surplus() {
        text.push_str(&format!("Treasury Surplus: {}\n", money(surplus)));
    }
    text
}

fn render_balances(event: &Event) -> String {
    let money = |amount: engine::Money| amount.format(event.currency);
    settlement::balances(event.snapshot())
        .iter()
        .map(|b: &MemberBalance| {
            let status = if b.balance.is_negative() {
                "owes"
            } else if b.balance.is_positive() {
                "owed"
            } else {
                "settled"
            };
            format!(
                "{} ({}): paid {}, received {}, contributed {}, share {}, {status} {}\n",
                b.member,
                b.kind.display_name(),
                money(b.paid),
                money(b.received),
                money(b.contributed),
                money(b.share),
                money(b.balance.abs()),
            )
        })
        .collect()
}
