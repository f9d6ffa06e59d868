use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gsig_api::{ApiClient, Priority};
use gsig_loader::{DashboardSnapshot, LeadFilter, LoadOutcome, LoaderConfig, Orchestrator};

#[derive(Debug, Parser)]
#[command(name = "gsig-cli")]
#[command(about = "Growth Signals dashboard data loader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one progressive load cycle and print a summary.
    Load,
    /// Re-analyze a targeting description, reload with its context.
    Analyze {
        /// Free-text description of who to look for.
        targeting: String,
    },
    /// Re-fetch leads with structured filters, then project a free-text
    /// search over the result.
    Leads {
        /// Case-insensitive substring match on name, role, or company.
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        geography: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
        #[arg(long)]
        min_score: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = gsig_core::load_config().context("loading configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let api = ApiClient::new(&config.backend_url, config.request_timeout_secs)
        .context("constructing API client")?;
    let orchestrator = Orchestrator::new(api, LoaderConfig::from(&config));

    let cli = Cli::parse();
    match cli.command {
        Commands::Load => {
            orchestrator.load().await;
            print_report(&orchestrator);
        }
        Commands::Analyze { targeting } => {
            match orchestrator.reanalyze(&targeting).await {
                LoadOutcome::Completed => print_report(&orchestrator),
                LoadOutcome::Skipped => println!("nothing to analyze: empty targeting description"),
            }
        }
        Commands::Leads {
            search,
            role,
            geography,
            priority,
            min_score,
        } => {
            let refetch = orchestrator.set_filter(LeadFilter {
                role,
                geography,
                priority: priority.map(Priority::from),
                min_score,
            });
            refetch.await.context("lead re-fetch task failed")?;

            let leads = match search {
                Some(term) => orchestrator.search_leads(&term),
                None => orchestrator.snapshot().leads,
            };
            if leads.is_empty() {
                println!("no matching leads");
            }
            for lead in leads {
                println!(
                    "{:<24} {:<16} {:<20} {:>4.1}/10  {}",
                    lead.name, lead.role, lead.company, lead.score, lead.priority
                );
            }
        }
    }

    Ok(())
}

fn print_report(orchestrator: &Orchestrator) {
    let snapshot: DashboardSnapshot = orchestrator.snapshot();
    println!(
        "leads: {}  tweets: {} ({} above threshold)  news: {}  deals: {}  market ticks: {}",
        snapshot.leads.len(),
        snapshot.tweets.len(),
        orchestrator.display_tweets().len(),
        snapshot.news.len(),
        snapshot.deals.len(),
        snapshot.market.len(),
    );
    println!(
        "stats: {} total leads, {} high priority, {} new today, avg score {:.1}",
        snapshot.stats.total_leads,
        snapshot.stats.high_priority_leads,
        snapshot.stats.new_leads_today,
        snapshot.stats.avg_lead_score,
    );
    for lead in snapshot.leads.iter().take(8) {
        println!(
            "  {:<24} {:<16} {:<20} {:>4.1}/10  {}",
            lead.name, lead.role, lead.company, lead.score, lead.priority
        );
    }
}
