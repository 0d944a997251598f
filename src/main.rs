use clap::{Parser, Subcommand};
use spot_placer::campaign::filter_eligible;
use spot_placer::catalog::{load_catalog, load_episode};
use spot_placer::config::PlacerSettings;
use spot_placer::placement::Strategy;
use spot_placer::slot::{SlotCounting, SlotType};
use spot_placer::CampaignPlacer;
use std::fmt::Display;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spotplacer", about = "Podcast ad spot placement CLI")]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place campaigns into an episode and print the composed script
    Place {
        /// Episode JSON file
        #[arg(short, long)]
        episode: PathBuf,
        /// Campaign catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,
        /// Strategy: first-fit or max-revenue (overrides config)
        #[arg(short, long)]
        strategy: Option<String>,
        /// Slot counting: literal or bracketed (overrides config)
        #[arg(long)]
        counting: Option<String>,
        /// Eligible-campaign limit for max-revenue (overrides config)
        #[arg(long)]
        max_candidates: Option<usize>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show slot counts for an episode
    Slots {
        /// Episode JSON file
        #[arg(short, long)]
        episode: PathBuf,
        /// Slot counting: literal or bracketed (overrides config)
        #[arg(long)]
        counting: Option<String>,
    },
    /// List campaigns eligible for an episode
    Eligible {
        /// Episode JSON file
        #[arg(short, long)]
        episode: PathBuf,
        /// Campaign catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,
    },
    /// Placement configuration
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Show current configuration
    Show,
    /// Set the default strategy (first-fit, max-revenue)
    SetStrategy { strategy: String },
    /// Set slot counting (literal, bracketed)
    SetCounting { counting: String },
    /// Set the eligible-campaign limit for max-revenue
    SetMaxCandidates { max: usize },
}

fn fail(err: impl Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "spot_placer=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(PlacerSettings::default_path);
    let mut settings = PlacerSettings::load(&config_path);

    match cli.command {
        Commands::Place {
            episode,
            catalog,
            strategy,
            counting,
            max_candidates,
            json,
        } => {
            if let Some(s) = strategy {
                settings.strategy = Strategy::from_str_loose(&s).unwrap_or_else(|e| fail(e));
            }
            if let Some(c) = counting {
                settings.slot_counting =
                    SlotCounting::from_str_loose(&c).unwrap_or_else(|e| fail(e));
            }
            if let Some(max) = max_candidates {
                settings.max_candidates = max;
            }

            let episode = load_episode(&episode).unwrap_or_else(|e| fail(e));
            let campaigns = load_catalog(&catalog).unwrap_or_else(|e| fail(e));

            let result = CampaignPlacer::new(settings)
                .place(&episode, &campaigns)
                .unwrap_or_else(|e| fail(e));

            if json {
                match serde_json::to_string_pretty(&result) {
                    Ok(out) => println!("{}", out),
                    Err(e) => fail(e),
                }
            } else {
                println!("{}", result.audio);
                eprintln!(
                    "Placed {} of {} eligible campaign(s) [{}], revenue {} | free slots: {}",
                    result.placed.len(),
                    result.eligible_count,
                    result.placed.join(", "),
                    result.revenue,
                    result.slots_remaining.display()
                );
            }
        }
        Commands::Slots { episode, counting } => {
            if let Some(c) = counting {
                settings.slot_counting =
                    SlotCounting::from_str_loose(&c).unwrap_or_else(|e| fail(e));
            }
            let episode = load_episode(&episode).unwrap_or_else(|e| fail(e));
            let counts = episode.slot_counts(settings.slot_counting);
            println!(
                "Episode '{}' ({} counting):",
                episode.id, settings.slot_counting
            );
            for slot in SlotType::ALL {
                println!("  {:<5} {}", slot.token(), counts[slot]);
            }
        }
        Commands::Eligible { episode, catalog } => {
            let episode = load_episode(&episode).unwrap_or_else(|e| fail(e));
            let campaigns = load_catalog(&catalog).unwrap_or_else(|e| fail(e));
            let eligible = filter_eligible(&episode.id, &campaigns);
            if eligible.is_empty() {
                println!("No campaigns target episode '{}'.", episode.id);
                return;
            }
            println!(
                "{} of {} campaign(s) target episode '{}':",
                eligible.len(),
                campaigns.len(),
                episode.id
            );
            for (i, campaign) in campaigns.iter().enumerate() {
                if !campaign.targets_episode(&episode.id) {
                    continue;
                }
                println!(
                    "  {:<20} {}  revenue {}",
                    campaign.label(i),
                    campaign.profile().display(),
                    campaign.revenue()
                );
            }
        }
        Commands::Config { action } => match action {
            ConfigCmd::Show => {
                println!("Config file: {}", config_path.display());
                println!("Strategy: {}", settings.strategy);
                println!("Slot counting: {}", settings.slot_counting);
                println!("Max candidates: {}", settings.max_candidates);
            }
            ConfigCmd::SetStrategy { strategy } => {
                settings.strategy = Strategy::from_str_loose(&strategy).unwrap_or_else(|e| fail(e));
                settings.save(&config_path).unwrap_or_else(|e| fail(e));
                println!("Strategy set to {}.", settings.strategy);
            }
            ConfigCmd::SetCounting { counting } => {
                settings.slot_counting =
                    SlotCounting::from_str_loose(&counting).unwrap_or_else(|e| fail(e));
                settings.save(&config_path).unwrap_or_else(|e| fail(e));
                println!("Slot counting set to {}.", settings.slot_counting);
            }
            ConfigCmd::SetMaxCandidates { max } => {
                settings.max_candidates = max;
                settings.save(&config_path).unwrap_or_else(|e| fail(e));
                println!("Max candidates set to {}.", max);
            }
        },
    }
}
