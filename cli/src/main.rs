//! Prospec CLI
//!
//! Command-line client for the prospection tracking platform.
//!
//! # Usage
//!
//! ```bash
//! prospec login --email sara@exemple.ma --password secret
//! prospec form
//! prospec submit --type PLANNING_AGENT -a 1=Benali -a 4=0612345678
//! prospec list
//! prospec questions dashboard
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "prospec")]
#[command(version = "0.1.0")]
#[command(about = "Client de prospection commerciale", long_about = None)]
struct Cli {
    /// API endpoint URL
    #[arg(long, env = "PROSPEC_API_URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "text")]
    format: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a new account
    Register {
        #[arg(long)]
        nom: String,
        #[arg(long)]
        prenom: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// AGENT, CHEF_BRANCHE, SUPERVISEUR, CHEF_ANIMATION_REGIONAL or SIEGE
        #[arg(long, default_value = "AGENT")]
        role: String,
        #[arg(long)]
        region_id: Option<u64>,
        #[arg(long)]
        supervision_id: Option<u64>,
        #[arg(long)]
        branche_id: Option<u64>,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the current identity and the views it may reach
    Whoami,
    /// Browse the organizational hierarchy
    Structure {
        #[command(subcommand)]
        action: StructureCommands,
    },
    /// Display the intake form (agent)
    Form,
    /// Submit a new prospect record (agent)
    Submit {
        /// Prospection category value
        #[arg(long = "type")]
        type_prospection: String,
        /// Answer as `<question_id>=<value>`; repeatable
        #[arg(long = "answer", short)]
        answers: Vec<String>,
        #[arg(long)]
        comment: Option<String>,
        /// Skip the duplicate check after a warning
        #[arg(long)]
        force: bool,
    },
    /// List my prospections (agent)
    List,
    /// Show one prospection (agent)
    Show { id: u64 },
    /// My prospection statistics (agent)
    Stats,
    /// Manage the question catalog (siege)
    Questions {
        #[command(subcommand)]
        action: QuestionCommands,
    },
    /// Configure the CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum StructureCommands {
    /// List regions
    Regions,
    /// List supervisions of a region
    Supervisions { region_id: u64 },
    /// List branches of a supervision
    Branches { supervision_id: u64 },
}

#[derive(Subcommand)]
enum QuestionCommands {
    /// Questions, types, preview and stats in one view
    Dashboard,
    /// List all questions
    List,
    /// Preview the form as agents see it
    Preview,
    /// Question statistics
    Stats,
    /// Create a question
    Create {
        #[arg(long)]
        question: String,
        #[arg(long, default_value = "")]
        description: String,
        /// TEXT, NUMBER, EMAIL, PHONE, CHOICE, MULTIPLE_CHOICE, DATE, TEXTAREA
        #[arg(long = "type", default_value = "TEXT")]
        question_type: String,
        #[arg(long)]
        obligatoire: bool,
        /// Option value; repeatable, required for choice types
        #[arg(long = "option")]
        options: Vec<String>,
    },
    /// Persist a new display order
    Reorder {
        /// Question ids in the desired order
        ids: Vec<u64>,
    },
    /// Activate a question
    Activate { id: u64 },
    /// Deactivate a question
    Deactivate { id: u64 },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the stored configuration
    Show,
    /// Set the API endpoint URL
    SetUrl { url: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = config::Config::load().unwrap_or_default();
    let api_url = cli
        .api_url
        .clone()
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| "http://localhost:8090/api".to_string());

    let ctx = commands::Context::new(&api_url, cli.format);

    let result = match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password).await,
        Commands::Register {
            nom,
            prenom,
            email,
            password,
            role,
            region_id,
            supervision_id,
            branche_id,
        } => {
            commands::auth::register(
                &ctx,
                commands::auth::RegisterArgs {
                    nom,
                    prenom,
                    email,
                    password,
                    role,
                    region_id,
                    supervision_id,
                    branche_id,
                },
            )
            .await
        }
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Structure { action } => match action {
            StructureCommands::Regions => commands::auth::regions(&ctx).await,
            StructureCommands::Supervisions { region_id } => {
                commands::auth::supervisions(&ctx, region_id).await
            }
            StructureCommands::Branches { supervision_id } => {
                commands::auth::branches(&ctx, supervision_id).await
            }
        },
        Commands::Form => commands::prospections::form(&ctx).await,
        Commands::Submit { type_prospection, answers, comment, force } => {
            commands::prospections::submit(
                &ctx,
                &type_prospection,
                &answers,
                comment.as_deref(),
                force,
            )
            .await
        }
        Commands::List => commands::prospections::list(&ctx).await,
        Commands::Show { id } => commands::prospections::show(&ctx, id).await,
        Commands::Stats => commands::prospections::stats(&ctx).await,
        Commands::Questions { action } => match action {
            QuestionCommands::Dashboard => commands::questions::dashboard(&ctx).await,
            QuestionCommands::List => commands::questions::list(&ctx).await,
            QuestionCommands::Preview => commands::questions::preview(&ctx).await,
            QuestionCommands::Stats => commands::questions::stats(&ctx).await,
            QuestionCommands::Create { question, description, question_type, obligatoire, options } => {
                commands::questions::create(
                    &ctx,
                    &question,
                    &description,
                    &question_type,
                    obligatoire,
                    options,
                )
                .await
            }
            QuestionCommands::Reorder { ids } => commands::questions::reorder(&ctx, &ids).await,
            QuestionCommands::Activate { id } => {
                commands::questions::set_active(&ctx, id, true).await
            }
            QuestionCommands::Deactivate { id } => {
                commands::questions::set_active(&ctx, id, false).await
            }
        },
        Commands::Config { action } => match action {
            ConfigCommands::Show => commands::config_show(&config),
            ConfigCommands::SetUrl { url } => commands::config_set_url(config, url),
        },
    };

    if let Err(e) = result {
        eprintln!("Erreur: {e}");
        std::process::exit(1);
    }
}
