use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use stackit_core::Attr;
use stackit_core::provider::{DataSource, Resource, ResourceType, TypeKind};
use stackit_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use stackit_provider::config::TOKEN_ENV;
use stackit_provider::observability::scrapeconfig::Model;
use stackit_provider::resources::{find_type, resource_types};
use stackit_provider::secretsmanager::DataSourceModel;
use stackit_provider::{ProviderConfig, StackitProvider};

#[derive(Parser)]
#[command(name = "stackit-tf")]
#[command(about = "Drive STACKIT provider resources and data sources", long_about = None)]
struct Cli {
    /// Path to a JSON provider config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// STACKIT region
    #[arg(long, global = true)]
    region: Option<String>,

    /// Service account token
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage observability scrape configs
    ScrapeConfig {
        #[command(subcommand)]
        command: ScrapeConfigCommands,
    },
    /// Read secrets manager users
    SecretsmanagerUser {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Show the schema of a resource or data source type
    Schema {
        /// Type name (e.g., stackit_observability_scrapeconfig); lists all types if omitted
        type_name: Option<String>,
    },
}

#[derive(Subcommand)]
enum ScrapeConfigCommands {
    /// Refresh a scrape config from its JSON state
    Read {
        /// Path to the JSON model
        file: PathBuf,
    },
    /// Create a scrape config from a JSON plan
    Create { file: PathBuf },
    /// Update a scrape config from a JSON plan
    Update { file: PathBuf },
    /// Delete the scrape config described by a JSON state
    Delete { file: PathBuf },
    /// Import a scrape config by identifier and read it
    Import {
        /// Identifier of the form project_id,instance_id,name
        id: String,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Read a secrets manager user
    Read {
        #[arg(long)]
        project_id: String,
        #[arg(long)]
        instance_id: String,
        #[arg(long)]
        user_id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Schema { ref type_name } => run_schema(type_name.as_deref()),
        Commands::ScrapeConfig { ref command } => match build_provider(&cli) {
            Ok(provider) => run_scrape_config(&provider, command).await,
            Err(e) => Err(e),
        },
        Commands::SecretsmanagerUser { ref command } => match build_provider(&cli) {
            Ok(provider) => run_secretsmanager_user(&provider, command).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge the config file with command line flags
fn load_config(cli: &Cli) -> Result<ProviderConfig, String> {
    let mut config = match &cli.config {
        Some(path) => ProviderConfig::from_file(path).map_err(|e| e.to_string())?,
        None => ProviderConfig::default(),
    };
    if let Some(region) = &cli.region {
        config.region = region.clone();
    }
    if cli.token.is_some() {
        config.service_account_token = cli.token.clone();
    }
    Ok(config)
}

fn build_provider(cli: &Cli) -> Result<StackitProvider, String> {
    let config = load_config(cli)?;
    if config.service_account_token.is_none() {
        eprintln!(
            "{}",
            format!("No service account token set (use --token or {})", TOKEN_ENV).yellow()
        );
    }
    StackitProvider::new(&config).map_err(|e| e.to_string())
}

async fn run_scrape_config(
    provider: &StackitProvider,
    command: &ScrapeConfigCommands,
) -> Result<(), String> {
    let resource = provider.scrape_config();
    match command {
        ScrapeConfigCommands::Read { file } => {
            let state: Model = read_model(file)?;
            match resource.read(state).await.map_err(|e| e.to_string())? {
                Some(state) => print_model(&state),
                None => {
                    println!("{}", "Scrape config no longer exists.".yellow());
                    Ok(())
                }
            }
        }
        ScrapeConfigCommands::Create { file } => {
            let plan: Model = read_model(file)?;
            let state = resource.create(plan).await.map_err(|e| e.to_string())?;
            print_model(&state)
        }
        ScrapeConfigCommands::Update { file } => {
            let plan: Model = read_model(file)?;
            let state = resource.update(plan).await.map_err(|e| e.to_string())?;
            print_model(&state)
        }
        ScrapeConfigCommands::Delete { file } => {
            let state: Model = read_model(file)?;
            let name = state.name.value_str().to_string();
            resource.delete(state).await.map_err(|e| e.to_string())?;
            println!("  {} deleted scrape config {}", "✓".green(), name);
            Ok(())
        }
        ScrapeConfigCommands::Import { id } => {
            let state = resource.import_state(id).map_err(|e| e.to_string())?;
            match resource.read(state).await.map_err(|e| e.to_string())? {
                Some(state) => print_model(&state),
                None => Err(format!("Scrape config {} not found", id)),
            }
        }
    }
}

async fn run_secretsmanager_user(
    provider: &StackitProvider,
    command: &UserCommands,
) -> Result<(), String> {
    match command {
        UserCommands::Read {
            project_id,
            instance_id,
            user_id,
        } => {
            let config = DataSourceModel {
                project_id: Attr::value(project_id.as_str()),
                instance_id: Attr::value(instance_id.as_str()),
                user_id: Attr::value(user_id.as_str()),
                ..Default::default()
            };
            let state = provider
                .secretsmanager_user()
                .read(config)
                .await
                .map_err(|e| e.to_string())?;
            print_model(&state)
        }
    }
}

fn run_schema(type_name: Option<&str>) -> Result<(), String> {
    match type_name {
        None => {
            for t in resource_types() {
                println!("{} {}", kind_label(t.kind()), t.name());
            }
            Ok(())
        }
        Some(name) => {
            let t = find_type(name).ok_or_else(|| format!("Unknown type: {}", name))?;
            print!("{}", format_schema(&t.schema()));
            Ok(())
        }
    }
}

fn kind_label(kind: TypeKind) -> String {
    match kind {
        TypeKind::Resource => "resource   ".cyan().to_string(),
        TypeKind::DataSource => "data source".magenta().to_string(),
    }
}

fn format_schema(schema: &ResourceSchema) -> String {
    let mut out = format!("{}\n", schema.resource_type.bold());
    if let Some(desc) = &schema.description {
        out.push_str(&format!("  {}\n", desc));
    }
    for attr in &schema.attributes {
        format_attribute(&mut out, attr, 1);
    }
    out
}

fn format_attribute(out: &mut String, attr: &AttributeSchema, depth: usize) {
    let indent = "  ".repeat(depth);
    let mut flags = Vec::new();
    if attr.required {
        flags.push("required");
    } else {
        flags.push("optional");
    }
    if attr.computed {
        flags.push("computed");
    }
    if attr.sensitive {
        flags.push("sensitive");
    }
    out.push_str(&format!(
        "{}{}: {} ({})\n",
        indent,
        attr.name,
        attr.attr_type,
        flags.join(", ")
    ));
    if let AttributeType::Object(fields) = &attr.attr_type {
        for field in fields {
            format_attribute(out, field, depth + 1);
        }
    }
}

fn read_model<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&content).map_err(|e| format!("Invalid model {}: {}", path.display(), e))
}

fn print_model<T: Serialize>(model: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(model).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}
