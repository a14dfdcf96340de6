//! rpcgen CLI.
//!
//! Generates a typed TypeScript client from a JSON-RPC method catalog, and
//! can call a node directly through the Rust transport.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rpcgen_client::{ClientArgs, RpcClient};
use rpcgen_compiler::config::DEFAULT_CLASS_NAME;
use rpcgen_compiler::{GenerateResult, Generator, GeneratorConfig};

mod ui;

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "RPCGEN_LOG";

#[derive(Parser)]
#[command(name = "rpcgen")]
#[command(about = "rpcgen - typed JSON-RPC client generator")]
struct Cli {
    /// Log per-entry progress (overridden by RPCGEN_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the TypeScript client
    Generate(GenerateArgs),

    /// Run the pipeline without writing, report skipped and duplicate entries
    Check(GenerateArgs),

    /// Regenerate whenever the catalog or description store changes
    Watch(GenerateArgs),

    /// Call an RPC method and print its result
    Call {
        /// RPC method name
        method: String,

        /// Positional params; each is parsed as JSON, falling back to a string
        params: Vec<String>,

        /// Node host
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Node RPC port
        #[arg(short, long, default_value_t = 18332)]
        port: u16,

        /// RPC username
        #[arg(short, long)]
        user: Option<String>,

        /// RPC password
        #[arg(long)]
        pass: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
}

/// Inputs and outputs shared by generate/check/watch.
#[derive(Args, Clone)]
struct GenerateArgs {
    /// Method catalog
    #[arg(short, long, default_value = "methods.json")]
    catalog: PathBuf,

    /// Cached description store
    #[arg(short, long, default_value = "descriptions.json")]
    descriptions: PathBuf,

    /// Generate without descriptions
    #[arg(long)]
    no_descriptions: bool,

    /// Generated client file
    #[arg(short, long, default_value = "mod.ts")]
    output: PathBuf,

    /// Client skeleton to augment (defaults to the embedded one)
    #[arg(short, long)]
    skeleton: Option<PathBuf>,

    /// Class in the skeleton that receives the methods
    #[arg(long = "class", default_value = DEFAULT_CLASS_NAME)]
    class_name: String,

    /// Base URL for per-method reference links
    #[arg(long)]
    doc_base: Option<String>,
}

impl GenerateArgs {
    fn to_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            catalog_path: self.catalog.clone(),
            descriptions_path: (!self.no_descriptions).then(|| self.descriptions.clone()),
            out_path: self.output.clone(),
            skeleton_path: self.skeleton.clone(),
            class_name: self.class_name.clone(),
            doc_base: self.doc_base.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => {
            let spinner = ui::spinner("Generating client...");
            let start = Instant::now();
            let result = Generator::new(args.to_config()).generate();
            spinner.finish_and_clear();

            let result = result?;
            report(&result);
            ui::timing(
                &format!(
                    "Generated {} into {}",
                    ui::plural(result.methods, "method"),
                    args.output.display()
                ),
                start.elapsed().as_millis(),
            );
        }

        Commands::Check(args) => {
            let spinner = ui::spinner("Checking catalog...");
            let result = Generator::new(args.to_config()).check();
            spinner.finish_and_clear();

            let result = match result {
                Ok(result) => result,
                Err(e) => {
                    ui::nope_header();
                    return Err(e.into());
                }
            };

            if result.skipped.is_empty() && result.duplicates.is_empty() {
                ui::looking_good();
                println!();
                println!(
                    "    {} {} {}",
                    ui::plural(result.categories, "category"),
                    ui::symbols::DOT,
                    ui::plural(result.methods, "method")
                );
            } else {
                ui::nope_header();
                report(&result);
                return Err(miette::miette!(
                    "{} skipped, {} duplicated",
                    ui::plural(result.skipped.len(), "entry"),
                    ui::plural(result.duplicates.len(), "name")
                ));
            }
        }

        Commands::Watch(args) => {
            run_watch_mode(&args).await?;
        }

        Commands::Call {
            method,
            params,
            host,
            port,
            user,
            pass,
            timeout,
        } => {
            let client = RpcClient::with_timeout(
                ClientArgs { host, port, user, pass },
                Duration::from_secs(timeout),
            )
            .map_err(|e| miette::miette!("{}", e))?;

            let params: Vec<Value> = params.iter().map(|raw| parse_param(raw)).collect();
            let result = client
                .request(&method, params)
                .await
                .map_err(|e| miette::miette!("{}", e))?;

            println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,rpcgen_compiler=debug,rpcgen_client=debug"
    } else {
        "warn,rpcgen_compiler=info,rpcgen_client=info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    if tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

/// Prints per-entry diagnostics for a run.
fn report(result: &GenerateResult) {
    for skipped in &result.skipped {
        ui::error(&format!(
            "skipped {}.{}: {}",
            skipped.category, skipped.name, skipped.error
        ));
    }
    for name in &result.duplicates {
        ui::warning(&format!("'{}' is defined more than once, the last definition wins", name));
    }
    if !result.skipped.is_empty() || !result.duplicates.is_empty() {
        println!();
    }
}

/// Parses a CLI param as JSON; bare words become strings.
fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Watch the catalog and description store and regenerate on change.
async fn run_watch_mode(args: &GenerateArgs) -> miette::Result<()> {
    let config = args.to_config();

    let mut targets = vec![config.catalog_path.clone()];
    if let Some(path) = &config.descriptions_path {
        targets.push(path.clone());
    }
    if let Some(path) = &config.skeleton_path {
        targets.push(path.clone());
    }

    // Watch the parent directories: editors often replace files on save.
    let targets: Vec<PathBuf> = targets.iter().map(|t| absolute(t)).collect();
    let mut dirs: Vec<PathBuf> = targets
        .iter()
        .filter_map(|t| t.parent().map(|p| p.to_path_buf()))
        .collect();
    dirs.sort();
    dirs.dedup();

    regenerate(&config);

    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);
    let watched = targets.clone();
    let mut debouncer = new_debouncer(
        Duration::from_millis(300),
        move |result: DebounceEventResult| {
            if let Ok(events) = result {
                if let Some(event) = events.iter().find(|e| watched.contains(&absolute(&e.path))) {
                    debug!(path = %event.path.display(), "Input changed.");
                    let _ = tx.try_send(());
                }
            }
        },
    )
    .into_diagnostic()?;

    for dir in &dirs {
        debouncer
            .watcher()
            .watch(dir, RecursiveMode::NonRecursive)
            .into_diagnostic()?;
    }

    for target in &targets {
        ui::dim(&format!("watching {}", target.display()));
    }
    ui::info("Ready! Waiting for changes...");

    loop {
        tokio::select! {
            Some(()) = rx.recv() => {
                println!();
                regenerate(&config);
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                ui::info("Stopped watching.");
                break;
            }
        }
    }

    Ok(())
}

fn regenerate(config: &GeneratorConfig) {
    let spinner = ui::spinner("Regenerating...");
    let start = Instant::now();
    let result = Generator::new(config.clone()).generate();
    spinner.finish_and_clear();

    match result {
        Ok(result) => {
            report(&result);
            ui::success(&format!(
                "Generated {} in {}ms",
                ui::plural(result.methods, "method"),
                start.elapsed().as_millis()
            ));
        }
        Err(e) => ui::error(&format!("{}", e)),
    }
}

fn absolute(path: &std::path::Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                std::path::Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("1"), Value::from(1));
        assert_eq!(parse_param("true"), Value::Bool(true));
        assert_eq!(parse_param("[\"a\"]"), serde_json::json!(["a"]));
        assert_eq!(parse_param("000000abc"), Value::String("000000abc".to_string()));
        assert_eq!(parse_param("\"quoted\""), Value::String("quoted".to_string()));
    }

    #[test]
    fn test_generate_args_map_to_config() {
        let cli = Cli::parse_from([
            "rpcgen",
            "generate",
            "--catalog",
            "rpc/methods.json",
            "--no-descriptions",
            "--doc-base",
            "https://developer.bitcoin.org/reference/rpc/",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };

        let config = args.to_config();
        assert_eq!(config.catalog_path, PathBuf::from("rpc/methods.json"));
        assert_eq!(config.descriptions_path, None);
        assert_eq!(config.out_path, PathBuf::from("mod.ts"));
        assert_eq!(config.class_name, "BitcoinRPC");
        assert_eq!(config.doc_base.as_deref(), Some("https://developer.bitcoin.org/reference/rpc/"));
    }

    #[test]
    fn test_call_args() {
        let cli = Cli::parse_from(["rpcgen", "call", "getblockhash", "0", "--user", "u", "--pass", "p"]);
        let Commands::Call { method, params, port, user, .. } = cli.command else {
            panic!("expected call");
        };
        assert_eq!(method, "getblockhash");
        assert_eq!(params, vec!["0".to_string()]);
        assert_eq!(port, 18332);
        assert_eq!(user.as_deref(), Some("u"));
    }
}
