use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use confdiff_cli::config::{
	CONFIG_FILE_NAME, DiffConfig, discover_config, generate_init_template, load_config,
	user_config_path,
};
use confdiff_cli::Document;

#[derive(Parser)]
#[command(name = "confdiff")]
#[command(
	author,
	version,
	about = "Diff indented network device configurations into add/remove/change actions"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Use this config file instead of discovering .confdiff.toml
	#[arg(long = "config", global = true, value_name = "PATH")]
	config_path: Option<PathBuf>,

	/// Increase log verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Create a template .confdiff.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .confdiff.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Show the changes that turn RUNNING into CANDIDATE
	Diff {
		/// Running configuration file ("-" for stdin)
		running: PathBuf,

		/// Candidate configuration file ("-" for stdin)
		candidate: PathBuf,

		/// Exit with status 1 when there are differences
		#[arg(long)]
		exit_code: bool,
	},
	/// Print the parsed command tree of a configuration file
	Parse {
		/// Configuration file ("-" for stdin)
		file: PathBuf,

		#[arg(long, value_enum, default_value_t = OutputFormat::Json)]
		format: OutputFormat,
	},
	/// List top-level commands that correspond to PROBE
	Find {
		/// Configuration file ("-" for stdin)
		file: PathBuf,

		/// Command to look up
		probe: String,

		/// Require the whole probe as a prefix
		#[arg(long, conflicts_with = "loose")]
		exact: bool,

		/// Drop the probe's last word before matching
		#[arg(long)]
		loose: bool,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the effective configuration and where it came from
	Show,
	/// Check the discovered config file for errors without diffing anything
	Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
	Json,
	Toml,
	Text,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	setup_logging(cli.verbose);

	if cli.init {
		return handle_init(cli.force);
	}

	let Some(command) = cli.command else {
		// Unreachable in practice due to arg_required_else_help
		return Ok(ExitCode::SUCCESS);
	};

	let explicit = cli.config_path.as_deref();
	match command {
		Commands::Diff {
			running,
			candidate,
			exit_code,
		} => handle_diff(&running, &candidate, exit_code, explicit),
		Commands::Parse { file, format } => handle_parse(&file, format, explicit),
		Commands::Find {
			file,
			probe,
			exact,
			loose,
		} => handle_find(&file, &probe, exact, loose, explicit),
		Commands::Config { action } => match action {
			ConfigAction::Show => handle_config_show(explicit),
			ConfigAction::Validate => handle_config_validate(explicit),
		},
	}
}

fn setup_logging(verbosity: u8) {
	let level = match verbosity {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	};

	// RUST_LOG, when set, takes precedence over -v
	let filter = EnvFilter::builder()
		.with_default_directive(level.into())
		.from_env_lossy();

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn effective_config(explicit: Option<&Path>) -> Result<DiffConfig> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	load_config(&cwd, explicit).context("Failed to load configuration")
}

fn read_input(path: &Path) -> Result<String> {
	if path == Path::new("-") {
		let mut buffer = String::new();
		std::io::stdin()
			.read_to_string(&mut buffer)
			.context("Failed to read stdin")?;
		return Ok(buffer);
	}

	std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_document(path: &Path, config: DiffConfig) -> Result<Document> {
	let text = read_input(path)?;
	Document::from_text(&text, config).with_context(|| format!("Failed to parse {}", path.display()))
}

fn handle_diff(
	running: &Path,
	candidate: &Path,
	exit_code: bool,
	explicit: Option<&Path>,
) -> Result<ExitCode> {
	if running == Path::new("-") && candidate == Path::new("-") {
		anyhow::bail!("Only one of RUNNING and CANDIDATE can be read from stdin");
	}

	let config = effective_config(explicit)?;
	let document = load_document(running, config)?;
	let candidate_text = read_input(candidate)?;

	let diff = document
		.diff(candidate_text.as_str())
		.with_context(|| format!("Failed to diff against {}", candidate.display()))?;

	if diff.is_empty() {
		return Ok(ExitCode::SUCCESS);
	}

	println!("{diff}");
	if exit_code {
		Ok(ExitCode::from(1))
	} else {
		Ok(ExitCode::SUCCESS)
	}
}

fn handle_parse(file: &Path, format: OutputFormat, explicit: Option<&Path>) -> Result<ExitCode> {
	let config = effective_config(explicit)?;
	let document = load_document(file, config)?;

	let output = match format {
		OutputFormat::Json => serde_json::to_string_pretty(&document.to_nested_mapping())
			.context("Failed to serialize JSON")?,
		OutputFormat::Toml => {
			toml::to_string(&document.to_nested_mapping()).context("Failed to serialize TOML")?
		}
		OutputFormat::Text => document.tree().to_string(),
	};

	println!("{}", output.trim_end());
	Ok(ExitCode::SUCCESS)
}

fn handle_find(
	file: &Path,
	probe: &str,
	exact: bool,
	loose: bool,
	explicit: Option<&Path>,
) -> Result<ExitCode> {
	let config = effective_config(explicit)?;
	let document = load_document(file, config)?;

	// Without --exact or --loose the classifier decides
	let found = if exact || loose {
		document.find(probe, exact)
	} else {
		document.find_similar(probe)
	};
	let found = found.with_context(|| format!("Failed to look up {probe:?}"))?;

	for command in &found {
		println!("{command}");
	}

	if found.is_empty() {
		Ok(ExitCode::from(1))
	} else {
		Ok(ExitCode::SUCCESS)
	}
}

fn handle_config_show(explicit: Option<&Path>) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let (config, source) = match explicit {
		Some(path) => (
			load_config(&cwd, Some(path)).context("Failed to load configuration")?,
			path.display().to_string(),
		),
		None => match discover_config(&cwd).context("Failed to discover config file")? {
			Some(loaded) => (loaded.config, loaded.path.display().to_string()),
			None => (DiffConfig::default(), "built-in defaults".to_string()),
		},
	};

	println!("# Source: {source}");
	print!(
		"{}",
		toml::to_string(&config).context("Failed to serialize configuration")?
	);

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!();
		println!("# User config path: {}", user_path.display());
		if user_path.exists() {
			println!("#   (exists)");
		} else {
			println!("#   (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(explicit: Option<&Path>) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let result = match explicit {
		Some(path) => load_config(&cwd, Some(path)).map(|_| Some(path.to_path_buf())),
		None => discover_config(&cwd).map(|loaded| loaded.map(|l| l.path)),
	};

	match result {
		Ok(Some(path)) => {
			println!("Configuration file is valid: {}", path.display());
			Ok(ExitCode::SUCCESS)
		}
		Ok(None) => {
			println!("No configuration file found.");
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {e}");
			Ok(ExitCode::FAILURE)
		}
	}
}
