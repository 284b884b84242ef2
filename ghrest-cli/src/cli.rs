//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the ghrest tool.

use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use ghrest::consts::REDACTED;
use ghrest::{Body, ClientConfig, ConfigDirs, DefaultTable, HttpTransport, IssuesApi, RequestBuilder, Scope, UsersApi};
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Top-level CLI command for the ghrest tool
#[derive(Parser, Debug)]
#[command(name = "ghrest")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Send requests to the GitHub REST API with token and default headers applied")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// API token; overrides $GHREST_TOKEN, $GITHUB_TOKEN, the config file and .netrc
  #[arg(long, global = true)]
  pub token: Option<String>,

  /// API base URL; overrides $GHREST_API_URL and the config file
  #[arg(long, global = true)]
  pub base_url: Option<String>,

  /// Print response bodies as received instead of pretty-printing JSON
  #[arg(long, global = true)]
  pub raw: bool,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the ghrest tool
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Send a GET request
  Get(GetArgs),

  /// Send a POST request
  Post(WriteArgs),

  /// Send a PUT request
  Put(WriteArgs),

  /// Send a DELETE request
  Delete(DeleteArgs),

  /// Show the default headers and parameters applied to each scope
  Defaults(DefaultsArgs),

  /// Show the authenticated user
  Whoami,

  /// Inspect or create the client config file
  Config(ConfigArgs),
}

/// Arguments shared by every request command
#[derive(Args, Debug)]
pub struct RequestArgs {
  /// Path relative to the API base URL, e.g. /user
  pub path: String,

  /// Extra header as `Name: value` (repeatable)
  #[arg(short = 'H', long = "header", value_parser = parse_header)]
  pub headers: Vec<(String, String)>,

  /// Log the full request and response
  #[arg(long)]
  pub debug: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
  #[command(flatten)]
  pub request: RequestArgs,

  /// Extra query parameter as `key=value` (repeatable)
  #[arg(short = 'q', long = "query", value_parser = parse_query)]
  pub query: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct WriteArgs {
  #[command(flatten)]
  pub request: RequestArgs,

  /// Request body; `@path` reads it from a file. Defaults to `{}`
  #[arg(short = 'd', long = "data")]
  pub data: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
  #[command(flatten)]
  pub request: RequestArgs,
}

#[derive(Args, Debug)]
pub struct DefaultsArgs {
  /// Scope to show (all, get, post, put, delete); every scope when omitted
  pub scope: Option<Scope>,

  /// Show the defaults the issues wrapper adds on top of the builder's
  #[arg(long)]
  pub issues: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
  #[command(subcommand)]
  pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
  /// Print the config file, with any stored token masked
  Show,

  /// Write a config file from the defaults plus --base-url and --token
  Init {
    /// Replace an existing config file
    #[arg(long)]
    force: bool,
  },
}

/// Handles the CLI command
pub fn handle_cli(cli: Cli) -> Result<()> {
  let dirs = ConfigDirs::new()?;
  let mut stdout = io::stdout().lock();

  if let Commands::Config(args) = &cli.command {
    return handle_config(&mut stdout, &dirs, &args.command, &cli);
  }

  let mut config = dirs.load_config()?.with_env_overrides(|var| std::env::var(var).ok());
  if let Some(base_url) = &cli.base_url {
    config.base_url = base_url.clone();
  }
  debug!("Using API base URL {}", config.base_url);

  if let Commands::Defaults(args) = &cli.command {
    let transport = Arc::new(HttpTransport::from_config(&config)?);
    if args.issues {
      let issues = IssuesApi::new(transport, REDACTED);
      return write_defaults(&mut stdout, issues.builder(), args.scope);
    }
    let builder = RequestBuilder::new(transport, REDACTED);
    return write_defaults(&mut stdout, &builder, args.scope);
  }

  let token = config.resolve_token_from_env(cli.token.as_deref())?;
  let transport = Arc::new(HttpTransport::from_config(&config)?);
  let rt = Runtime::new().context("Failed to create async runtime")?;

  match cli.command {
    Commands::Whoami => {
      let users = UsersApi::new(transport, &token);
      let user = rt.block_on(users.get_current_user())?;
      writeln!(stdout, "Username: {}", user.login)?;
      if let Some(name) = &user.name {
        writeln!(stdout, "Name: {name}")?;
      }
      writeln!(stdout, "User ID: {}", user.id)?;
      Ok(())
    }
    command => {
      let builder = RequestBuilder::new(transport, token);
      let body = rt.block_on(send(&builder, command, &config))?;
      write_body(&mut stdout, &body, cli.raw)
    }
  }
}

/// Issue the request described by `command` and return the response body
async fn send(builder: &RequestBuilder, command: Commands, config: &ClientConfig) -> Result<String> {
  let response = match command {
    Commands::Get(args) => {
      let query = args.query.into_iter().collect::<DefaultTable>();
      let headers = args.request.headers.into_iter().collect::<DefaultTable>();
      builder.get(&args.request.path, &query, &headers, args.request.debug).await?
    }
    Commands::Post(args) => {
      let body = read_body(args.data)?;
      let headers = args.request.headers.into_iter().collect::<DefaultTable>();
      builder.post(&args.request.path, body, &headers, args.request.debug).await?
    }
    Commands::Put(args) => {
      let body = read_body(args.data)?;
      let headers = args.request.headers.into_iter().collect::<DefaultTable>();
      builder.put(&args.request.path, body, &headers, args.request.debug).await?
    }
    Commands::Delete(args) => {
      let headers = args.request.headers.into_iter().collect::<DefaultTable>();
      builder.delete(&args.request.path, &headers, args.request.debug).await?
    }
    Commands::Defaults(_) | Commands::Whoami | Commands::Config(_) => {
      return Err(anyhow::anyhow!("Command does not issue a raw request"));
    }
  };

  info!("{} responded with {}", config.base_url, response.status());
  response.text().await.context("Failed to read response body")
}

fn handle_config(out: &mut impl Write, dirs: &ConfigDirs, command: &ConfigCommands, cli: &Cli) -> Result<()> {
  let path = dirs.config_path();

  match command {
    ConfigCommands::Show => {
      let mut config = dirs.load_config()?;
      if config.token.is_some() {
        config.token = Some(REDACTED.to_string());
      }
      writeln!(out, "# {}", path.display())?;
      write!(out, "{}", toml::to_string_pretty(&config).context("Failed to serialize client config")?)?;
    }
    ConfigCommands::Init { force } => {
      if path.exists() && !force {
        return Err(anyhow::anyhow!(
          "Config file already exists at {}. Pass --force to replace it.",
          path.display()
        ));
      }

      let defaults = ClientConfig::default();
      let config = ClientConfig {
        base_url: cli.base_url.clone().unwrap_or(defaults.base_url),
        token: cli.token.clone(),
        ..ClientConfig::default()
      };
      dirs.save_config(&config)?;
      info!("Saved client config to {}", path.display());
      writeln!(out, "Wrote {}", path.display())?;
    }
  }
  Ok(())
}

/// Resolve `--data`, reading `@path` arguments from disk
fn read_body(data: Option<String>) -> Result<Body> {
  match data {
    Some(data) => match data.strip_prefix('@') {
      Some(path) => {
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read request body from {path}"))?;
        Ok(Body::Text(content))
      }
      None => Ok(Body::Text(data)),
    },
    None => Ok(Body::Empty),
  }
}

fn write_body(out: &mut impl Write, body: &str, raw: bool) -> Result<()> {
  if body.is_empty() {
    return Ok(());
  }

  match serde_json::from_str::<serde_json::Value>(body) {
    Ok(value) if !raw => writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?,
    _ => writeln!(out, "{body}")?,
  }
  Ok(())
}

fn write_defaults<T: ghrest::Transport>(
  out: &mut impl Write,
  builder: &RequestBuilder<T>,
  scope: Option<Scope>,
) -> Result<()> {
  let scopes = match scope {
    Some(scope) => vec![scope],
    None => Scope::ALL.to_vec(),
  };

  for scope in scopes {
    writeln!(out, "[{scope}]")?;
    writeln!(out, "  headers:")?;
    for (name, value) in builder.default_headers_for_type(scope) {
      writeln!(out, "    {name}: {value}")?;
    }
    writeln!(out, "  parameters:")?;
    for (name, value) in builder.default_parameters_for_type(scope) {
      writeln!(out, "    {name}={value}")?;
    }
  }
  Ok(())
}

fn parse_header(s: &str) -> Result<(String, String), String> {
  let (name, value) = s
    .split_once(':')
    .ok_or_else(|| format!("invalid header '{s}': expected `Name: value`"))?;
  let name = name.trim();
  if name.is_empty() {
    return Err(format!("invalid header '{s}': empty name"));
  }
  Ok((name.to_string(), value.trim().to_string()))
}

fn parse_query(s: &str) -> Result<(String, String), String> {
  let (key, value) = s
    .split_once('=')
    .ok_or_else(|| format!("invalid query parameter '{s}': expected `key=value`"))?;
  if key.is_empty() {
    return Err(format!("invalid query parameter '{s}': empty key"));
  }
  Ok((key.to_string(), value.to_string()))
}
