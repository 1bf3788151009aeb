//! Purpose: `h1` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, resolves config, runs one API call, emits JSON on stdout.
//! Invariants: Successful commands print exactly one JSON value on stdout.
//! Invariants: Errors are emitted as JSON on stderr (plain text when stderr is a terminal).
//! Invariants: Process exit code is derived from `api::to_exit_code`.
#![allow(clippy::result_large_err)]
use std::io::{self, IsTerminal};

use clap::{CommandFactory, Parser, Subcommand, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use h1::api::{Client, Error, ErrorKind, ReportListFilter, to_exit_code};
use h1::config::ClientConfig;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "h1",
    version,
    about = "Query the HackerOne API from the command line",
    long_about = None,
    after_help = r#"ENVIRONMENT
  H1_API_IDENTIFIER, H1_API_TOKEN   API token credentials (HTTP basic auth)
  H1_BASE_URL                       API root (default: https://api.hackerone.com/v1/)
  H1_PAGE_SIZE, H1_TIMEOUT_SECS     Listing page size and request timeout
  RUST_LOG                          Diagnostic verbosity on stderr (default: warn)

EXAMPLES
  $ h1 programs
  $ h1 scopes 1337
  $ h1 reports --program security --state new --state triaged
  $ h1 report 42 | jq .title"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(long, help = "Override the API base URL")]
    base_url: Option<String>,
    #[arg(long, help = "Items per listing page (1-100)")]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "List programs the credentials belong to")]
    Programs,
    #[command(about = "Fetch one program with its groups and members")]
    Program {
        #[arg(help = "Program id")]
        id: String,
    },
    #[command(about = "List every structured scope of a program")]
    Scopes {
        #[arg(help = "Program id")]
        program_id: String,
    },
    #[command(about = "List every report matching the filters")]
    Reports {
        #[arg(long = "program", required = true, help = "Program handle (repeatable)")]
        programs: Vec<String>,
        #[arg(long = "state", help = "Report state (repeatable)")]
        states: Vec<String>,
    },
    #[command(about = "Fetch one report with its relationships")]
    Report {
        #[arg(help = "Report id")]
        id: String,
    },
    #[command(about = "List every credential inquiry of a program")]
    Inquiries {
        #[arg(help = "Program id")]
        program_id: String,
    },
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ h1 completion bash > ~/.local/share/bash-completion/completions/h1
  $ h1 completion zsh > ~/.zfunc/_h1
  $ h1 completion fish > ~/.config/fish/completions/h1.fish"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<i32, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(code);
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `h1 --help`."));
            }
        },
    };

    let connection = Connection {
        base_url: cli.base_url,
        page_size: cli.page_size,
    };
    dispatch(cli.command, &connection)?;
    Ok(0)
}

/// Global flags that shape the API client; resolved only by commands that talk to the API.
struct Connection {
    base_url: Option<String>,
    page_size: Option<u32>,
}

impl Connection {
    fn config(&self) -> Result<ClientConfig, Error> {
        let mut config = ClientConfig::from_env()?;
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        Ok(config)
    }

    fn client(&self) -> Result<Client, Error> {
        let config = self.config()?;
        if config.api_identifier.is_none() {
            tracing::warn!("no API credentials configured; requests are unauthenticated");
        }
        Client::from_config(&config)
    }
}

fn dispatch(command: Command, connection: &Connection) -> Result<(), Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "h1", &mut io::stdout());
            Ok(())
        }
        Command::Programs => {
            let (programs, _) = connection.client()?.programs().me()?;
            emit_json(&programs)
        }
        Command::Program { id } => {
            let (program, _) = connection.client()?.programs().get(&id)?;
            emit_json(&program)
        }
        Command::Scopes { program_id } => {
            let scopes = connection
                .client()?
                .programs()
                .list_all_structured_scopes(&program_id)?;
            emit_json(&scopes)
        }
        Command::Reports { programs, states } => {
            let filter = ReportListFilter::for_programs(programs).with_states(states);
            let reports = connection.client()?.reports().list_all(&filter)?;
            emit_json(&reports)
        }
        Command::Report { id } => {
            let (report, _) = connection.client()?.reports().get(&id)?;
            emit_json(&report)
        }
        Command::Inquiries { program_id } => {
            let inquiries = connection
                .client()?
                .credentials()
                .list_all_credential_inquiries(&program_id)?;
            emit_json(&inquiries)
        }
    }
}

fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Error> {
    let encode = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    let json = encode.map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode output json")
            .with_source(err)
    })?;
    println!("{json}");
    Ok(())
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }
    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Decode => "unexpected response body".to_string(),
        ErrorKind::Transport => "request failed".to_string(),
        ErrorKind::Api => "api error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::RateLimited => "rate limited".to_string(),
        ErrorKind::Pagination => "pagination failed".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Internal => "internal error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(status) = err.status() {
        inner.insert("status".to_string(), json!(status));
    }
    if let Some(url) = err.url() {
        inner.insert("url".to_string(), json!(url));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(status) = err.status() {
        lines.push(format!("status: {status}"));
    }
    if let Some(url) = err.url() {
        lines.push(format!("url: {url}"));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
