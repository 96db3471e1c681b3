use crate::config::{load_config, AppConfig};
use crate::controllers::demo_router;
use crate::server::{Request, Response};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use http::header::{HeaderName, HeaderValue};
use http::Method;
use std::io::Write;
use std::path::PathBuf;

/// Command-line interface for convrouter
#[derive(Debug, Parser)]
#[command(name = "convrouter", version)]
#[command(about = "Convention-driven router demo", long_about = None)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "CONVROUTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the demo route table
    Routes {
        /// Also report action parameters no injector supports
        #[arg(long, default_value_t = false)]
        verify: bool,
    },
    /// Run one request through the demo router and print the response
    Call {
        /// HTTP verb (case-insensitive)
        verb: String,

        /// Raw path including any query string, e.g. `/user/show?id=1`
        uri: String,

        /// Request body
        #[arg(short = 'd', long)]
        body: Option<String>,

        /// Extra header as `name: value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
}

impl Cli {
    /// The configuration file (or defaults) with environment overrides.
    pub fn app_config(&self) -> Result<AppConfig> {
        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };
        Ok(config.with_env_overrides())
    }
}

/// Execute `cli` against the demo router, writing to `out`.
///
/// # Errors
///
/// Returns an error if:
/// - the demo controllers fail registration
/// - the verb or a header cannot be parsed
/// - writing to `out` fails
pub fn run_cli<W: Write>(cli: &Cli, config: &AppConfig, out: &mut W) -> Result<()> {
    let router = demo_router(config.router).context("Failed to register demo controllers")?;

    match &cli.command {
        Commands::Routes { verify } => {
            router.write_routes(out)?;
            if *verify {
                let missing = router.unresolved_parameters();
                router.verify();
                writeln!(out, "unresolved parameters: {}", missing.len())?;
                for (path, token) in missing {
                    writeln!(out, "  {path}: {token}")?;
                }
            }
        }
        Commands::Call {
            verb,
            uri,
            body,
            headers,
        } => {
            let method = Method::from_bytes(verb.to_uppercase().as_bytes())
                .with_context(|| format!("Invalid HTTP verb '{verb}'"))?;
            let mut request = Request::new(method, uri.as_str());
            for header in headers {
                let (name, value) = parse_header(header)?;
                request = request.with_header(name, value);
            }
            if let Some(body) = body {
                request = request.with_body(body.as_bytes());
            }

            let mut response = Response::new();
            router.handle(&mut request, &mut response);
            write_response(out, &response)?;
        }
    }
    Ok(())
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("Header '{raw}' is not in 'name: value' form"))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .with_context(|| format!("Invalid header name in '{raw}'"))?;
    let value = HeaderValue::from_str(value.trim())
        .with_context(|| format!("Invalid header value in '{raw}'"))?;
    Ok((name, value))
}

fn write_response<W: Write>(out: &mut W, response: &Response) -> Result<()> {
    writeln!(out, "HTTP/1.1 {}", response.status())?;
    for (name, value) in response.headers() {
        writeln!(out, "{}: {}", name, value.to_str().unwrap_or("<binary>"))?;
    }
    writeln!(out)?;
    out.write_all(response.body())?;
    if !response.body().is_empty() {
        writeln!(out)?;
    }
    Ok(())
}
