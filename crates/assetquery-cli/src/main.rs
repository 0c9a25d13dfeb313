//! Assetquery CLI - Inspect how search requests are encoded on the wire

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assetquery_core::SearchRequest;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/search";

#[derive(Parser, Debug)]
#[command(name = "assetquery", version, about = "Encode asset registry search requests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a JSON search request
    Encode {
        /// Request document (`-` reads stdin)
        #[arg(default_value = "-")]
        request: PathBuf,

        /// Wire form to print
        #[arg(long, value_enum, default_value_t = Format::QueryString)]
        format: Format,

        /// Search endpoint used by `--format url`
        #[arg(long, env = "ASSETQUERY_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: Url,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// `&`-joined query string
    QueryString,
    /// JSON object of parameter name to value list
    Map,
    /// Endpoint URL with the query string attached
    Url,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the encoded output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("assetquery=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            request,
            format,
            base_url,
        } => {
            let request = load_request(&request)?;
            println!("{}", encode(&request, format, &base_url)?);
        }
    }

    Ok(())
}

fn load_request(path: &Path) -> Result<SearchRequest> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?
    };

    let request = SearchRequest::from_json(&json)
        .with_context(|| format!("Failed to parse request {}", path.display()))?;
    debug!(?request, "Loaded search request");

    if request.is_empty() {
        info!("Request is empty; nothing will be encoded");
    }
    Ok(request)
}

fn encode(request: &SearchRequest, format: Format, base_url: &Url) -> Result<String> {
    let output = match format {
        Format::QueryString => request.to_http_query_string(),
        Format::Map => serde_json::to_string_pretty(&request.to_multi_value_query_map())?,
        Format::Url => request.to_url(base_url).to_string(),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetquery_core::{FilterClause, FilterOperator};

    fn sample() -> SearchRequest {
        SearchRequest::new()
            .with_type("device")
            .filter(FilterOperator::Eq, FilterClause::new("status", "active"))
    }

    #[test]
    fn test_encode_formats() {
        let base: Url = DEFAULT_BASE_URL.parse().unwrap();

        assert_eq!(
            encode(&sample(), Format::QueryString, &base).unwrap(),
            "type=device&eq=status%3Aactive"
        );
        assert_eq!(
            encode(&sample(), Format::Url, &base).unwrap(),
            "http://127.0.0.1:3000/search?type=device&eq=status%3Aactive"
        );

        let map: serde_json::Value =
            serde_json::from_str(&encode(&sample(), Format::Map, &base).unwrap()).unwrap();
        assert_eq!(
            map,
            serde_json::json!({"eq": ["status:active"], "type": ["device"]})
        );
    }

    #[test]
    fn test_cli_parses_encode() {
        let cli = Cli::try_parse_from([
            "assetquery",
            "encode",
            "req.json",
            "--format",
            "map",
            "--base-url",
            "https://registry.example.com/search",
        ])
        .unwrap();

        let Commands::Encode {
            request,
            format,
            base_url,
        } = cli.command;
        assert_eq!(request, PathBuf::from("req.json"));
        assert_eq!(format, Format::Map);
        assert_eq!(base_url.as_str(), "https://registry.example.com/search");
    }

    #[test]
    fn test_load_request_reports_missing_file() {
        let err = load_request(Path::new("/nonexistent/request.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/request.json"));
    }
}
