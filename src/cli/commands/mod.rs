//! CLI command implementations
//!
//! Record commands build a [`Request`], run it through a
//! [`RequestHandler`] and print the response body. Exit codes:
//! 0 success, 2 configuration error, 3 client error, 5 server or fatal error.

pub mod create;
pub mod delete;
pub mod init;
pub mod read;
pub mod update;
pub mod validate;

use crate::adapters::database::create_store;
use crate::api::{Request, RequestHandler, Response};
use crate::config::load_config;
use crate::domain::ParentKind;
use anyhow::Context;
use std::io::Read;

/// Exit code for a successful command
pub const EXIT_OK: i32 = 0;
/// Exit code for a configuration problem
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for a rejected request
pub const EXIT_CLIENT: i32 = 3;
/// Exit code for a store or fatal failure
pub const EXIT_FATAL: i32 = 5;

/// Maps a response status to a process exit code
pub fn exit_code_for(status_code: u16) -> i32 {
    match status_code {
        200..=299 => EXIT_OK,
        400..=499 => EXIT_CLIENT,
        _ => EXIT_FATAL,
    }
}

/// Reads a request body from a file, or from stdin when `source` is `-`
pub fn read_body(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read request body from stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read request body from {source}"))
    }
}

/// Loads configuration, builds the store, and runs one request
pub(crate) async fn run_request(
    config_path: &str,
    kind: ParentKind,
    request: Request,
) -> anyhow::Result<i32> {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return Ok(EXIT_CONFIG);
        }
    };

    let store = create_store(&config)
        .await
        .context("Failed to initialize store")?;
    let handler = RequestHandler::new(store, &config, kind);
    let response = handler.handle(request).await;

    print_response(&response);
    Ok(exit_code_for(response.status_code))
}

fn print_response(response: &Response) {
    for (name, value) in response.headers.iter().filter(|(n, _)| n.starts_with("x-")) {
        eprintln!("{name}: {value}");
    }
    eprintln!("status: {}", response.status_code);

    // Pretty-print JSON bodies; fall back to the raw text
    match serde_json::from_str::<serde_json::Value>(&response.body)
        .and_then(|value| serde_json::to_string_pretty(&value))
    {
        Ok(pretty) => println!("{pretty}"),
        Err(_) => println!("{}", response.body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_exit_code_for() {
        assert_eq!(exit_code_for(200), EXIT_OK);
        assert_eq!(exit_code_for(400), EXIT_CLIENT);
        assert_eq!(exit_code_for(404), EXIT_CLIENT);
        assert_eq!(exit_code_for(500), EXIT_FATAL);
    }

    #[test]
    fn test_read_body_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"name":"x"}"#).unwrap();
        let body = read_body(file.path().to_str().unwrap()).unwrap();
        assert_eq!(body, r#"{"name":"x"}"#);
    }

    #[test]
    fn test_read_body_missing_file() {
        assert!(read_body("/definitely/not/here.json").is_err());
    }

    #[tokio::test]
    async fn test_run_request_missing_config() {
        let request = Request::new(crate::api::Method::Get);
        let code = run_request("missing-tombola.toml", ParentKind::Raffle, request)
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
