//! Create command implementation
//!
//! Creates a parent and issues its children.

use super::{read_body, run_request};
use crate::api::{Method, Request};
use crate::domain::ParentKind;
use clap::Args;

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Parent kind (raffle or product)
    pub kind: ParentKind,

    /// JSON body file, or `-` for stdin
    #[arg(short, long)]
    pub body: String,
}

impl CreateArgs {
    /// Execute the create command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(kind = %self.kind, "Creating parent");
        let body = read_body(&self.body)?;
        run_request(config_path, self.kind, Request::new(Method::Post).with_body(body)).await
    }
}
