//! Update command implementation

use super::{read_body, run_request};
use crate::api::{Method, Request};
use crate::domain::ParentKind;
use clap::Args;

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Parent kind (raffle or product)
    pub kind: ParentKind,

    /// Parent identifier
    pub id: String,

    /// JSON patch file, or `-` for stdin
    #[arg(short, long)]
    pub body: String,
}

impl UpdateArgs {
    /// Execute the update command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let body = read_body(&self.body)?;
        let request = Request::new(Method::Put)
            .with_path_id(&self.id)
            .with_body(body);
        run_request(config_path, self.kind, request).await
    }
}
