//! List and get command implementations

use super::run_request;
use crate::api::{Method, Request};
use crate::domain::ParentKind;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Parent kind (raffle or product)
    pub kind: ParentKind,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        run_request(config_path, self.kind, Request::new(Method::Get)).await
    }
}

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Parent kind (raffle or product)
    pub kind: ParentKind,

    /// Parent identifier
    pub id: String,
}

impl GetArgs {
    /// Execute the get command
    ///
    /// An unknown identifier prints `null` and still exits 0.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let request = Request::new(Method::Get).with_path_id(&self.id);
        run_request(config_path, self.kind, request).await
    }
}
