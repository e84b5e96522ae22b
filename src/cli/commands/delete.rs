//! Delete command implementation
//!
//! Deletes a parent together with its children.

use super::run_request;
use crate::api::{Method, Request};
use crate::domain::ParentKind;
use clap::Args;

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Parent kind (raffle or product)
    pub kind: ParentKind,

    /// Parent identifier
    pub id: String,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(kind = %self.kind, id = %self.id, "Deleting parent and children");
        let request = Request::new(Method::Delete).with_path_id(&self.id);
        run_request(config_path, self.kind, request).await
    }
}
