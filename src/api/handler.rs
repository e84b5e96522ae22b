//! Verb dispatch and status mapping
//!
//! | Verb   | Success                        | Failure                                  |
//! |--------|--------------------------------|------------------------------------------|
//! | POST   | 200, children array            | 400 bad body or range, 500 parent write  |
//! | GET    | 200, parent, `null`, or list   | 500 store error                          |
//! | PUT    | 200, updated parent            | 400 missing id or bad patch, 404, 400    |
//! | DELETE | 200, confirmation string       | 400 missing id or store error, 404 when  |
//! |        |                                | neither the parent nor a child exists    |

use super::request::{Method, Request};
use super::response::Response;
use crate::adapters::database::KeyValueStore;
use crate::config::TombolaConfig;
use crate::core::{CascadeDeleter, EntityStore, Issuer};
use crate::domain::time::now_millis;
use crate::domain::{NewParent, ParentKind, ParentPatch, TombolaError};
use crate::log_error_with_context;
use std::sync::Arc;

/// Issuance outcome header: `complete` or `partial`
pub const HEADER_ISSUANCE_STATUS: &str = "x-issuance-status";
/// Number of children written
pub const HEADER_CHILDREN_PERSISTED: &str = "x-children-persisted";
/// Number of failed pages
pub const HEADER_PAGES_FAILED: &str = "x-pages-failed";
/// Cascade outcome header: `complete` or `partial`
pub const HEADER_CASCADE_STATUS: &str = "x-cascade-status";
/// Number of children removed
pub const HEADER_CHILDREN_REMOVED: &str = "x-children-removed";

fn status_word(complete: bool) -> &'static str {
    if complete {
        "complete"
    } else {
        "partial"
    }
}

/// Handles requests for one parent kind
pub struct RequestHandler {
    kind: ParentKind,
    issuer: Issuer,
    entities: EntityStore,
    deleter: CascadeDeleter,
}

impl RequestHandler {
    /// Create a handler for `kind` over `store`
    pub fn new(
        store: Arc<dyn KeyValueStore + Send + Sync>,
        config: &TombolaConfig,
        kind: ParentKind,
    ) -> Self {
        Self {
            kind,
            issuer: Issuer::new(store.clone(), config, kind),
            entities: EntityStore::for_kind(store.clone(), &config.tables, kind),
            deleter: CascadeDeleter::new(store, config, kind),
        }
    }

    /// Parent kind this handler serves
    pub fn kind(&self) -> ParentKind {
        self.kind
    }

    /// Dispatches a request and maps the outcome to a response
    pub async fn handle(&self, request: Request) -> Response {
        tracing::info!(method = %request.method, kind = %self.kind, "Handling request");

        let response = match request.method {
            Method::Post => self.create(&request).await,
            Method::Get => self.read(&request).await,
            Method::Put => self.update(&request).await,
            Method::Delete => self.delete(&request).await,
        };

        tracing::info!(
            method = %request.method,
            kind = %self.kind,
            status = response.status_code,
            "Request handled"
        );
        response
    }

    async fn create(&self, request: &Request) -> Response {
        let Some(body) = request.body_text() else {
            return Response::error(400, "Request body is required");
        };
        let new_parent = match NewParent::from_json(body) {
            Ok(new_parent) => new_parent,
            Err(e) => return Response::error(400, &e.to_string()),
        };

        match self.issuer.issue(new_parent).await {
            Ok(report) => Response::json(200, &report.children)
                .with_header(HEADER_ISSUANCE_STATUS, status_word(report.is_complete()))
                .with_header(HEADER_CHILDREN_PERSISTED, report.children_persisted())
                .with_header(HEADER_PAGES_FAILED, report.pages_failed()),
            Err(e) if e.is_client_error() => Response::error(400, &e.to_string()),
            Err(e) => {
                log_error_with_context!(&e, "parent creation failed");
                Response::error(500, &e.to_string())
            }
        }
    }

    async fn read(&self, request: &Request) -> Response {
        match request.resolve_id() {
            Some(id) => match self.entities.find(&id).await {
                Ok(parent) => Response::json(200, &parent),
                Err(e) => {
                    log_error_with_context!(&e, "parent read failed");
                    Response::error(500, &e.to_string())
                }
            },
            None => match self.entities.list_all().await {
                Ok(parents) => Response::json(200, &parents),
                Err(e) => {
                    log_error_with_context!(&e, "parent listing failed");
                    Response::error(500, &e.to_string())
                }
            },
        }
    }

    async fn update(&self, request: &Request) -> Response {
        let Some(id) = request.resolve_id() else {
            return Response::error(400, "Missing _id");
        };
        let Some(body) = request.body_text() else {
            return Response::error(400, "Request body is required");
        };
        let patch = match ParentPatch::from_json(body) {
            Ok(patch) => patch,
            Err(e) => return Response::error(400, &e.to_string()),
        };

        match self.entities.update(&id, &patch, now_millis()).await {
            Ok(parent) => Response::json(200, &parent),
            Err(e @ TombolaError::NotFound(_)) => Response::error(404, &e.to_string()),
            Err(e) => {
                if !e.is_client_error() {
                    log_error_with_context!(&e, "parent update failed");
                }
                Response::error(400, &e.to_string())
            }
        }
    }

    async fn delete(&self, request: &Request) -> Response {
        let Some(id) = request.resolve_id() else {
            return Response::error(400, "Missing _id");
        };

        match self.deleter.delete_parent_and_children(&id).await {
            Ok(report) => {
                let message = format!("{} deleted {id}", self.kind.label());
                Response::json(200, &message)
                    .with_header(HEADER_CASCADE_STATUS, status_word(report.is_complete()))
                    .with_header(HEADER_CHILDREN_REMOVED, report.children_removed)
                    .with_header(HEADER_PAGES_FAILED, report.pages_failed)
            }
            Err(e @ TombolaError::NotFound(_)) => Response::error(404, &e.to_string()),
            Err(e) => {
                log_error_with_context!(&e, "cascade delete failed");
                Response::error(400, &e.to_string())
            }
        }
    }
}
