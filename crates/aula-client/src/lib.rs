//! # Aula Client
//!
//! The admin-console side of the Aula platform: a small library implementing
//! the two patterns every entity screen repeats against the REST API.
//!
//! **Paginated list resource**: [`ResourceClient`] issues the HTTP calls and
//! normalizes the backend's two response shapes (paginated envelope or bare
//! array) into one [`Page`]; [`ListState`] owns pagination/search/sort state
//! for one entity list and discards stale responses; [`Table`] renders rows
//! from column descriptors.
//!
//! **Confirm-gated mutation**: [`ConfirmGate`] is the single-flight
//! "are you sure?" coordinator in front of destructive calls;
//! [`FormController`] owns a draft record and maps 422 field errors back onto
//! it; [`ResourceClient::bulk_delete`] fans out per-record deletes and
//! reports partial failures explicitly.

pub mod confirm;
pub mod error;
pub mod form;
pub mod list;
pub mod page;
pub mod resource;
pub mod table;
pub mod transport;

pub use confirm::{ConfirmError, ConfirmGate, ConfirmPrompt, ConfirmRequest, Severity};
pub use error::ClientError;
pub use form::{FormController, FormNotReady};
pub use list::{ListState, LoadPhase, SearchMode, Searchable, Sortable};
pub use page::Page;
pub use resource::{BulkOutcome, PageRequest, ResourceClient, SortDir};
pub use table::{Align, Column, Table};
pub use transport::{Method, RawResponse, ReqwestTransport, Transport};

#[cfg(test)]
pub(crate) mod testing;
