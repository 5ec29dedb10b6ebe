//! Application services and ports.

#![forbid(unsafe_code)]

mod admission_service;
mod reconcile_ports;
mod reconcile_service;

pub use admission_service::{AdmissionService, AdmissionVerdict};
pub use reconcile_ports::{AccessRequestStore, AccessReviewer, Clock, GrantCreation, GrantStore};
pub use reconcile_service::{ReconcileOutcome, ReconcileService};
