//! # apsetup-prefs
//!
//! Preference-store handling for the apsetup CLI:
//! - property-list codec (binary and XML read, XML write)
//! - reconciliation of desired state into an existing store
//! - typed registration of recipe repos and search directories

pub mod codec;
pub mod error;
pub mod reconcile;
pub mod registry;

pub use codec::{decode, encode, read_store, write_store};
pub use error::{Error, Result};
pub use reconcile::{reconcile, ReconcileOptions, ReconcileSummary};
pub use registry::{register_recipe_repo, register_search_dir};

// The store's in-memory representation is the plist data model
pub use plist::{Dictionary, Value};
