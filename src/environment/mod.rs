//! Environment management
//!
//! The [`EnvironmentStore`] is the single mutable state shared between the
//! scenarios of a run. It is created empty, seeded (from an environment file,
//! the command line, or test code), handed to each scenario in turn, and
//! discarded when the run ends.
//!
//! # Example
//!
//! ```
//! use api_scenarios::environment::EnvironmentStore;
//!
//! let mut store = EnvironmentStore::new();
//! store.set("server", "http://localhost:8088");
//!
//! assert_eq!(store.get("server").unwrap(), "http://localhost:8088");
//! assert!(store.get("org_owner_token").is_err());
//! ```

pub mod loader;
pub mod models;
pub mod store;

pub use loader::{discover_environments, load_environment_file, EnvError};
pub use models::{Environment, Environments};
pub use store::EnvironmentStore;
