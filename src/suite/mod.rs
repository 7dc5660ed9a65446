//! Scenario suites stored on disk.
//!
//! A suite is a directory tree of YAML (or JSON) files, one scenario per
//! file, run in path order:
//!
//! ```yaml
//! name: OrgOwner - Login
//! request:
//!   method: POST
//!   url: /auth/token
//!   body: |
//!     {"email": "{{last_org_owner_email}}", "password": "itsasecret"}
//! expect:
//!   status: 200
//!   properties: [access_token, refresh_token]
//! capture:
//!   - org_owner_token = $.access_token
//! ```

pub mod definition;
pub mod loader;

pub use definition::{Expectations, HeaderExpectation, PropertyExpectation, ScenarioDefinition};
pub use loader::{discover_scenario_files, load_scenario_file, load_suite, SuiteError};
