//! Persistence for users and workouts.
//!
//! - [`traits`] - the `CredentialStore` and `WorkoutStore` seams the API consumes
//! - [`turso`] - libsql implementation (in-memory, local file, or remote Turso)
//!
//! Enable the remote backend via Cargo features:
//! ```toml
//! fittrack-server = { version = "*", features = ["turso"] }
//! ```

pub mod traits;
pub mod turso;

pub use traits::{CredentialStore, DatabaseProvider, NewWorkout, StoreError, WorkoutStore};
pub use turso::TursoClient;
