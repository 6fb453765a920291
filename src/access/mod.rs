/// Access Layer
///
/// Users, roles, and the authorization policy that gates viewing and mutating
/// projects.

pub mod user;

// Pure (user, project, action) decisions
pub mod policy;

pub use policy::{authorize, Action};
pub use user::{Role, User};
