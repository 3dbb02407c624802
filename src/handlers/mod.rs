// Public handlers answer anonymous callers; protected ones sit behind the identity guard.
pub mod identity;
pub mod system;

pub use identity::{identity_get, whoami_get};
pub use system::{health, root};
