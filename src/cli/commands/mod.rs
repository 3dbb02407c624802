pub mod resolve;
pub mod whoami;
