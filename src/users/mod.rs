#[cfg(test)]
pub mod memory;
pub mod model;
pub mod password;
pub mod pg;
pub mod store;

pub use model::{NewUser, PublicUser};
pub use store::{StoreError, UserStore};
