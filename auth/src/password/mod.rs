pub mod argon2;
pub mod errors;
pub mod hasher;
pub mod pbkdf2;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
pub use hasher::PasswordScheme;
