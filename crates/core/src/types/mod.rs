//! Contact data types.
//!
//! Every type here is built through a validating constructor. The free
//! `normalize_*` functions are the lenient entry points used by the
//! conversion reporter: they return `None` instead of an error.

pub mod email;
pub mod identity;
pub mod name;
pub mod phone;

pub use email::{Email, EmailError, normalize_email};
pub use identity::{ContactIdentity, NormalizedIdentity};
pub use name::{NameParts, split_name};
pub use phone::{DEFAULT_COUNTRY_CODE, PhoneError, PhoneNumber, normalize_phone};
