//! Bearer-token verification. Tokens are issued by the hosted service.

mod claims;
pub(crate) mod extractors;
pub mod jwt;

pub use claims::Claims;
pub use extractors::{UserContext, UTC_OFFSET_HEADER};
