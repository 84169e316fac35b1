//! Human-readable query export for the negotiator system.

mod human_readable;
pub use human_readable::human_readable;

mod export;
pub use export::{negotiator_query, strip_n_token};
