//! Infrastructure Layer
//!
//! Database implementations and the outbound mail queue.

pub mod notify;
pub mod postgres;

pub use notify::MailQueue;
pub use postgres::PgAuthRepository;
