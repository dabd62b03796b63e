pub mod db;
pub mod memory;
pub mod otp;

pub use db::PgStore;
pub use memory::MemoryStore;
pub use otp::OtpRegistry;
