pub mod clock;
pub mod filter;
pub mod registry;
pub mod services;
pub mod utils;
