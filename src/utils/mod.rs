pub mod cache_bust;
pub mod clock;
pub mod validation;
