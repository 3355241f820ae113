pub mod annotate;
pub mod enrich;
pub mod full;
pub mod shared;
