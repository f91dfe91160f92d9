mod advancer;
mod compare;
#[cfg(feature = "serde_support")]
pub mod serde;

pub use advancer::Advancer;
pub use compare::{Compare, Natural, Reverse};
