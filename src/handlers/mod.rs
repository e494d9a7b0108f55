// handlers/mod.rs - two security tiers
//
// public:    no authentication (root banner, token acquisition)
// protected: bearer token required (table listing and table data)
pub mod protected;
pub mod public;

pub use protected::*;
pub use public::*;
