// Endpoints reachable without a token.
pub mod root;
pub mod token;

pub use root::root;
pub use token::login_for_access_token;
