//! Account screens: login and sign-up, plus the identity provider port

pub mod login;
pub mod ports;
pub mod signup;

pub use login::{LoginController, LoginState};
pub use ports::IdentityProvider;
pub use signup::{SignUpController, SignUpState, SIGNUP_SUCCESS_MESSAGE};
