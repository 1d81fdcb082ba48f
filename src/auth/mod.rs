pub mod current_user;
pub mod jwt;

pub use current_user::CurrentUser;
pub use jwt::{generate_token, verify_token, Claims};
