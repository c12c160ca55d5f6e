pub mod google_user;
pub mod oauth_provider;
