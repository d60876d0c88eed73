//! Integration tests driving the full router.


mod auth_test;
mod avatar_test;
mod user_test;
