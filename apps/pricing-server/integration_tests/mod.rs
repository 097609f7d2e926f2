mod auth;
mod helpers;
mod price;
