mod error;
mod token;
