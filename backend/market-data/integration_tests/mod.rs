mod helpers;
mod search;
mod token;
