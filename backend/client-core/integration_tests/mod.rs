mod component;
mod helpers;
mod pricing_client;
mod token_exchange;
