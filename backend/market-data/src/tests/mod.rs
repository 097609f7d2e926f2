mod error;
mod items;
mod search_filter;
