mod filters;
mod fixtures;
mod query;
