mod collapsible;
mod page;
