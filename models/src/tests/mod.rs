mod card_query;
mod lenient;
