mod ledger;
mod parser;
mod twitter;
