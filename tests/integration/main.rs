//! Integration tests for termdeck

mod cli_test;
mod deck_test;
mod helpers;
mod protocol_test;
