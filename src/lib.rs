pub mod classify;
pub mod columns;
pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod table;
