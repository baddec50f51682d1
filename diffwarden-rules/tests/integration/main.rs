//! Integration tests for diffwarden-rules

mod evaluation;
mod loading;
