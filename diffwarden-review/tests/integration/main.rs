//! Integration tests for diffwarden-review

mod github_review;
mod scenarios;
