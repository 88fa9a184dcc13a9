//! Rewrite rule tables
//!
//! Rule sets are data-driven: a TOML file declares the weak-phrase,
//! phrasing and connector tables plus the tone, style and mode profiles.
//! The English set is embedded; custom sets can be loaded from disk.

pub mod config;
pub mod loader;
pub mod tables;

pub use config::RuleConfig;
pub use loader::{builtin_rules, BUILTIN_RULES_TOML};
pub use tables::{Guard, Profile, RewriteRule, RuleScope, RuleSet, Transform};
