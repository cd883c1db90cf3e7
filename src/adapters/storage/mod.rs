//! Rule persistence adapters.

mod file_rule_store;

pub use file_rule_store::FileRuleStore;
