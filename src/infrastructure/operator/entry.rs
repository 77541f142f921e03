//! The operator capability surface handed to inbound adapters.

/// Stateless operator; every use-case parses the inputs it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Operator;
