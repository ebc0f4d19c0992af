//! Execution-strategy selection from descriptor shape.

use dalgen_descriptor::{ResultContract, ResultType};

/// The handler shape selected from the result contract and non-query flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Execute without materializing rows; returns the affected-row count.
    Execute,
    /// Read a single integral scalar.
    ExecuteScalar(ResultType),
    /// Read a homogeneous sequence of rows.
    QueryMany(ResultType),
    /// Read at most one row.
    QuerySingleOrDefault(ResultType),
}

impl ExecutionStrategy {
    /// The Rust return type of the emitted handler.
    pub fn return_type(&self) -> String {
        match self {
            ExecutionStrategy::Execute => "u64".to_string(),
            ExecutionStrategy::ExecuteScalar(ty) => ty.element().to_string(),
            ExecutionStrategy::QueryMany(ty) => format!("Vec<{}>", ty.element()),
            ExecutionStrategy::QuerySingleOrDefault(ty) => format!("Option<{}>", ty.element()),
        }
    }
}

/// Select an execution strategy, or `None` when the descriptor declares no
/// capability (no handler is generated at all).
///
/// `non_query` always wins: even a sequence-typed contract executes as a
/// non-query when the flag is set (the analyzer warns about the mismatch,
/// but the strategy stays `Execute`).
pub fn classify(non_query: bool, result: Option<&ResultContract>) -> Option<ExecutionStrategy> {
    let contract = result?;
    if non_query {
        return Some(ExecutionStrategy::Execute);
    }
    let ty = contract.result_type().clone();
    if ty.is_sequence() {
        Some(ExecutionStrategy::QueryMany(ty))
    } else if ty.is_integral() {
        Some(ExecutionStrategy::ExecuteScalar(ty))
    } else {
        Some(ExecutionStrategy::QuerySingleOrDefault(ty))
    }
}
