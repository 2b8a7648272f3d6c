//! Per-operator call counters

use serde::{Deserialize, Serialize};

use crate::rounding::{Operator, Precision};

/// Call counts of one operator at one width
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpCount {
    /// Every call
    pub total: u64,
    /// Calls that went through the rounding engine
    pub instrumented: u64,
}

/// Counters for every (operator, precision) pair
#[derive(Debug, Clone, Default)]
pub struct OpCounters {
    counts: [[OpCount; 2]; 7],
}

impl OpCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, op: Operator, precision: Precision, instrumented: bool) {
        let count = &mut self.counts[op.index()][precision.index()];
        count.total += 1;
        if instrumented {
            count.instrumented += 1;
        }
    }

    pub fn get(&self, op: Operator, precision: Precision) -> OpCount {
        self.counts[op.index()][precision.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().map(|c| c.total).sum()
    }

    /// Snapshot of every pair that saw at least one call
    pub fn summary(&self) -> OpCountSummary {
        let entries = Operator::ALL
            .iter()
            .flat_map(|&op| Precision::ALL.iter().map(move |&precision| (op, precision)))
            .filter_map(|(op, precision)| {
                let count = self.get(op, precision);
                (count.total > 0).then_some(OpCountEntry {
                    operator: op,
                    precision,
                    total: count.total,
                    instrumented: count.instrumented,
                })
            })
            .collect();
        OpCountSummary { entries }
    }
}

/// One row of the count summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpCountEntry {
    pub operator: Operator,
    pub precision: Precision,
    pub total: u64,
    pub instrumented: u64,
}

/// Count summary emitted when a backend is finalized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpCountSummary {
    pub entries: Vec<OpCountEntry>,
}

impl OpCountSummary {
    pub fn get(&self, op: Operator, precision: Precision) -> Option<&OpCountEntry> {
        self.entries
            .iter()
            .find(|e| e.operator == op && e.precision == precision)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.total).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
