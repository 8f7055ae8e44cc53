use crate::types::Month;

/// The month positioned right after the `fetched` ones already requested.
pub fn next_month(months: &[Month], fetched: usize) -> Option<&Month> {
    months.get(fetched)
}

pub fn should_continue(fetched: usize, cap: usize) -> bool {
    fetched < cap
}

/// Sequential month-by-month chart chain.
///
/// Only one chart request is ever outstanding: the caller asks for the next
/// month after a chart result has arrived, never before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthChain {
    months: Vec<Month>,
    cap: usize,
}

impl MonthChain {
    pub fn new(months: Vec<Month>, cap: usize) -> Self {
        Self { months, cap }
    }

    /// Month that opens the chain.
    pub fn first(&self) -> Option<Month> {
        self.advance(0)
    }

    /// Month to request once `fetched` months have come back successfully.
    pub fn advance(&self, fetched: usize) -> Option<Month> {
        if !should_continue(fetched, self.cap) {
            return None;
        }
        next_month(&self.months, fetched).cloned()
    }
}
