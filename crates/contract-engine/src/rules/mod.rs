//! Rules applied to classified clauses
//!
//! - `risk`: structural gaps and high-risk wording -> risk level
//! - `checklist`: one pass/fail entry per clause category

pub mod checklist;
pub mod risk;
