//! Rule-based findings for biochemistry results.
//!
//! Turns the values resolved for a biochemistry panel into the short
//! findings line printed under the results, e.g.
//! `hypoalbuminemia, hyperbilirubinemia predominantly conjugated`.

mod biochemistry;
mod error;
mod finding;
mod sex;

pub use biochemistry::{BiochemistryPanel, interpret};
pub use error::{InterpretError, Result};
pub use finding::{Activity, Conclusion, Finding};
pub use sex::Sex;
