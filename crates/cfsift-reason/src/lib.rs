//! Natural-language reasons for filtered counterfactuals.
//!
//! A [`ReasonRenderer`] turns the [`DiffMap`](cfsift_core::DiffMap) of a
//! surviving counterfactual into a sentence such as:
//!
//! ```text
//! when age increases from 30.000 to 35.000 and color changes from A to B,
//! the output of the model [label] changes from 0 to 1.
//! ```
//!
//! [`top_features`] orders per-feature importance scores for display next to
//! the reasons.

mod importance;
mod phrase;
mod renderer;

pub use importance::top_features;
pub use phrase::{format_value, Behaviour};
pub use renderer::{Explanation, ReasonRenderer};
