pub mod bayes;

pub use crate::bayes::{Model, Prediction};
