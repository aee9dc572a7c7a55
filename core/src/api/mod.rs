//! Public API for compiling and evaluating indicator expressions.
//!
//! Compilation runs the whole front half of the pipeline: lexing, parsing and
//! the type-checking prepass. A [`CompiledExpression`] can then be evaluated
//! any number of times against different data.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use dimexpr_core::api::{Engine, EngineOptions};
//! use dimexpr_core::values::Value;
//!
//! let engine = Engine::new(EngineOptions::default());
//! let expr = engine.compile("#{A} * 2").unwrap();
//!
//! let values = HashMap::from([("#{A}".to_string(), 21.0)]);
//! let result = expr.evaluate(&values, &HashMap::new()).unwrap();
//! assert_eq!(result, Value::Number(42.0));
//! ```

pub mod engine;
pub mod error;
pub mod expression;
pub mod options;

pub use engine::Engine;
pub use error::Error;
pub use expression::CompiledExpression;
pub use options::EngineOptions;
