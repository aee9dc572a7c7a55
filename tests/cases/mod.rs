#![allow(dead_code)]

use std::collections::HashMap;

use dimexpr::{Engine, Error, Value};
use once_cell::sync::Lazy;

pub static VALUE_MAP: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    HashMap::from([
        ("#{A0000000001}".to_string(), 1.0),
        ("#{A0000000002}".to_string(), 2.0),
        ("#{A0000000003}".to_string(), 3.0),
        ("#{A0000000004.COC00000001}".to_string(), 4.0),
        ("#{A0000000005}".to_string(), -5.0),
    ])
});

pub static CONSTANT_MAP: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    HashMap::from([
        ("PI000000000".to_string(), 3.14),
        ("ZERO0000000".to_string(), 0.0),
    ])
});

/// Compile and evaluate against the shared maps, in the default context.
pub fn run(input: &str) -> Result<Value, Error> {
    Engine::default().evaluate(input, &VALUE_MAP, &CONSTANT_MAP)
}

/// One test per expression.
///
/// - `value`: evaluation succeeds with this value.
/// - `error`: the error renders to this text.
/// - `syntax_error`: compilation stops before the prepass.
#[macro_export]
macro_rules! test_case {
    (name: $name:ident, input: $input:expr, value: { $value:expr } $(,)?) => {
        #[test]
        fn $name() {
            pretty_assertions::assert_eq!(cases::run($input), Ok($value));
        }
    };
    (name: $name:ident, input: $input:expr, error: { $error:expr } $(,)?) => {
        #[test]
        fn $name() {
            let err = cases::run($input).expect_err("expected an error");
            pretty_assertions::assert_eq!(err.to_string(), $error);
        }
    };
    (name: $name:ident, input: $input:expr, syntax_error $(,)?) => {
        #[test]
        fn $name() {
            let err = cases::run($input).expect_err("expected a syntax error");
            assert!(
                matches!(err, dimexpr::Error::Syntax { .. }),
                "expected a syntax error, got {:?}",
                err
            );
        }
    };
}
