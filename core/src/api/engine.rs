//! The compilation engine.

use std::collections::HashMap;

use tracing::debug;

use super::{CompiledExpression, EngineOptions, Error};
use crate::diagnostics::{ErrorListener, SyntaxDiagnostic};
use crate::parser::{self, convert_pest_error};
use crate::checker;
use crate::values::Value;

/// Compiles and evaluates expressions.
///
/// The engine holds no per-expression state, so one engine can compile any
/// number of expressions.
///
/// # Example
///
/// ```
/// use dimexpr_core::api::{Engine, EngineOptions, Error};
///
/// let engine = Engine::new(EngineOptions::default());
/// assert!(engine.compile("sum(#{A}.period(-2, 0))").is_ok());
/// assert!(matches!(engine.compile("1 * "), Err(Error::Syntax { .. })));
/// assert!(matches!(engine.compile("1 + true"), Err(Error::Check(_))));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Compile an expression.
    ///
    /// Lexes, parses and type-checks `source`. Lexing and parsing report into
    /// an [`ErrorListener`] which is drained after each stage; anything it
    /// holds aborts compilation with [`Error::Syntax`] before the prepass
    /// runs.
    pub fn compile(&self, source: &str) -> Result<CompiledExpression, Error> {
        let mut listener = ErrorListener::new();

        debug!(source, "lexing");
        if let Err(err) = parser::tokenize(source) {
            listener.syntax_error(convert_pest_error(&err, source));
        }
        Self::drain(&mut listener, source)?;

        debug!(source, "parsing");
        let expr = match parser::parse(source) {
            Ok(expr) => expr,
            Err(err) => {
                listener.syntax_error(convert_pest_error(&err, source));
                return Err(Self::syntax_error(source, listener.drain_diagnostics()));
            }
        };

        debug!(source, "prepass");
        let item_scopes = checker::check_with(&expr, &self.options.context(), self.options.max_depth)
            .map_err(Error::Check)?;

        Ok(CompiledExpression::new(
            source.to_string(),
            expr,
            item_scopes,
            self.options.clone(),
        ))
    }

    /// Compile and evaluate in one step.
    pub fn evaluate(
        &self,
        source: &str,
        values: &HashMap<String, f64>,
        constants: &HashMap<String, f64>,
    ) -> Result<Value, Error> {
        self.compile(source)?.evaluate(values, constants)
    }

    fn drain(listener: &mut ErrorListener, source: &str) -> Result<(), Error> {
        let diagnostics = listener.drain_diagnostics();
        if diagnostics.is_empty() {
            return Ok(());
        }
        Err(Self::syntax_error(source, diagnostics))
    }

    fn syntax_error(source: &str, diagnostics: Vec<SyntaxDiagnostic>) -> Error {
        Error::Syntax {
            source: source.to_string(),
            diagnostics,
        }
    }
}
