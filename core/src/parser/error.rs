use crate::diagnostics::SyntaxDiagnostic;
use crate::parser::{Rule, Span};

/// Convert a Pest error into a human-readable syntax diagnostic.
pub fn convert_pest_error(err: &pest::error::Error<Rule>, source: &str) -> SyntaxDiagnostic {
    use pest::error::ErrorVariant;

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span(pos..pos),
        pest::error::InputLocation::Span((start, end)) => Span(start..end),
    };

    let message = match &err.variant {
        ErrorVariant::ParsingError { positives, .. } => {
            let (line, col) = match err.line_col {
                pest::error::LineColLocation::Pos(pos) => pos,
                pest::error::LineColLocation::Span(start, _) => start,
            };
            format!(
                "line {}:{} expected {}, found {}",
                line,
                col,
                format_expected_rules(positives),
                describe_found(source, span.0.start)
            )
        }
        ErrorVariant::CustomError { message } => message.clone(),
    };

    SyntaxDiagnostic::new(span, message)
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    // Group related rules into higher-level concepts
    let mut concepts: Vec<&str> = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::number | Rule::string | Rule::boolean => "literal",
            Rule::dimension_item
            | Rule::constant
            | Rule::org_unit_count
            | Rule::reporting_rate
            | Rule::days => "item",
            Rule::ident | Rule::call => "function",
            Rule::or
            | Rule::and
            | Rule::eq
            | Rule::ne
            | Rule::le
            | Rule::ge
            | Rule::lt
            | Rule::gt
            | Rule::add
            | Rule::sub
            | Rule::mul
            | Rule::div
            | Rule::modulo
            | Rule::pow => "operator",
            Rule::method_op => "method call",
            Rule::EOI => "end of input",
            _ => "expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        None => "something else".to_string(),
        Some((only, [])) => only.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

fn describe_found(source: &str, pos: usize) -> String {
    match source.get(pos..).and_then(|rest| rest.chars().next()) {
        Some(ch) => format!("'{}'", ch),
        None => "end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_expected_rules() {
        assert_eq!(format_expected_rules(&[Rule::number, Rule::string]), "literal");
        assert_eq!(
            format_expected_rules(&[Rule::number, Rule::dimension_item, Rule::EOI]),
            "literal, item or end of input"
        );
        assert_eq!(format_expected_rules(&[]), "something else");
    }

    #[test]
    fn test_describe_found() {
        assert_eq!(describe_found("1 ~", 2), "'~'");
        assert_eq!(describe_found("1 *", 3), "end of input");
    }

    #[test]
    fn test_custom_error_keeps_message() {
        let err = pest::error::Error::<Rule>::new_from_pos(
            pest::error::ErrorVariant::CustomError {
                message: "unknown function 'foo'".to_string(),
            },
            pest::Position::from_start("foo(1)"),
        );
        let diagnostic = convert_pest_error(&err, "foo(1)");
        assert_eq!(diagnostic.message, "unknown function 'foo'");
        assert_eq!(diagnostic.span, Span(0..0));
    }
}
