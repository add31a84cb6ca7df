//! Edge case tests for fmlc-lex.


#[cfg(test)]
mod properties {
    use crate::tokenize;
    use fmlc_util::Handler;
    use proptest::prelude::*;

    proptest! {
        /// Lexing arbitrary bytes never panics and never produces a span
        /// outside the input.
        #[test]
        fn prop_spans_stay_in_bounds(input in proptest::collection::vec(any::<u8>(), 0..256)) {
            let mut handler = Handler::new();
            let tokens = tokenize(&input, &mut handler);
            for token in &tokens {
                prop_assert!(token.span.start <= token.span.end);
                prop_assert!(token.span.end <= input.len());
            }
        }

        /// Identifier-shaped input always lexes back to the same text.
        #[test]
        fn prop_identifiers_roundtrip(name in "[a-zA-Z_][a-zA-Z0-9_-]{0,24}") {
            let mut handler = Handler::new();
            let source = format!("{};", name);
            let tokens = tokenize(source.as_bytes(), &mut handler);
            prop_assert!(!handler.has_errors());
            match &tokens[0].kind {
                crate::TokenKind::Identifier(text) => prop_assert_eq!(*text, name.as_str()),
                other => prop_assert!(false, "expected identifier, got {:?}", other),
            }
        }

        /// Decimal integers in range always lex to their own value.
        #[test]
        fn prop_decimal_integers(value in any::<i64>()) {
            let mut handler = Handler::new();
            let source = value.to_string();
            let tokens = tokenize(source.as_bytes(), &mut handler);
            prop_assert!(!handler.has_errors());
            prop_assert_eq!(&tokens[0].kind, &crate::TokenKind::Integer(value));
        }
    }
}
