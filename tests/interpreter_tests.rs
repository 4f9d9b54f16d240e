//! End-to-end interpreter tests: Lexer → Parser → Evaluator
//!
//! Expected values are compared through the canonical rendering, which is
//! the stable textual form for every value kind.

use squirrel::{default_environment, interpret, Error, Node, Result};

fn eval(source: &str) -> Result<Node> {
    interpret(source, &default_environment())
}

fn eval_to_string(source: &str) -> String {
    match eval(source) {
        Ok(value) => value.to_string(),
        Err(err) => panic!("{} failed to evaluate: {}", source, err),
    }
}

#[test]
fn test_literals_self_evaluate() {
    let cases = [
        ("1", "1"),
        ("-1", "-1"),
        ("0.1", "0.1"),
        ("-0.1", "-0.1"),
        ("true", "true"),
        ("false", "false"),
        ("\"hi\"", "\"hi\""),
    ];
    for (input, expected) in cases {
        assert_eq!(eval_to_string(input), expected, "input: {}", input);
    }
}

#[test]
fn test_arithmetic() {
    let cases = [
        ("(add 1 2)", "3"),
        ("(sub 3 2)", "1"),
        ("(mul 2 3)", "6"),
        ("(div 6 3)", "2"),
        ("(mod 7 3)", "1"),
        ("(pow 2 3)", "8"),
        ("(add (add 1 2) 3)", "6"),
    ];
    for (input, expected) in cases {
        assert_eq!(eval_to_string(input), expected, "input: {}", input);
    }
}

#[test]
fn test_comparisons_return_booleans() {
    let cases = [
        ("(eq 0 1)", "false"),
        ("(eq 1 1)", "true"),
        ("(neq 0 1)", "true"),
        ("(neq 1 1)", "false"),
        ("(lt 0 1)", "true"),
        ("(lt 1 0)", "false"),
        ("(lt 1 1)", "false"),
        ("(lte 0 1)", "true"),
        ("(lte 1 0)", "false"),
        ("(lte 1 1)", "true"),
        ("(gt 0 1)", "false"),
        ("(gt 1 0)", "true"),
        ("(gt 1 1)", "false"),
        ("(gte 0 1)", "false"),
        ("(gte 1 0)", "true"),
        ("(gte 1 1)", "true"),
    ];
    for (input, expected) in cases {
        assert_eq!(eval_to_string(input), expected, "input: {}", input);
    }
}

#[test]
fn test_quote() {
    let cases = [
        ("'1", "1"),
        ("'-1", "-1"),
        ("'foo", "foo"),
        ("'foo-bar", "foo-bar"),
        ("'fooBar", "fooBar"),
        ("'(add 1 2)", "(add 1 2)"),
        ("'(add (add 1 2) 3)", "(add (add 1 2) 3)"),
        ("(quote foo)", "foo"),
        ("(quote (add 1 2))", "(add 1 2)"),
    ];
    for (input, expected) in cases {
        assert_eq!(eval_to_string(input), expected, "input: {}", input);
    }
}

#[test]
fn test_vectors_and_dictionaries() {
    let cases = [
        ("[]", "[]"),
        ("[1 2 3]", "[1 2 3]"),
        ("[(add (add 1 2) 3)]", "[6]"),
        ("{}", "{}"),
        (
            "{\"name\" \"John Smith\" \"age\" 42}",
            "{\"name\" \"John Smith\" \"age\" 42}",
        ),
        ("{\"n\" (add 1 2)}", "{\"n\" 3}"),
    ];
    for (input, expected) in cases {
        assert_eq!(eval_to_string(input), expected, "input: {}", input);
    }
}

#[test]
fn test_definitions_and_scoping() {
    let cases = [
        ("(def pi 3.14)", "3.14"),
        ("(do (def pi 3.14) pi)", "3.14"),
        ("(do (def pi 3.14) (do pi))", "3.14"),
        ("(do (def pi 3.14) (def pi 3.142) pi)", "3.142"),
        ("(do (def pi 3.14) (set pi 3.142) pi)", "3.142"),
        // set reaches through nested do (same environment)
        ("(do (def pi 3.14) (do (set pi 3.142)) pi)", "3.142"),
    ];
    for (input, expected) in cases {
        assert_eq!(eval_to_string(input), expected, "input: {}", input);
    }
}

#[test]
fn test_do_sequences() {
    assert_eq!(eval_to_string("(do (add 1 2) (add 2 3))"), "5");
    assert_eq!(eval_to_string("((do add) 1 2)"), "3");
}

#[test]
fn test_lambdas_and_closures() {
    let cases = [
        ("((lambda (x y) (add x y)) 1 2)", "3"),
        ("(do (def x 1) ((lambda (y) (add x y)) 2))", "3"),
        ("(do (def x 1) (def y 2) ((lambda () (add x y))))", "3"),
        ("(do (def x 1) ((lambda (x y) (add x y)) 2 2))", "4"),
        ("(do (def square (lambda (x) (mul x x))) (square 3))", "9"),
    ];
    for (input, expected) in cases {
        assert_eq!(eval_to_string(input), expected, "input: {}", input);
    }
}

#[test]
fn test_recursion() {
    let source = "(do \
        (def factorial (lambda (x) \
            (if (eq x 0) 1 (mul x (factorial (sub x 1)))))) \
        (factorial 4))";
    assert_eq!(eval_to_string(source), "24");
}

#[test]
fn test_call_environment_outlives_the_call_when_captured() {
    // The counter's scope is created by the make-counter call and kept
    // alive by the returned closure
    let source = "(do \
        (def make-counter (lambda () (do \
            (def n 0) \
            (lambda () (set n (add n 1)))))) \
        (def tick (make-counter)) \
        (tick) \
        (tick))";
    assert_eq!(eval_to_string(source), "2");
}

#[test]
fn test_collection_builtins() {
    let cases = [
        ("(length [])", "0"),
        ("(length [1 2 3])", "3"),
        ("(length \"\")", "0"),
        ("(length \"hi\")", "2"),
        ("(length '(a b c))", "3"),
        ("(nth [1 2 3] 0)", "1"),
        ("(nth [1 2 3] 1)", "2"),
        ("(nth [1 2 3] 2)", "3"),
        ("(nth \"hi\" 0)", "\"h\""),
        ("(nth \"hi\" 1)", "\"i\""),
        ("(slice [1 2 3 4] 1 3)", "[2 3]"),
        ("(slice \"hello\" 1 3)", "\"el\""),
        ("(join [1] [2 3])", "[1 2 3]"),
        ("(concat \"a\" \"b\" \"c\")", "\"abc\""),
        ("(list 1 2 3)", "(1 2 3)"),
    ];
    for (input, expected) in cases {
        assert_eq!(eval_to_string(input), expected, "input: {}", input);
    }
}

#[test]
fn test_conversions_and_print() {
    assert_eq!(eval_to_string("(parse-integer \"3\")"), "3");
    assert_eq!(eval_to_string("(parse-float \"3.14\")"), "3.14");
    // print returns its argument unchanged
    assert_eq!(eval_to_string("(print \"hi\")"), "\"hi\"");
    assert_eq!(eval_to_string("(print [1 2])"), "[1 2]");
}

#[test]
fn test_round_trip_through_canonical_rendering() {
    let rendered = eval_to_string("'(add 1 2)");
    assert_eq!(rendered, "(add 1 2)");

    // The canonical form parses back to a value with the same rendering
    assert_eq!(eval_to_string("'(add 1 2)"), eval_to_string("'(add 1 2)"));
    let reparsed = eval(&format!("'{}", rendered)).unwrap();
    assert_eq!(reparsed.to_string(), rendered);
}

#[test]
fn test_lex_rejections() {
    for input in [".1", "1.", "-foo", "foo-", "\"unterminated"] {
        assert!(
            matches!(eval(input), Err(Error::LexError { .. })),
            "{} should be a lex error",
            input
        );
    }
}

#[test]
fn test_parse_rejections() {
    for input in [
        "()",
        "foo bar",
        "(add 1 2) foo",
        "foo (add 1 2)",
        "(",
        ")",
        "(add 1",
        "",
    ] {
        assert!(
            matches!(eval(input), Err(Error::ParseError(_))),
            "{:?} should be a parse error",
            input
        );
    }
}

#[test]
fn test_type_rejections() {
    for input in [
        "(if 1 true false)",
        "(def \"pi\" 3.14)",
        "(do (def pi 3.14) (set \"pi\" 3.142))",
        "(lambda \"x\" x)",
        "(lambda (\"x\") x)",
        "(1)",
    ] {
        assert!(
            matches!(eval(input), Err(Error::TypeError { .. })),
            "{} should be a type error",
            input
        );
    }
}

#[test]
fn test_unbound_symbol_rejections() {
    for input in ["foo", "(foo)", "(set pi 3.14)"] {
        assert!(
            matches!(eval(input), Err(Error::UnboundSymbol { .. })),
            "{} should be an unbound-symbol error",
            input
        );
    }
}

#[test]
fn test_argument_rejections() {
    for input in [
        "(add 1)",
        "(add 1 2 3)",
        "(add 1 \"2\")",
        "(nth [1 2 3] 3)",
        "(nth [1 2 3] -1)",
        "(join [1] \"a\")",
        "(do)",
        "((lambda (x) x) 1 2)",
    ] {
        assert!(
            matches!(eval(input), Err(Error::ArgumentError { .. })),
            "{} should be an argument error",
            input
        );
    }
}

#[test]
fn test_format_rejections() {
    for input in ["(parse-integer \"abc\")", "(parse-float \"abc\")"] {
        assert!(
            matches!(eval(input), Err(Error::FormatError { .. })),
            "{} should be a format error",
            input
        );
    }
}

#[test]
fn test_dictionary_rejections() {
    assert!(matches!(
        eval("{name \"John Smith\"}"),
        Err(Error::DictionaryKey { .. })
    ));
    assert!(matches!(
        eval("{\"name\"}"),
        Err(Error::DictionaryArity { .. })
    ));
}

#[test]
fn test_runaway_recursion_is_stack_exhausted() {
    let err = eval("(do (def spin (lambda (x) (spin x))) (spin 1))").unwrap_err();
    assert!(matches!(err, Error::StackExhausted { .. }));
}
