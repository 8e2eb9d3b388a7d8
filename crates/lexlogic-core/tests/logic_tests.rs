use lexlogic_core::logic::{
    body_tokens, dynamic_declarations, mask_variables, parse_clause, parse_program,
    predicate_name, split_clause, split_literals, Body, LogicError, Term,
};
use lexlogic_core::models::Atom;

const PROGRAM: &str = r#"
% Article 12: record keeping
covered_operator(P) :- operator(P), operates(P, S), high_risk_system(S).
compliant(P) :- covered_operator(P), log_retention_months(S, M), M >= 6.
compliant(P) :- exempt(P).
violation(P) :- covered_operator(P), \+ compliant(P).
"#;

#[test]
fn test_program_indicators() {
    let clauses = parse_program(PROGRAM).unwrap();
    let heads: Vec<String> = clauses
        .iter()
        .filter_map(|c| c.head.indicator())
        .collect();
    assert_eq!(
        heads,
        vec!["covered_operator/1", "compliant/1", "compliant/1", "violation/1"]
    );
}

#[test]
fn test_parsed_and_lexical_references_agree_on_plain_rules() {
    let definition = "covered_operator(P) :- operator(P), operates(P, S), high_risk_system(S).";
    let clause = parse_clause(definition).unwrap();
    assert_eq!(
        clause.referenced_predicates(),
        vec!["operator", "operates", "high_risk_system"]
    );
    assert_eq!(
        body_tokens(definition),
        vec!["operator", "operates", "high_risk_system"]
    );
}

#[test]
fn test_negated_goal_structure() {
    let clause = parse_clause("violation(P) :- covered_operator(P), \\+ compliant(P).").unwrap();
    match clause.body {
        Some(Body::And(parts)) => {
            assert_eq!(parts.len(), 2);
            assert_eq!(
                parts[1],
                Body::Not(Box::new(Body::Goal(Term::compound(
                    "compliant",
                    vec![Term::var("P")]
                ))))
            );
        }
        other => panic!("unexpected body: {:?}", other),
    }
}

#[test]
fn test_round_trip_display() {
    for source in PROGRAM.lines().filter(|l| l.contains(":-")) {
        let clause = parse_clause(source).unwrap();
        let reparsed = parse_clause(&clause.to_string()).unwrap();
        assert_eq!(clause, reparsed);
    }
}

#[test]
fn test_error_offsets() {
    match parse_clause("p(X) :- q(X), .") {
        Err(LogicError::Parse { offset, .. }) => assert_eq!(offset, 14),
        other => panic!("unexpected: {:?}", other),
    }
    match parse_clause("p(X) :- q(X) # r.") {
        Err(LogicError::Lex { offset, found }) => {
            assert_eq!(offset, 13);
            assert_eq!(found, "#");
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_heuristics_on_generated_rule() {
    let definition = "compliant(P) :- covered_operator(P), log_retention_months(S, M); exempt(P).";
    assert_eq!(predicate_name(definition), "compliant");

    let (head, tail) = split_clause(definition).unwrap();
    assert_eq!(head, "compliant(P)");

    let literals = split_literals(tail);
    let texts: Vec<&str> = literals.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["covered_operator(P)", "log_retention_months(S, M)", "exempt(P)"]
    );
    assert_eq!(
        literals.iter().map(|l| l.separator).collect::<Vec<_>>(),
        vec![Some(','), Some(';'), None]
    );
}

#[test]
fn test_declarations_and_masks_for_atoms() {
    let atoms = vec![
        Atom {
            id: 1,
            regulation_fragment_id: 1,
            predicate: "operates(P, S)".into(),
            description: String::new(),
            is_negated: false,
            is_fact: true,
            spans: Vec::new(),
        },
        Atom {
            id: 2,
            regulation_fragment_id: 1,
            predicate: "compliant(P)".into(),
            description: String::new(),
            is_negated: false,
            is_fact: false,
            spans: Vec::new(),
        },
    ];

    assert_eq!(
        dynamic_declarations(&atoms).unwrap(),
        ":- dynamic operates/2. % operates(P, S)\n\
         %:- dynamic compliant/1. % compliant(P); This is a derived predicate, not a fact."
    );

    let predicates: Vec<&str> = atoms.iter().map(|a| a.predicate.as_str()).collect();
    assert_eq!(
        mask_variables(&predicates).unwrap(),
        vec!["operates(_X1, _X2).", "compliant(_X3)."]
    );
}
