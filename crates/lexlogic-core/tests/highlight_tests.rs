use lexlogic_core::highlight::{
    extract_spans, highlight, highlighted_text_for, reassemble, strip_annotations,
};
use lexlogic_core::models::{Atom, AtomSpan};
use lexlogic_core::{atom_color, Fragment, HighlightError, Highlighter, HoverState, OverlapPolicy};

fn atom(id: i64, spans: &[(usize, usize)]) -> Atom {
    Atom {
        id,
        regulation_fragment_id: 1,
        predicate: format!("p{}(X)", id),
        description: String::new(),
        is_negated: false,
        is_fact: true,
        spans: spans
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| AtomSpan {
                id: id * 100 + i as i64,
                atom_id: id,
                start,
                end,
            })
            .collect(),
    }
}

#[test]
fn test_cat_sat_example() {
    let fragments = highlight("A cat sat.", &[atom(42, &[(2, 5)])]).unwrap();

    assert_eq!(
        fragments,
        vec![
            Fragment::Plain { text: "A ".into() },
            Fragment::Highlighted {
                atom_id: 42,
                text: "cat".into(),
                color: atom_color(42),
            },
            Fragment::Plain { text: " sat.".into() },
        ]
    );
    assert_eq!(reassemble(&fragments), "A cat sat.");
}

#[test]
fn test_round_trip_for_disjoint_spans() {
    let text = "Operators of high-risk AI systems shall keep the logs for six months.";
    let cases: Vec<Vec<Atom>> = vec![
        vec![],
        vec![atom(1, &[(0, 9)])],
        vec![atom(1, &[(13, 32)]), atom(2, &[(39, 52)])],
        vec![atom(1, &[(58, 68)]), atom(2, &[(0, 9), (13, 22)])],
        vec![atom(3, &[(0, 69)])],
    ];

    for atoms in cases {
        let fragments = highlight(text, &atoms).unwrap();
        assert_eq!(reassemble(&fragments), text);
    }
}

#[test]
fn test_round_trip_with_multibyte_text() {
    // Offsets count characters, not bytes.
    let text = "Der Betreiber muss Protokolle für sechs Monate aufbewahren – immer.";
    let atoms = [atom(1, &[(4, 13)]), atom(2, &[(30, 33)]), atom(3, &[(59, 60)])];
    let fragments = highlight(text, &atoms).unwrap();

    assert_eq!(reassemble(&fragments), text);
    assert_eq!(highlighted_text_for(&fragments, 1), vec!["Betreiber"]);
    assert_eq!(highlighted_text_for(&fragments, 2), vec!["für"]);
    assert_eq!(highlighted_text_for(&fragments, 3), vec!["–"]);
}

#[test]
fn test_coverage_per_atom() {
    let text = "Birds fly. Penguins are birds. Penguins do not fly.";
    let atoms = [
        atom(1, &[(0, 5), (24, 29)]),
        atom(2, &[(11, 19), (31, 39)]),
    ];
    let fragments = highlight(text, &atoms).unwrap();

    assert_eq!(highlighted_text_for(&fragments, 1), vec!["Birds", "birds"]);
    assert_eq!(highlighted_text_for(&fragments, 2), vec!["Penguins", "Penguins"]);
}

#[test]
fn test_spans_sorted_across_atoms() {
    let text = "one two three";
    let atoms = [atom(2, &[(8, 13)]), atom(1, &[(0, 3)])];
    let fragments = highlight(text, &atoms).unwrap();
    let ids: Vec<_> = fragments.iter().filter_map(Fragment::atom_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_adjacent_spans_emit_no_empty_plain_text() {
    let fragments = highlight("abcdef", &[atom(1, &[(0, 3)]), atom(2, &[(3, 6)])]).unwrap();
    assert_eq!(fragments.len(), 2);
    assert!(fragments.iter().all(|f| f.atom_id().is_some()));
}

#[test]
fn test_overlap_rejected_by_default() {
    let err = highlight("abcdefgh", &[atom(1, &[(0, 4)]), atom(2, &[(2, 6)])]).unwrap_err();
    assert_eq!(
        err,
        HighlightError::Overlap {
            first_atom: 1,
            first: (0, 4),
            second_atom: 2,
            second: (2, 6),
        }
    );
}

#[test]
fn test_overlap_first_wins() {
    let highlighter = Highlighter::new(OverlapPolicy::FirstWins);
    let text = "abcdefgh";
    let fragments = highlighter
        .highlight(text, &[atom(1, &[(0, 4)]), atom(2, &[(2, 6), (6, 8)])])
        .unwrap();

    assert_eq!(reassemble(&fragments), text);
    assert_eq!(highlighted_text_for(&fragments, 1), vec!["abcd"]);
    assert_eq!(highlighted_text_for(&fragments, 2), vec!["gh"]);
}

#[test]
fn test_out_of_bounds_and_empty_spans() {
    assert!(matches!(
        highlight("short", &[atom(1, &[(2, 9)])]),
        Err(HighlightError::OutOfBounds { len: 5, .. })
    ));
    assert!(matches!(
        highlight("short", &[atom(1, &[(3, 3)])]),
        Err(HighlightError::EmptySpan { .. })
    ));
}

#[test]
fn test_background_follows_hover() {
    let hover = HoverState::new();
    let fragments = highlight("A cat sat.", &[atom(42, &[(2, 5)])]).unwrap();
    let color = atom_color(42);

    assert_eq!(fragments[0].background(&hover), None);
    assert_eq!(fragments[1].background(&hover), Some(color.base));

    hover.set(Some(42));
    assert_eq!(fragments[1].background(&hover), Some(color.hover));

    hover.clear();
    assert_eq!(fragments[1].background(&hover), Some(color.base));
}

#[test]
fn test_annotate_then_extract() {
    let text = "Penguins are birds.";
    let atoms = [atom(1, &[(13, 18)]), atom(2, &[(0, 8)])];
    let annotated = Highlighter::default().annotate(text, &atoms).unwrap();

    assert_eq!(
        annotated,
        r#"<atom id="2">Penguins</atom> are <atom id="1">birds</atom>."#
    );
    assert_eq!(strip_annotations(&annotated), text);

    let spans = extract_spans(&annotated).unwrap();
    let pairs: Vec<_> = spans.iter().map(|s| (s.atom_id, s.start, s.end)).collect();
    assert_eq!(pairs, vec![(2, 0, 8), (1, 13, 18)]);
}

#[test]
fn test_span_attributed_to_owning_atom() {
    let mut owner = atom(7, &[(2, 5)]);
    owner.spans[0].atom_id = 99;

    let fragments = highlight("A cat sat.", &[owner]).unwrap();
    assert_eq!(
        fragments[1],
        Fragment::Highlighted {
            atom_id: 7,
            text: "cat".into(),
            color: atom_color(7),
        }
    );
}
