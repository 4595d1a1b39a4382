use cellcheck_common::{A1ParseError, CellReference, parse_cell_reference};
use proptest::prelude::*;

proptest! {
    #[test]
    fn single_letter_refs_roundtrip(letter in "[A-Za-z]", row in 1u32..=1_048_576) {
        let text = format!("{letter}{row}");
        let parsed = parse_cell_reference(&text).unwrap();

        prop_assert_eq!(parsed.original(), text.as_str());
        prop_assert_eq!(parsed.row(), row as i64 - 1);
        prop_assert_eq!(parsed.to_a1(), text.to_ascii_uppercase());

        let reparsed = parse_cell_reference(&parsed.to_a1()).unwrap();
        prop_assert_eq!(reparsed.column(), parsed.column());
        prop_assert_eq!(reparsed.row(), parsed.row());
    }

    #[test]
    fn digits_first_never_parses(row in 0u32..100_000, letters in "[A-Za-z]{1,3}") {
        let text = format!("{row}{letters}");
        prop_assert_eq!(parse_cell_reference(&text), Err(A1ParseError::invalid(text.clone())));
    }
}

#[test]
fn empty_and_digit_first_inputs_fail() {
    assert!(matches!(
        "".parse::<CellReference>(),
        Err(A1ParseError::InvalidReference(t)) if t.is_empty()
    ));
    assert!(matches!(
        CellReference::parse("1A"),
        Err(A1ParseError::InvalidReference(t)) if t == "1A"
    ));
}
