use pbs_data::RecordSet;
use pbs_format::{Schema, parse_schema, write_record_set};

fn rewrite(schema: Schema, src: &str) -> String {
    let set = parse_schema(schema, src);
    write_record_set(schema, &set, None).expect("write ok")
}

#[test]
fn moves_normalize_to_canonical_layout() {
    let actual = rewrite(Schema::Moves, include_str!("fixtures/moves_input.txt"));
    assert_eq!(actual, include_str!("fixtures/moves_expected.txt"));
}

#[test]
fn moves_output_is_a_fixed_point() {
    let expected = include_str!("fixtures/moves_expected.txt");
    assert_eq!(rewrite(Schema::Moves, expected), expected);
}

#[test]
fn encounters_round_trip_unchanged() {
    let src = include_str!("fixtures/encounters.txt");
    let set = parse_schema(Schema::Encounters, src);
    let RecordSet::Encounters(entries) = &set else {
        panic!("encounters parse as encounter entries");
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].version, 1);
    let night = &entries[1].encounter_types[0].slots[1];
    assert_eq!((night.pokemon.as_str(), night.form_number.as_str()), ("RATTATA", "1"));
    assert_eq!(rewrite(Schema::Encounters, src), src);
}

#[test]
fn trainers_drop_defaults_and_expand_single_stats() {
    let actual = rewrite(Schema::Trainers, include_str!("fixtures/trainers_input.txt"));
    assert_eq!(actual, include_str!("fixtures/trainers_expected.txt"));
}

#[test]
fn trainers_output_is_a_fixed_point() {
    let expected = include_str!("fixtures/trainers_expected.txt");
    assert_eq!(rewrite(Schema::Trainers, expected), expected);
}

#[test]
fn crlf_and_bom_input_parses_the_same() {
    let lf = include_str!("fixtures/moves_expected.txt");
    let disk = pbs_format::encode_for_disk(lf);
    assert!(disk.starts_with('\u{feff}'));
    assert_eq!(rewrite(Schema::Moves, &disk), lf);
}
