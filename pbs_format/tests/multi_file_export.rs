use pbs_data::{Record, RecordSet, move_record};
use pbs_format::{FormatError, Schema, SourceFile, export_record_set, merge_sources};

fn sources() -> Vec<SourceFile> {
    vec![
        SourceFile {
            name: "abilities.txt".into(),
            text: "[STENCH]\nName = Stench\n[DRIZZLE]\nName = Drizzle\n".into(),
        },
        SourceFile {
            name: "abilities_custom.txt".into(),
            text: "[GOODLUCK]\nName = Good Luck\n".into(),
        },
        SourceFile {
            name: "pokemon_forms.txt".into(),
            text: "[PIKACHU,1]\n".into(),
        },
    ]
}

#[test]
fn export_writes_one_file_per_source_with_dense_order() {
    let RecordSet::Generic(mut records) = merge_sources(Schema::Abilities, &sources()) else {
        panic!("abilities are generic records");
    };
    assert_eq!(records.len(), 3);

    // Move DRIZZLE to the top of its own file; the continuation is untouched.
    assert!(move_record(&mut records, 1, 0));
    let mut added = Record::new("SPEEDBOOST").with_field("Name", "Speed Boost");
    added.order = 2;
    records.push(added);

    let files = export_record_set(Schema::Abilities, &RecordSet::Generic(records), None).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["abilities.txt", "abilities_custom.txt"]);

    let primary = &files[0].contents;
    assert!(primary.starts_with('\u{feff}'));
    assert!(!primary.replace("\r\n", "").contains('\n'));
    let headers: Vec<_> = primary.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(headers, vec!["[DRIZZLE]", "[STENCH]", "[SPEEDBOOST]"]);
    assert!(files[1].contents.contains("[GOODLUCK]\r\nName = Good Luck\r\n"));
}

#[test]
fn duplicate_ids_across_files_block_the_whole_export() {
    let mut srcs = sources();
    srcs[1].text = "[STENCH]\nName = Other Stench\n".into();
    let set = merge_sources(Schema::Abilities, &srcs);
    let err = export_record_set(Schema::Abilities, &set, None).unwrap_err();
    assert!(matches!(err, FormatError::DuplicateIdentity { ref key, .. } if key == "STENCH"));
}
