use log::trace;
use pbs_data::{Field, Record};

use super::lines::{content_lines, section_header, split_key_value};

/// Parse bracketed sections of `key = value` lines into records.
///
/// Lines before the first header and lines without `=` are dropped. Each
/// record's `order` is its position in this source.
pub fn parse_records(source: &str) -> Vec<Record> {
    let mut out: Vec<Record> = Vec::new();
    let mut current: Option<Record> = None;

    for line in content_lines(source) {
        if let Some(id) = section_header(line.text) {
            if let Some(done) = current.take() {
                out.push(done);
            }
            current = Some(Record {
                id: id.to_string(),
                order: out.len(),
                source_file: None,
                fields: Vec::new(),
            });
            continue;
        }
        let Some(rec) = current.as_mut() else {
            trace!("line {}: dropped, no section open", line.number);
            continue;
        };
        match split_key_value(line.text) {
            Some((key, value)) => rec.fields.push(Field::new(key, value)),
            None => trace!("line {}: dropped, no '=' in {:?}", line.number, line.text),
        }
    }
    if let Some(done) = current {
        out.push(done);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_in_order() {
        let src = "\
# See the documentation on the wiki to learn how to edit this file.
#-------------------------------
[NORMAL]
Name = Normal
IconPosition = 0
#-------------------------------
[FIGHTING]
Name = Fighting
Weaknesses = FLYING,PSYCHIC,FAIRY
";
        let records = parse_records(src);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "NORMAL");
        assert_eq!(records[0].order, 0);
        assert_eq!(records[1].order, 1);
        assert_eq!(records[1].get("Weaknesses"), Some("FLYING,PSYCHIC,FAIRY"));
    }

    #[test]
    fn drops_orphans_and_lines_without_equals() {
        let src = "Orphan = 1\n[A]\njunk line\nKey=Value\n[B\nOther = 2\n";
        let records = parse_records(src);
        assert_eq!(records.len(), 1);
        // "[B" is not a header, so it is just another line without '='.
        assert_eq!(records[0].fields, vec![Field::new("Key", "Value"), Field::new("Other", "2")]);
    }

    #[test]
    fn keeps_duplicate_keys_and_inline_hashes() {
        let src = "[A]\nFlags = X\nDescription = Hits #1 target\nFlags = Y\n";
        let rec = &parse_records(src)[0];
        assert_eq!(rec.get_all("Flags").collect::<Vec<_>>(), vec!["X", "Y"]);
        assert_eq!(rec.get("Description"), Some("Hits #1 target"));
    }

    #[test]
    fn empty_section_still_creates_record() {
        let records = parse_records("[A]\n[B]\nName = b\n");
        assert_eq!(records.len(), 2);
        assert!(records[0].fields.is_empty());
    }
}
