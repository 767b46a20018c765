use std::borrow::Cow;

use pbs_data::{Field, Record, sorted_by_order};

use super::{SEPARATOR, check_collection, push_field, push_line, start_file};
use crate::FormatError;
use crate::schema::Schema;

/// Write generic records in `schema`'s canonical key order.
///
/// Blank values are skipped. Keys the schema does not list follow the
/// canonical ones in their stored order; duplicate keys are all written.
pub fn write_records(schema: Schema, records: &[Record]) -> Result<String, FormatError> {
    check_collection("record", records)?;
    let mut out = start_file();
    for rec in sorted_by_order(records) {
        let fields = apply_schema_rules(schema, rec);
        push_line(&mut out, &format!("[{}]", rec.id));
        for field in canonical_order(schema.canonical_keys(), &fields) {
            let value = field.value.trim();
            if !value.is_empty() {
                push_field(&mut out, "", &field.key, value);
            }
        }
        push_line(&mut out, SEPARATOR);
    }
    Ok(out)
}

/// Schema-specific adjustments made on the way out.
fn apply_schema_rules(schema: Schema, rec: &Record) -> Cow<'_, [Field]> {
    match schema {
        Schema::Moves => Cow::Owned(move_fields(rec)),
        _ => Cow::Borrowed(&rec.fields),
    }
}

/// Status moves carry no power, and every move names a target.
fn move_fields(rec: &Record) -> Vec<Field> {
    let is_status = rec.get("Category").is_some_and(|c| c.trim().eq_ignore_ascii_case("Status"));
    let mut fields: Vec<Field> = rec
        .fields
        .iter()
        .filter(|f| !(is_status && f.key == "Power"))
        .cloned()
        .collect();
    let has_target = fields.iter().any(|f| f.key == "Target" && !f.value.trim().is_empty());
    if !has_target {
        fields.retain(|f| f.key != "Target");
        fields.push(Field::new("Target", "None"));
    }
    fields
}

/// Fields grouped by canonical key, then everything else in stored order.
pub(crate) fn canonical_order<'a>(canonical: &[&str], fields: &'a [Field]) -> Vec<&'a Field> {
    let mut out: Vec<&Field> = Vec::with_capacity(fields.len());
    for key in canonical {
        out.extend(fields.iter().filter(|f| f.key == *key));
    }
    out.extend(fields.iter().filter(|f| !canonical.contains(&f.key.as_str())));
    out
}
