use pbs_data::{Record, sorted_by_order};

use super::{SEPARATOR, check_collection, push_field, push_line, start_file};
use crate::FormatError;
use crate::forms::{
    FORM_KEYS, FormKey, SpeciesIndex, differs_from_baseline, duplicate_form_keys, is_forbidden_key, is_form_key,
    is_inherited_key, overridden_keys,
};

/// Write form records, keeping only what differs from the base species.
///
/// Inherited keys are written when they (or a key in their override group)
/// differ from the species baseline, even if the override is blank. Own-only
/// keys are written when non-blank. Forbidden keys are never written. A
/// repeated allow-listed key is written once, with its first value.
pub fn write_forms(forms: &[Record], species: &SpeciesIndex<'_>) -> Result<String, FormatError> {
    check_collection("form", forms)?;
    let mut out = start_file();
    for form in sorted_by_order(forms) {
        duplicate_form_keys(form);
        let overrides = overridden_keys(form, species);
        let species_id = FormKey::parse(&form.id).species;
        push_line(&mut out, &format!("[{}]", form.id));
        for key in FORM_KEYS {
            let Some(value) = form.get(key).map(str::trim) else {
                // Grouped keys missing from the record still pin the baseline.
                if overrides.contains(key) {
                    let baseline = species.baseline(&species_id, key);
                    if !baseline.is_empty() {
                        push_field(&mut out, "", key, &baseline);
                    }
                }
                continue;
            };
            let emit = if is_inherited_key(key) {
                overrides.contains(key) && (!value.is_empty() || differs_from_baseline(form, &species_id, key, species))
            } else {
                !value.is_empty()
            };
            if emit {
                push_field(&mut out, "", key, value);
            }
        }
        for field in form.fields.iter().filter(|f| !is_form_key(&f.key) && !is_forbidden_key(&f.key)) {
            let value = field.value.trim();
            if !value.is_empty() {
                push_field(&mut out, "", &field.key, value);
            }
        }
        push_line(&mut out, SEPARATOR);
    }
    Ok(out)
}
