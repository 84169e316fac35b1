//! Natural-language rendering of the active filter selections.

use std::collections::BTreeMap;

use common::filters::{FACET_DEFINITIONS, FacetKind, FilterSelections};

const CLAUSE_SEPARATOR: &str = " and ";

/// Render the active selections as one sentence, in facet definition
/// order. `labels` maps a facet name to the already-resolved display
/// labels of its selected values (diagnosis labels arrive pre-formatted
/// as `[ CODE ] - Label`); the free-text facet renders its raw text.
pub fn human_readable(
    selections: &FilterSelections,
    labels: &BTreeMap<String, Vec<String>>,
) -> String {
    let mut clauses = Vec::new();
    for fd in FACET_DEFINITIONS {
        if fd.kind == FacetKind::FreeText {
            if !selections.search.is_empty() {
                clauses.push(format!("{} {}", fd.human_readable, selections.search));
            }
            continue;
        }
        if selections.get(fd.name).is_empty() {
            continue;
        }
        let values = labels
            .get(fd.name)
            .map(|l| l.join(","))
            .unwrap_or_else(|| selections.get(fd.name).join(","));
        clauses.push(format!("{} {}", fd.human_readable, values));
    }
    clauses.join(CLAUSE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_search_and_materials_without_trailing_join() {
        let mut selections = FilterSelections::default();
        selections.set_search("Cell&Co");
        selections.set_facet("materials", vec!["CELL_LINES".into()]);
        let mut labels = BTreeMap::new();
        labels.insert("materials".to_string(), vec!["CELL_LINES".to_string()]);

        assert_eq!(
            human_readable(&selections, &labels),
            "Free text search contains Cell&Co and selected material types are CELL_LINES"
        );
    }

    #[test]
    fn empty_selections_render_as_the_empty_string() {
        let selections = FilterSelections::default();
        assert_eq!(human_readable(&selections, &BTreeMap::new()), "");
    }

    #[test]
    fn diagnosis_labels_render_preformatted() {
        let mut selections = FilterSelections::default();
        selections.set_facet("diagnosis_available", vec!["C22.3".into()]);
        let mut labels = BTreeMap::new();
        labels.insert(
            "diagnosis_available".to_string(),
            vec!["[ C22.3 ] - Angiosarcoma of liver".to_string()],
        );
        assert_eq!(
            human_readable(&selections, &labels),
            "selected disease types are [ C22.3 ] - Angiosarcoma of liver"
        );
    }

    #[test]
    fn missing_labels_fall_back_to_the_selected_ids() {
        let mut selections = FilterSelections::default();
        selections.set_facet("country", vec!["NL".into(), "BE".into()]);
        assert_eq!(
            human_readable(&selections, &BTreeMap::new()),
            "selected countries are NL,BE"
        );
    }
}
