// Compliance checklist: one entry per clause category
use shared_types::{Category, ChecklistEntry, ClauseMap};

/// Build the checklist, always one entry per category in `Category::ALL` order
pub fn build_checklist(clauses: &ClauseMap) -> Vec<ChecklistEntry> {
    Category::ALL
        .iter()
        .map(|category| {
            let matches = clauses.get(*category).to_vec();
            let notes = match matches.len() {
                0 => format!("No {} clause detected", category.label().to_lowercase()),
                1 => "Found in 1 sentence".to_string(),
                n => format!("Found in {} sentences", n),
            };
            ChecklistEntry {
                category: *category,
                addressed: !matches.is_empty(),
                matches,
                notes,
            }
        })
        .collect()
}
