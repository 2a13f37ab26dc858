//! Category → expert routing table.

use super::category::Category;
use super::expert::ExpertKind;

/// Select the expert that answers a turn of the given category.
///
/// Pure and total: every category maps to exactly one expert. Adding a
/// category means adding one arm here; the compiler rejects a missing one.
pub fn select_expert(category: Category) -> ExpertKind {
    match category {
        Category::General => ExpertKind::General,
        Category::Specialist => ExpertKind::Domain,
        Category::DataLookup => ExpertKind::DataLookup,
    }
}
