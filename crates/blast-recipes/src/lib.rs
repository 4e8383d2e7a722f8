//! Built-in blast recipes.
//!
//! Each section of the tool is a declarative [`Recipe`] built once and kept in
//! a process-wide catalog. Callers look recipes up by id and hand them to
//! [`blast_transform::run`].
//!
//! ```
//! let recipe = blast_recipes::find("viber-blast").unwrap();
//! assert_eq!(recipe.title, "Viber Blast");
//! ```

pub mod sections;

use std::sync::LazyLock;

use blast_model::{BlastError, Result};
use blast_transform::Recipe;

static CATALOG: LazyLock<Vec<Recipe>> = LazyLock::new(|| {
    vec![
        sections::viber::recipe(),
        sections::email::bucket2(),
        sections::email::bucket4(),
        sections::email::level6(),
        sections::email::sbf_new_endo(),
        sections::sms::recipe(),
        sections::autostats::sbf_negative(),
        sections::autostats::l1_l6_negative(),
        sections::ptp::recipe(),
    ]
});

/// All recipes, in menu order.
pub fn catalog() -> &'static [Recipe] {
    &CATALOG
}

/// Looks a recipe up by id, ignoring ASCII case.
pub fn find(id: &str) -> Result<&'static Recipe> {
    let id = id.trim();
    CATALOG
        .iter()
        .find(|recipe| recipe.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| BlastError::UnknownRecipe(id.to_string()))
}
