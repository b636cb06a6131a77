//! The PokéAPI scenario registry.
//!
//! Resource groups are registered in the order they run: abilities first,
//! then pokemon. Fixture values are literals; nothing is read from a
//! previous response.

pub mod ability;
pub mod pokemon;

use pokecheck_domain::{Expectation, Scenario, Suite};

/// Suite name shown in logs and the report.
pub const SUITE_NAME: &str = "pokeapi";

/// Page size the API falls back to when `limit` is absent or `0`.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Builds the complete suite.
#[must_use]
pub fn pokeapi_suite() -> Suite {
    Suite::new(SUITE_NAME)
        .merge(ability::suite())
        .merge(pokemon::suite())
}

/// A named resource page: 200, a positive `count`, `len` results and the
/// expected first entry.
fn list_page(template: &str, len: usize, first: &str) -> Scenario {
    Scenario::get(template)
        .expect(Expectation::status(200))
        .expect(Expectation::field_at_least("count", 1))
        .expect(Expectation::array_length("results", len))
        .expect(Expectation::element_field_equals("results", 0, "name", first))
}

/// A lookup that must miss.
fn not_found(template: &str, placeholder: &str, value: impl ToString) -> Scenario {
    Scenario::get(template)
        .bind(placeholder, value)
        .expect(Expectation::status(404))
}
