//! `/api/v2/ability` scenarios.

use pokecheck_domain::{Expectation, ResourceGroup, Scenario, Suite};

use super::{DEFAULT_PAGE_SIZE, list_page, not_found};

const LIST: &str = "/api/v2/ability";
const BY_NAME: &str = "/api/v2/ability/:name";

/// Ability list and lookup-by-name scenarios.
#[must_use]
pub fn suite() -> Suite {
    Suite::new("ability").group(list()).group(by_name())
}

fn list() -> ResourceGroup {
    ResourceGroup::new(format!("GET {LIST}"))
        .case(
            "No 'limit' Query Parameter Provided",
            list_page(LIST, DEFAULT_PAGE_SIZE, "stench"),
        )
        .case(
            "'limit' Query Parameter Provided",
            list_page(LIST, 9, "stench")
                .query("limit", 9)
                .expect(Expectation::element_field_equals(
                    "results", 8, "name", "static",
                )),
        )
        // The API treats limit=0 like an absent limit.
        .case(
            "'limit' Query Parameter Provided as 0",
            list_page(LIST, DEFAULT_PAGE_SIZE, "stench")
                .query("limit", 0)
                .expect(Expectation::element_field_equals(
                    "results",
                    19,
                    "name",
                    "own-tempo",
                )),
        )
}

fn by_name() -> ResourceGroup {
    ResourceGroup::new(format!("GET {BY_NAME}"))
        .case(
            "Valid Ability name",
            Scenario::get(BY_NAME)
                .bind("name", "flame-body")
                .expect(Expectation::status(200))
                .expect(Expectation::field_equals("name", "flame-body"))
                .expect(Expectation::field_equals("id", 49)),
        )
        .case("Invalid Ability name", not_found(BY_NAME, "name", "cheese"))
        .case(
            "Valid Ability name using Camel Case",
            not_found(BY_NAME, "name", "flameBody"),
        )
        .case(
            "Valid Ability name using French version",
            not_found(BY_NAME, "name", "corps-de-flamme"),
        )
}
