//! `/api/v2/pokemon` scenarios.
//!
//! Cubone (#104) is the fixture for both lookups; by name and by id must
//! return the same body.

use pokecheck_domain::{Expectation, ResourceGroup, Scenario, Suite};

use super::{DEFAULT_PAGE_SIZE, list_page, not_found};

const LIST: &str = "/api/v2/pokemon";
const BY_NAME: &str = "/api/v2/pokemon/:name";
const BY_ID: &str = "/api/v2/pokemon/:id";

const CUBONE_ID: u32 = 104;
const CUBONE_NAME: &str = "cubone";
const CUBONE_WEIGHT: u32 = 65;
const CUBONE_HEIGHT: u32 = 4;

/// Pokemon list, lookup-by-name and lookup-by-id scenarios.
#[must_use]
pub fn suite() -> Suite {
    Suite::new("pokemon")
        .group(list())
        .group(by_name())
        .group(by_id())
}

fn list() -> ResourceGroup {
    ResourceGroup::new(format!("GET {LIST}"))
        .case(
            "No 'limit' Query Parameter Provided",
            list_page(LIST, DEFAULT_PAGE_SIZE, "bulbasaur"),
        )
        .case(
            "'limit' Query Parameter Provided",
            list_page(LIST, 9, "bulbasaur")
                .query("limit", 9)
                .expect(Expectation::element_field_equals(
                    "results",
                    8,
                    "name",
                    "blastoise",
                )),
        )
        .case(
            "'limit' Query Parameter Provided as 0",
            list_page(LIST, DEFAULT_PAGE_SIZE, "bulbasaur")
                .query("limit", 0)
                .expect(Expectation::element_field_equals(
                    "results",
                    8,
                    "name",
                    "blastoise",
                )),
        )
}

/// Expectations shared by every successful Cubone lookup.
fn cubone(scenario: Scenario) -> Scenario {
    scenario
        .expect(Expectation::status(200))
        .expect(Expectation::field_equals("name", CUBONE_NAME))
        .expect(Expectation::field_equals("id", CUBONE_ID))
        .expect(Expectation::field_equals("weight", CUBONE_WEIGHT))
        .expect(Expectation::field_equals("height", CUBONE_HEIGHT))
        .expect(Expectation::field_present("moves"))
        .expect(Expectation::field_non_empty("moves"))
}

fn by_name() -> ResourceGroup {
    ResourceGroup::new(format!("GET {BY_NAME}"))
        .case(
            "Valid Pokemon name",
            cubone(Scenario::get(BY_NAME).bind("name", CUBONE_NAME)),
        )
        .case("Invalid Pokemon name", not_found(BY_NAME, "name", "cheese"))
        .case(
            "Valid Pokemon name using Camel Case",
            not_found(BY_NAME, "name", "Cubone"),
        )
        .case(
            "Valid Pokemon name using French version",
            not_found(BY_NAME, "name", "osselait"),
        )
}

fn by_id() -> ResourceGroup {
    ResourceGroup::new(format!("GET {BY_ID}"))
        .case(
            "Valid Pokemon ID",
            cubone(Scenario::get(BY_ID).bind("id", CUBONE_ID)),
        )
        .case("Invalid Pokemon ID", not_found(BY_ID, "id", 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookups_share_expectations() {
        let by_name = by_name();
        let by_id = by_id();
        assert_eq!(
            by_name.cases[0].scenario.expectations,
            by_id.cases[0].scenario.expectations
        );
    }

    #[test]
    fn test_lookup_paths() {
        assert_eq!(
            by_name().cases[0].scenario.path.to_string(),
            "/api/v2/pokemon/cubone"
        );
        assert_eq!(
            by_id().cases[0].scenario.path.to_string(),
            "/api/v2/pokemon/104"
        );
        assert_eq!(
            by_name().cases[2].scenario.path.to_string(),
            "/api/v2/pokemon/Cubone"
        );
    }
}
