//! Scenario descriptors and the two-level suite registry.
//!
//! A [`Suite`] holds resource groups in declaration order; each
//! [`ResourceGroup`] holds case groups; each [`CaseGroup`] names exactly one
//! [`Scenario`]. Everything here is plain data built once before a run.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Expectation;
use crate::error::{DomainError, DomainResult};
use crate::field_path::FieldPath;
use crate::request::{QueryParams, ResourcePath};

/// One declarative GET request and the expectations checked against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Target path template and bindings.
    pub path: ResourcePath,
    /// Query parameters.
    #[serde(default)]
    pub query: QueryParams,
    /// Expectations in evaluation order.
    pub expectations: Vec<Expectation>,
}

impl Scenario {
    /// Creates a GET scenario for a path template.
    #[must_use]
    pub fn get(template: impl Into<String>) -> Self {
        Self {
            path: ResourcePath::new(template),
            query: QueryParams::new(),
            expectations: Vec::new(),
        }
    }

    /// Binds a path placeholder to a literal fixture value.
    #[must_use]
    pub fn bind(mut self, placeholder: impl Into<String>, value: impl ToString) -> Self {
        self.path = self.path.bind(placeholder, value);
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Appends an expectation.
    #[must_use]
    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Checks that the path resolves and every field path parses.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> DomainResult<()> {
        self.path.segments()?;
        for expectation in &self.expectations {
            for path in expectation.field_paths() {
                FieldPath::parse(path)?;
            }
        }
        Ok(())
    }
}

/// Identifies a scenario by its resource and case names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioId {
    /// Resource group name.
    pub resource: String,
    /// Case group name.
    pub case: String,
}

impl ScenarioId {
    /// Creates a scenario id.
    #[must_use]
    pub fn new(resource: impl Into<String>, case: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            case: case.into(),
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} › {}", self.resource, self.case)
    }
}

/// A named case with its scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseGroup {
    /// Case name, e.g. "Invalid Pokemon ID".
    pub name: String,
    /// The scenario for this case.
    pub scenario: Scenario,
}

/// Cases grouped under one API resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// Group name, e.g. "GET /api/v2/pokemon/:id".
    pub name: String,
    /// Cases in declaration order.
    #[serde(default)]
    pub cases: Vec<CaseGroup>,
}

impl ResourceGroup {
    /// Creates an empty resource group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Appends a case (builder pattern).
    #[must_use]
    pub fn case(mut self, name: impl Into<String>, scenario: Scenario) -> Self {
        self.cases.push(CaseGroup {
            name: name.into(),
            scenario,
        });
        self
    }
}

/// A borrowed view of one registered scenario with its id.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredScenario<'a> {
    /// Resource group name.
    pub resource: &'a str,
    /// Case group name.
    pub case: &'a str,
    /// The scenario.
    pub scenario: &'a Scenario,
}

impl RegisteredScenario<'_> {
    /// Returns the owned id of this scenario.
    #[must_use]
    pub fn id(&self) -> ScenarioId {
        ScenarioId::new(self.resource, self.case)
    }
}

/// The full registry of resource groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    /// Suite name.
    pub name: String,
    /// Resource groups in declaration order.
    #[serde(default)]
    pub groups: Vec<ResourceGroup>,
}

impl Suite {
    /// Creates an empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    /// Appends a resource group (builder pattern).
    #[must_use]
    pub fn group(mut self, group: ResourceGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Appends all groups from another suite.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.groups.extend(other.groups);
        self
    }

    /// Iterates scenarios in execution order.
    pub fn scenarios(&self) -> impl Iterator<Item = RegisteredScenario<'_>> {
        self.groups.iter().flat_map(|group| {
            group.cases.iter().map(move |case| RegisteredScenario {
                resource: &group.name,
                case: &case.name,
                scenario: &case.scenario,
            })
        })
    }

    /// Returns the number of registered scenarios.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.groups.iter().map(|g| g.cases.len()).sum()
    }

    /// Rejects registries that would not produce a meaningful run.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty suite, an empty group, a duplicate case
    /// name within a group, a scenario without expectations, or any scenario
    /// whose path or field paths do not resolve.
    pub fn validate(&self) -> DomainResult<()> {
        if self.scenario_count() == 0 {
            return Err(DomainError::EmptySuite(self.name.clone()));
        }

        for group in &self.groups {
            if group.cases.is_empty() {
                return Err(DomainError::EmptyResourceGroup(group.name.clone()));
            }

            let mut seen = HashSet::new();
            for case in &group.cases {
                if !seen.insert(case.name.as_str()) {
                    return Err(DomainError::DuplicateCase {
                        resource: group.name.clone(),
                        case: case.name.clone(),
                    });
                }
                if case.scenario.expectations.is_empty() {
                    return Err(DomainError::NoExpectations {
                        resource: group.name.clone(),
                        case: case.name.clone(),
                    });
                }
                case.scenario.validate()?;
            }
        }

        Ok(())
    }
}
