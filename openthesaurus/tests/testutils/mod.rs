//! Test utilities for OpenThesaurus integration tests
//!
//! `TestFixture` wraps a facade over an in-memory store seeded with a small
//! excerpt of the German OpenThesaurus data.

pub mod test_fixture;
