//! Recorded responses stored as JSON files.

mod response_fixture;

pub use response_fixture::{FixtureError, ResponseFixture, load_fixture};
