//! Constant values shared by fixtures.

/// Channel kind registered against the scripted adapter in service tests.
pub static TEST_CHANNEL_KIND: &str = "mock";

/// Channel kind served by the HTTP adapter against the mockito server.
pub static TEST_HTTP_CHANNEL_KIND: &str = "http";

/// Placeholder API key stored on fixture channels. Not a real credential.
pub static TEST_API_KEY: &str = "test_api_key";
