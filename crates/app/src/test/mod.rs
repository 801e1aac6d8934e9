
pub use context::TestContext;
