mod memory_store_tests;
pub(crate) mod support;
