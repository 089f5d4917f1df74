//! Integration test harness for the response export tool.

mod export_test;
mod roundtrip_test;
