//! Tests for the extractor module

mod scanner_tests;
