//! Corpus-based conformance testing.
//!
//! A corpus is a JSON document listing test vectors. Each vector holds the
//! raw input text, optional limits, and the expected outcome: either the
//! parsed tree (written as ordinary JSON) or an error code with an optional
//! byte offset.
//!
//! ```json
//! {
//!   "manifest": {"format_version": "1", "description": "smoke"},
//!   "vectors": [
//!     {"id": "object", "input": "{\"a\": 1}", "expected": {"ok": {"a": 1}}},
//!     {"id": "comma", "input": "[1,]", "expected": {"err": {"code": 113, "offset": 3}}}
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::harness::equivalent;
use super::{ConformanceError, ConformanceResult};
use crate::json::{parse_with_limits, Limits};

/// Corpus format version understood by [`CorpusRunner`].
pub const FORMAT_VERSION: &str = "1";

/// Corpus manifest with metadata.
#[derive(Debug, Deserialize)]
pub struct CorpusManifest {
    /// Format version of the corpus file.
    pub format_version: String,
    /// Free-form description of the corpus.
    #[serde(default)]
    pub description: String,
}

/// A corpus containing test vectors.
#[derive(Debug, Deserialize)]
pub struct Corpus {
    /// Corpus metadata.
    pub manifest: CorpusManifest,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// A single test vector.
#[derive(Debug, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the test.
    pub id: String,
    /// Raw JSON text handed to the parser.
    pub input: String,
    /// Limits to parse with; strict limits when absent.
    #[serde(default)]
    pub limits: Option<Limits>,
    /// Expected outcome.
    pub expected: Expected,
}

/// Expected outcome of a test vector.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expected {
    /// Parsing succeeds with a tree equivalent to this value.
    Ok(serde_json::Value),
    /// Parsing fails with this error code (and offset, when given).
    Err {
        /// Numeric error code.
        code: u32,
        /// Byte offset of the error.
        #[serde(default)]
        offset: Option<usize>,
    },
}

/// Result of running a single test vector.
#[derive(Debug)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with mismatch.
    Fail {
        /// Expected result from the corpus.
        expected: String,
        /// Actual result from the parser.
        actual: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }
}

/// Results from running the corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Number of tests that passed.
    pub passed: usize,
    /// Number of tests that failed.
    pub failed: usize,
    /// Detailed results for each test.
    pub details: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        match &result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { .. } => self.failed += 1,
        }
        self.details.push((id.to_string(), result));
    }

    /// Get total number of tests run.
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Returns true if no test failed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get a summary string of the results.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed (total: {})",
            self.passed,
            self.failed,
            self.total()
        )
    }

    /// Get failures only.
    pub fn failures(&self) -> Vec<&(String, TestResult)> {
        self.details.iter().filter(|(_, r)| r.is_fail()).collect()
    }
}

/// Corpus runner that executes test vectors.
#[derive(Debug)]
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Load corpus from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> ConformanceResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Load corpus from JSON text.
    pub fn from_json(content: &str) -> ConformanceResult<Self> {
        let corpus: Corpus = serde_json::from_str(content)?;
        if corpus.manifest.format_version != FORMAT_VERSION {
            return Err(ConformanceError::UnsupportedVersion(
                corpus.manifest.format_version,
            ));
        }
        Ok(Self { corpus })
    }

    /// Get the corpus manifest.
    pub fn manifest(&self) -> &CorpusManifest {
        &self.corpus.manifest
    }

    /// Get the number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run all test vectors and return results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::new();

        for vector in &self.corpus.vectors {
            results.record(&vector.id, run_vector(vector));
        }

        results
    }
}

/// Run a single test vector.
fn run_vector(vector: &TestVector) -> TestResult {
    let limits = vector.limits.unwrap_or_default();
    let result = parse_with_limits(vector.input.as_bytes(), limits);

    match (&vector.expected, result) {
        (Expected::Ok(expected), Ok(value)) => {
            if equivalent(&value, expected) {
                TestResult::Pass
            } else {
                TestResult::Fail {
                    expected: format!("ok: {}", expected),
                    actual: format!("ok: {:?}", value),
                }
            }
        }
        (Expected::Ok(expected), Err(e)) => TestResult::Fail {
            expected: format!("ok: {}", expected),
            actual: format!("err: {} ({})", e.name(), e),
        },
        (Expected::Err { code, .. }, Ok(value)) => TestResult::Fail {
            expected: format!("E{}", code),
            actual: format!("ok: {:?}", value),
        },
        (Expected::Err { code, offset }, Err(e)) => {
            let offset_matches = offset.map_or(true, |o| e.offset() == Some(o));
            if e.code() == *code && offset_matches {
                TestResult::Pass
            } else {
                TestResult::Fail {
                    expected: match offset {
                        Some(o) => format!("E{} at byte {}", code, o),
                        None => format!("E{}", code),
                    },
                    actual: format!("{} ({})", e.name(), e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_CORPUS: &str = r#"{
        "manifest": {"format_version": "1", "description": "unit"},
        "vectors": [
            {"id": "object", "input": "{\"a\": [1, true]}", "expected": {"ok": {"a": [1, true]}}},
            {"id": "comma", "input": "[1,]", "expected": {"err": {"code": 113, "offset": 3}}},
            {"id": "escape-lenient", "input": "\"\\q\"", "limits": {"lenient_escapes": true},
             "expected": {"ok": "q"}},
            {"id": "wrong", "input": "[1]", "expected": {"ok": [2]}}
        ]
    }"#;

    #[test]
    fn test_run_small_corpus() {
        let runner = CorpusRunner::from_json(SMALL_CORPUS).unwrap();
        assert_eq!(runner.vector_count(), 4);
        assert_eq!(runner.manifest().description, "unit");

        let results = runner.run_all();
        assert_eq!(results.passed, 3);
        assert_eq!(results.failed, 1);
        assert!(!results.all_passed());
        assert_eq!(results.failures()[0].0, "wrong");
        assert_eq!(results.summary(), "3 passed, 1 failed (total: 4)");
    }

    #[test]
    fn test_offset_mismatch_fails() {
        let vector = TestVector {
            id: "offset".to_string(),
            input: "[1,]".to_string(),
            limits: None,
            expected: Expected::Err {
                code: 113,
                offset: Some(2),
            },
        };
        assert!(run_vector(&vector).is_fail());
    }

    #[test]
    fn test_unsupported_version() {
        let result = CorpusRunner::from_json(r#"{"manifest": {"format_version": "9"}, "vectors": []}"#);
        assert!(matches!(result, Err(ConformanceError::UnsupportedVersion(v)) if v == "9"));
    }

    #[test]
    fn test_malformed_corpus() {
        let result = CorpusRunner::from_json(r#"{"vectors": []}"#);
        assert!(matches!(result, Err(ConformanceError::Format(_))));
    }
}
