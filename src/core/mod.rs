// src/core/mod.rs

// The `core` module is the root of everything that is not terminal UI:
// data models, rule data, the analysis engine, the fetch collaborator and
// the findings knowledge base.

/// Contains all data structures and models used throughout the application,
/// such as `AnalysisReport`, `ScriptRecord` and `CspStatus`.
pub mod models;

/// The typed failure taxonomy: fetch failures at the collaborator boundary,
/// domain errors inside pure functions.
pub mod error;

/// Immutable rule data (tracker domains, malicious signatures, outdated
/// library advisories) injected into the engine at construction.
pub mod rules;

/// Houses the classification core: script, content and header analyzers,
/// the scorer and the CSP synthesizer.
pub mod analyzer;

/// Retrieves pages over HTTP with a bounded timeout and typed errors.
pub mod fetcher;

/// Contains the human-readable context for every finding the engine can
/// emit. It acts as a repository of known issues and remediation advice.
pub mod knowledge_base;
