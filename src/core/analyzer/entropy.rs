// src/core/analyzer/entropy.rs

use crate::core::error::DomainError;
use std::collections::HashMap;

/// Shannon entropy of `text`, in bits per character.
///
/// Statistically random text (minified bundles, base64 payloads, packed
/// malware) sits well above hand-written code. This is a heuristic signal,
/// not proof; the script classifier combines it with a length gate before
/// tagging anything.
///
/// Fails with `DomainError::EmptyInput` on the empty string, where the
/// probability model divides by zero. Callers gate on a minimum length first.
pub fn shannon_entropy(text: &str) -> Result<f64, DomainError> {
    if text.is_empty() {
        return Err(DomainError::EmptyInput);
    }

    let mut frequencies: HashMap<char, u32> = HashMap::new();
    let mut total = 0u32;
    for c in text.chars() {
        *frequencies.entry(c).or_insert(0) += 1;
        total += 1;
    }

    let total = f64::from(total);
    Ok(frequencies
        .values()
        .map(|&count| {
            let p = f64::from(count) / total;
            -p * p.log2()
        })
        .sum())
}
