//! Interactive entry of credential values.

use super::types::{field_names, masked, CredentialBundle};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Asks for a new value for every field of `current`'s network.
///
/// Each prompt shows the masked current value. Whatever is typed replaces the
/// field, including an empty line.
pub fn prompt_for_bundle<R: BufRead, W: Write>(
    current: &CredentialBundle,
    input: &mut R,
    output: &mut W,
) -> Result<BTreeMap<String, String>> {
    let network = current.network();
    let existing: BTreeMap<&str, &str> = current.fields().into_iter().collect();
    let mut values = BTreeMap::new();

    for field in field_names(network) {
        let shown = existing.get(field).copied().unwrap_or_default();
        write!(
            output,
            "Input new value for {} [{}]: ",
            field,
            masked(shown)
        )?;
        output.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .with_context(|| format!("Failed to read value for {}", field))?;
        if read == 0 {
            anyhow::bail!(
                "Input ended before all {} credentials were entered (stopped at {})",
                network,
                field
            );
        }
        values.insert(field.to_string(), line.trim().to_string());
    }

    Ok(values)
}

#[cfg(test)]
#[path = "tests/prompt_tests.rs"]
mod tests;
