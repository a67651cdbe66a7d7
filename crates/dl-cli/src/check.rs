use dl_core::url::parse;
use dl_core::{builtin_registry, subscriptions};

/// Validate the built-in registry and self-test every rule's path matcher.
pub fn run_check() -> Result<(), String> {
    let registry = builtin_registry();

    registry
        .validate()
        .map_err(|e| format!("Registry is invalid: {}", e))?;

    let mut failures = Vec::new();
    for (host, rule) in registry.entries() {
        let url = synthetic_url(host, rule.path());
        let parsed = parse(&url)
            .map_err(|e| format!("Synthetic URL '{}' is invalid: {}", url, e))?;
        if !rule.matcher().is_match(parsed.path()) {
            failures.push(format!("{}{} does not accept {}", host, rule.path(), url));
        }
        if registry.lookup(&concrete_host(host)).is_none() {
            failures.push(format!("{} is unreachable", host));
        }
    }

    let entry_count = registry.entries().count();
    if subscriptions().len() != entry_count {
        failures.push(format!(
            "{} subscriptions for {} entries",
            subscriptions().len(),
            entry_count
        ));
    }

    if !failures.is_empty() {
        for failure in &failures {
            eprintln!("  ✗ {}", failure);
        }
        return Err(format!("{} check(s) failed", failures.len()));
    }

    println!("Registry is valid");
    println!("  Sites:         {}", registry.sites().len());
    println!("  Rules:         {}", entry_count);
    println!("  Fold domains:  {}", registry.fold_list().domains().count());
    println!("  Subscriptions: {}", subscriptions().len());

    Ok(())
}

fn concrete_host(key: &str) -> String {
    match key.strip_prefix("*.") {
        Some(domain) => format!("www.{}", domain),
        None => key.to_string(),
    }
}

fn synthetic_url(key: &str, path: &str) -> String {
    format!("https://{}{}check", concrete_host(key), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_host() {
        assert_eq!(concrete_host("*.digidip.net"), "www.digidip.net");
        assert_eq!(concrete_host("vk.com"), "vk.com");
    }

    #[test]
    fn test_synthetic_url() {
        assert_eq!(synthetic_url("exit.sc", "/"), "https://exit.sc/check");
    }

    #[test]
    fn test_builtin_passes() {
        assert!(run_check().is_ok());
    }
}
