//! Email syntax rule.
//!
//! Accepts `local@domain.tld` where the local part uses `[A-Za-z0-9._%+-]`,
//! the domain labels use `[A-Za-z0-9.-]`, and the final label is at least
//! two ASCII letters.

/// Returns whether `email` has acceptable syntax.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.chars().all(is_local_char) {
        return false;
    }

    // The top-level label cannot contain a dot, so it always follows the last one.
    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !labels.is_empty()
        && labels.chars().all(is_domain_char)
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}
