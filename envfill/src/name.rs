//! Environment variable name derivation.

/// Derives the environment variable name for `field` under `prefix`.
///
/// Word boundaries in the identifier become underscores and the derived
/// portion is upper-cased, keeping acronym runs as single segments. A
/// boundary is inserted before an ASCII uppercase character that either
/// follows a lowercase character or digit, or precedes a lowercase
/// character. The prefix is prepended verbatim, so prefixes built from
/// earlier derivations stay stable through nested recursion.
///
/// # Examples
///
/// ```
/// use envfill::name::env_var_name;
///
/// assert_eq!(env_var_name("apiPort", "MYAPP"), "MYAPP_API_PORT");
/// assert_eq!(env_var_name("APIPort", "MYAPP"), "MYAPP_API_PORT");
/// assert_eq!(env_var_name("api_port", "MYAPP"), "MYAPP_API_PORT");
/// ```
#[must_use]
pub fn env_var_name(field: &str, prefix: &str) -> String {
    let mut snake = String::with_capacity(field.len() + 4);
    let mut prev: Option<char> = None;
    let mut rest = field.chars().peekable();
    while let Some(current) = rest.next() {
        let boundary = current.is_ascii_uppercase()
            && prev.is_some_and(|before| {
                before.is_ascii_lowercase()
                    || before.is_ascii_digit()
                    || rest.peek().is_some_and(char::is_ascii_lowercase)
            });
        if boundary {
            snake.push('_');
        }
        snake.push(current);
        prev = Some(current);
    }
    format!("{prefix}_{}", snake.to_uppercase())
}
